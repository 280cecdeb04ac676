use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use medlogs_archive::LogArchive;
use medlogs_entries::{DateRange, EntryStore, Reports, SearchQuery};
use medlogs_logging::{init_tracing, LogEvent, LogFormat, Logger};

mod config;
mod output;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "medlogs",
    about = "Classify and summarise meditation session logs",
    version
)]
struct Cli {
    /// Search log notes for a case-insensitive regex
    #[arg(short, long)]
    search: Option<String>,

    /// With --search, print full logs rather than just notes
    #[arg(short, long, requires = "search")]
    full_logs: bool,

    /// With --search, search a single bucket (or bucket/section) of logs
    #[arg(short = 'b', long, requires = "search")]
    search_bucket: Option<String>,

    /// List available bucket names to search
    #[arg(short, long)]
    list_buckets: bool,

    /// With --search, limit to an inclusive date range "A,B". Each element is
    /// optional and is a date or a number of days ago, e.g. "7,3" or "2019-01-01,"
    #[arg(short, long, requires = "search")]
    date_range: Option<String>,

    /// Read this log file instead of the newest stored export
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file (default: <config dir>/medlogs/medlogs.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the downloads directory
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Output reports and search results as JSON
    #[arg(long)]
    json: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Tracing filter (default from config, then "warn")
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let log_format: LogFormat = cli.log_format.into();
    init_tracing(
        cli.log_level.as_deref().unwrap_or(config.log_level()),
        log_format,
    );
    let logger = Logger::new(log_format);

    let log_file = match cli.log_file.clone() {
        Some(path) => path,
        None => {
            let mut archive_config = config.archive_config();
            if let Some(dir) = cli.download_dir.clone() {
                archive_config.download_dir = dir;
            }
            if let Some(dir) = cli.storage_dir.clone() {
                archive_config.storage_dir = dir;
            }
            let archive = LogArchive::new(archive_config);

            match tidy_archive(&archive, &logger)? {
                Some(path) => path,
                None => {
                    logger.log(&LogEvent::NoLogFound {
                        storage_dir: archive.config().storage_dir.clone(),
                        download_dir: archive.config().download_dir.clone(),
                    });
                    return Ok(());
                }
            }
        }
    };
    logger.log(&LogEvent::LogSelected {
        path: log_file.clone(),
    });

    let date_range = cli
        .date_range
        .as_deref()
        .map(|range| DateRange::parse(range, chrono::Local::now().date_naive()))
        .transpose()
        .context("Invalid --date-range")?;

    let store = EntryStore::open(&log_file)
        .with_context(|| format!("Failed to load {}", log_file.display()))?;

    if let Some(pattern) = cli.search.as_deref() {
        let mut query = SearchQuery::new(pattern);
        if let Some(bucket) = cli.search_bucket.as_deref() {
            query = query.in_bucket(bucket);
        }
        if let Some(range) = date_range {
            query = query.within(range);
        }
        return print_search(&store, &query, cli.full_logs, cli.json);
    }

    if cli.list_buckets {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&store.bucket_names())?);
        } else {
            println!("{}", store.bucket_names().join(", "));
        }
        return Ok(());
    }

    let reports = Reports::standard(&store)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}\n", output::render_report(report));
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path)?
            .with_context(|| format!("Config file {} does not exist", path.display())),
        None => Ok(match Config::default_path() {
            Some(path) => Config::load(&path)?.unwrap_or_default(),
            None => Config::default(),
        }),
    }
}

/// Move new downloads into storage, prune old exports, take a backup when
/// due, and return the newest export.
fn tidy_archive(archive: &LogArchive, logger: &Logger) -> Result<Option<PathBuf>> {
    for moved in archive
        .move_downloads()
        .context("Failed to move downloaded logs")?
    {
        logger.log(&LogEvent::FileMoved {
            from: moved.from,
            to: moved.to,
        });
    }

    if archive.latest()?.is_none() {
        return Ok(None);
    }

    let removed = archive.prune().context("Failed to remove old logs")?;
    if removed > 0 {
        logger.log(&LogEvent::FilesPruned {
            removed,
            kept: archive.config().keep_files,
        });
    }

    let now = chrono::Local::now().naive_local();
    if let Some(backup) = archive
        .backup_if_due(now)
        .context("Failed to back up logs")?
    {
        logger.log(&LogEvent::BackupCreated {
            source: backup.source,
            backup: backup.backup,
            interval_days: archive.config().backup_after.as_secs() / 86_400,
        });
    }

    Ok(archive.latest()?)
}

fn print_search(store: &EntryStore, query: &SearchQuery, full_logs: bool, json: bool) -> Result<()> {
    let entries = store.search(query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if let Some(bucket) = query.scope.as_deref() {
        println!("{} {}", "Bucket:".dimmed(), bucket);
    }
    println!("{} logs found\n", entries.len());

    if full_logs {
        println!("{}", output::entries_header());
        for entry in &entries {
            println!("{}", output::format_entry(entry));
        }
        println!("{}", output::search_totals(&entries));
    } else {
        let notes: Vec<&str> = entries.iter().filter_map(|e| e.notes.as_deref()).collect();
        println!("{}", notes.join("\n"));
    }

    Ok(())
}
