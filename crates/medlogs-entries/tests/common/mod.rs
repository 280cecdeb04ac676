use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Eight sessions between 2024-01-01 and 2024-01-06, deliberately out of order.
///
/// Sorted order: 102, 103, 101, 104, 105, 106 (ties with 105), 107, 108.
pub const FIXTURE: &str = r#"[
  {"id": 101, "date": 1704268800000, "dateString": "2024-01-03 08:00:00", "elapsed": 1200,
   "course": {"code": "JOL3", "name": "Joy of Living 3"}, "notes": "W1 body scan"},
  {"id": 102, "date": 1704092400000, "dateString": "2024-01-01 07:00:00", "elapsed": 900,
   "course": {"code": "JOL3", "name": "Joy of Living 3"}, "notes": "W2 open awareness\nthen W1 review"},
  {"id": 103, "date": 1704175200000, "dateString": "2024-01-02 06:00:00", "elapsed": 1800,
   "course": {"code": "CUSTOM", "name": "Custom"}, "notes": "DED contemplation"},
  {"id": 104, "date": 1704348000000, "elapsed": 2400,
   "course": {"name": "Custom"}, "notes": "TR - FB2, Handshake 1.8\nfeeling awareness"},
  {"id": 105, "date": 1704434400000, "dateString": "2024-01-05 06:00:00", "elapsed": 1500,
   "course": {"code": "NECTAR_PATH", "name": "Nectar of the Path"}, "notes": "Four Thoughts 1 - precious human life"},
  {"id": 106, "date": 1704434400000, "dateString": "2024-01-04 22:00:00", "elapsed": 600,
   "course": {"code": "CUSTOM", "name": "Custom"}, "notes": "quiet sitting"},
  {"id": 107, "date": 1704520800000, "elapsed": "300",
   "course": {"name": "Custom"}, "notes": null},
  {"id": 108, "date": 1704524400000, "dateString": "2024-01-06 07:00:00", "elapsed": 3600,
   "course": {"code": "CUSTOM", "name": "Custom"}, "notes": "ADL and DOA retreat"}
]"#;

/// Write `content` to a log file in a fresh temp directory.
#[allow(dead_code)]
pub fn write_log(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir
        .path()
        .join("tergar-meditation-logs-2024-01-07T10.00.00-08.00.json");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[allow(dead_code)]
pub fn ids(entries: &[&medlogs_entries::SessionEntry]) -> Vec<i64> {
    entries.iter().map(|e| e.id).collect()
}
