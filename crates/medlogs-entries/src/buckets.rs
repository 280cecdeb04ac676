use std::collections::{BTreeSet, HashSet};

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{LoadError, QueryError};
use crate::taxonomy::{BucketDef, BucketRule, Population, Predicate, CUSTOM_CODE, CUSTOM_NAME};
use crate::types::SessionEntry;

/// A labelled subset inside a keyed bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: &'static str,
    pub members: Vec<usize>,
}

/// Members are indices into the store's chronologically sorted entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Bucket {
    Flat(Vec<usize>),
    Keyed(Vec<Section>),
}

impl Bucket {
    /// Every member in chronological order. Keyed buckets yield the union of
    /// their sections, each entry once.
    pub fn members(&self) -> Vec<usize> {
        match self {
            Bucket::Flat(members) => members.clone(),
            Bucket::Keyed(sections) => sections
                .iter()
                .flat_map(|s| s.members.iter().copied())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Section labels are matched ignoring ASCII case.
    pub fn section(&self, label: &str) -> Option<&Section> {
        match self {
            Bucket::Flat(_) => None,
            Bucket::Keyed(sections) => sections
                .iter()
                .find(|s| s.label.eq_ignore_ascii_case(label)),
        }
    }
}

/// All derived buckets, kept in taxonomy order.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    named: Vec<(&'static str, Bucket)>,
}

impl Buckets {
    /// Evaluate every rule of `taxonomy` against `entries` in one eager pass.
    pub fn derive(entries: &[SessionEntry], taxonomy: &[BucketDef]) -> Result<Self, LoadError> {
        let mut buckets = Buckets::default();

        for def in taxonomy {
            if buckets.get(def.name).is_some() {
                return Err(taxonomy_error(def.name, "defined twice"));
            }

            let bucket = match def.rule {
                BucketRule::Flat {
                    population,
                    predicate,
                } => {
                    let candidates = buckets.population(def.name, population, entries.len())?;
                    let matcher = Matcher::compile(def.name, predicate)?;
                    Bucket::Flat(matcher.select(entries, &candidates))
                }
                BucketRule::Keyed {
                    population,
                    sections,
                } => {
                    let candidates = buckets.population(def.name, population, entries.len())?;
                    let sections = sections
                        .iter()
                        .map(|&(label, predicate)| {
                            let matcher = Matcher::compile(def.name, predicate)?;
                            Ok(Section {
                                label,
                                members: matcher.select(entries, &candidates),
                            })
                        })
                        .collect::<Result<Vec<_>, LoadError>>()?;
                    Bucket::Keyed(sections)
                }
                BucketRule::Residual { base, excluding } => {
                    let base = buckets.dependency(def.name, base)?.members();
                    let mut excluded: HashSet<usize> = HashSet::new();
                    for name in excluding {
                        excluded.extend(buckets.dependency(def.name, name)?.members());
                    }
                    Bucket::Flat(base.into_iter().filter(|i| !excluded.contains(i)).collect())
                }
            };

            tracing::debug!(
                bucket = def.name,
                members = bucket.members().len(),
                "Derived bucket"
            );
            buckets.named.push((def.name, bucket));
        }

        Ok(buckets)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.named.iter().map(|(name, _)| *name)
    }

    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.named
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bucket)| bucket)
    }

    /// Resolve a scope to member indices. `name` addresses a whole bucket,
    /// `name/label` one section of a keyed bucket.
    pub fn resolve(&self, scope: &str) -> Result<Vec<usize>, QueryError> {
        let unknown = || QueryError::UnknownBucket(scope.to_string());
        match scope.split_once('/') {
            Some((name, label)) => self
                .get(name)
                .and_then(|bucket| bucket.section(label))
                .map(|section| section.members.clone())
                .ok_or_else(unknown),
            None => self.get(scope).map(Bucket::members).ok_or_else(unknown),
        }
    }

    fn dependency(&self, bucket: &str, name: &str) -> Result<&Bucket, LoadError> {
        self.get(name).ok_or_else(|| {
            taxonomy_error(bucket, &format!("refers to '{}' before it is derived", name))
        })
    }

    fn population(
        &self,
        bucket: &str,
        population: Population,
        len: usize,
    ) -> Result<Vec<usize>, LoadError> {
        match population {
            Population::All => Ok((0..len).collect()),
            Population::Bucket(name) => Ok(self.dependency(bucket, name)?.members()),
        }
    }
}

fn taxonomy_error(bucket: &str, reason: &str) -> LoadError {
    LoadError::Taxonomy {
        bucket: bucket.to_string(),
        reason: reason.to_string(),
    }
}

/// A compiled [`Predicate`].
enum Matcher {
    CodeIs(&'static str),
    CodeIsNot(&'static str),
    Custom,
    Contains(&'static str),
    Regex { regex: Regex, joined: bool },
}

impl Matcher {
    fn compile(bucket: &str, predicate: Predicate) -> Result<Self, LoadError> {
        let regex = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| taxonomy_error(bucket, &e.to_string()))
        };

        Ok(match predicate {
            Predicate::CodeIs(code) => Matcher::CodeIs(code),
            Predicate::CodeIsNot(code) => Matcher::CodeIsNot(code),
            Predicate::Custom => Matcher::Custom,
            Predicate::NotesContain(tag) => Matcher::Contains(tag),
            Predicate::NotesMatch(pattern) => Matcher::Regex {
                regex: regex(pattern)?,
                joined: false,
            },
            Predicate::NotesMatchJoined(pattern) => Matcher::Regex {
                regex: regex(pattern)?,
                joined: true,
            },
        })
    }

    fn matches(&self, entry: &SessionEntry) -> bool {
        let code = entry.course_code();
        match self {
            Matcher::CodeIs(sentinel) => code == Some(*sentinel),
            Matcher::CodeIsNot(sentinel) => code != Some(*sentinel),
            Matcher::Custom => {
                code == Some(CUSTOM_CODE)
                    || (code.is_none() && entry.course.name.as_deref() == Some(CUSTOM_NAME))
            }
            Matcher::Contains(tag) => entry.notes.as_deref().is_some_and(|n| n.contains(tag)),
            Matcher::Regex { regex, joined } => match entry.notes.as_deref() {
                Some(notes) if *joined => regex.is_match(&notes.replace('\n', " ")),
                Some(notes) => regex.is_match(notes),
                None => false,
            },
        }
    }

    fn select(&self, entries: &[SessionEntry], candidates: &[usize]) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&i| self.matches(&entries[i]))
            .collect()
    }
}
