use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;

use crate::types::SessionEntry;

/// Session count and total elapsed time of a set of entries.
///
/// Adding aggregates of overlapping buckets counts shared entries once per
/// bucket. Combined section totals can therefore exceed their parent.
/// Seconds saturate at `u64::MAX` rather than wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub sessions: usize,
    pub seconds: u64,
}

impl Aggregate {
    pub fn of<'a>(entries: impl IntoIterator<Item = &'a SessionEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |acc, e| Self {
            sessions: acc.sessions + 1,
            seconds: acc.seconds.saturating_add(e.elapsed_secs),
        })
    }
}

impl Add for Aggregate {
    type Output = Aggregate;

    fn add(self, other: Aggregate) -> Aggregate {
        Aggregate {
            sessions: self.sessions + other.sessions,
            seconds: self.seconds.saturating_add(other.seconds),
        }
    }
}

impl Sum for Aggregate {
    fn sum<I: Iterator<Item = Aggregate>>(iter: I) -> Self {
        iter.fold(Aggregate::default(), Add::add)
    }
}
