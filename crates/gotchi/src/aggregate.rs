//! Activity aggregation
//!
//! Folds commit records into per-period commit counts and line totals. Issue,
//! pull request and review counters arrive already filtered to the reporting
//! window and are copied through unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::{bucket_of, Bucket, Zone};

/// One commit: when it happened and how many lines it touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub committed_at: DateTime<Utc>,
    pub additions: u64,
    pub deletions: u64,
}

impl ActivityRecord {
    pub fn new(committed_at: DateTime<Utc>, additions: u64, deletions: u64) -> Self {
        Self {
            committed_at,
            additions,
            deletions,
        }
    }
}

/// Window-filtered counters supplied alongside the commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub issues: u64,
    pub pull_requests: u64,
    pub code_reviews: u64,
}

/// Commit counts per circadian period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketCounts {
    pub morning: u64,
    pub daytime: u64,
    pub evening: u64,
    pub night: u64,
}

impl BucketCounts {
    pub fn get(&self, bucket: Bucket) -> u64 {
        match bucket {
            Bucket::Morning => self.morning,
            Bucket::Daytime => self.daytime,
            Bucket::Evening => self.evening,
            Bucket::Night => self.night,
        }
    }

    fn increment(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Morning => self.morning += 1,
            Bucket::Daytime => self.daytime += 1,
            Bucket::Evening => self.evening += 1,
            Bucket::Night => self.night += 1,
        }
    }

    /// Commits across all four periods
    pub fn total(&self) -> u64 {
        self.morning + self.daytime + self.evening + self.night
    }

    /// Commits made while the sun is up (morning + daytime)
    pub fn first_half(&self) -> u64 {
        self.morning + self.daytime
    }

    /// Commits made after dark (evening + night)
    pub fn second_half(&self) -> u64 {
        self.evening + self.night
    }
}

/// Everything derived from one reporting run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub commits: BucketCounts,
    pub additions: u64,
    pub deletions: u64,
    pub issues: u64,
    pub pull_requests: u64,
    pub code_reviews: u64,
}

impl AggregateTotals {
    pub fn total_commits(&self) -> u64 {
        self.commits.total()
    }

    /// Nothing to report: percentages would divide by zero
    pub fn is_empty(&self) -> bool {
        self.total_commits() == 0
    }

    pub fn changed_lines(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Incremental fold over commit records.
///
/// Partial totals are well-defined after every [`push`](Self::push).
#[derive(Debug, Clone)]
pub struct Aggregator {
    zone: Zone,
    totals: AggregateTotals,
}

impl Aggregator {
    pub fn new(zone: Zone, counters: Counters) -> Self {
        Self {
            zone,
            totals: AggregateTotals {
                issues: counters.issues,
                pull_requests: counters.pull_requests,
                code_reviews: counters.code_reviews,
                ..Default::default()
            },
        }
    }

    /// Fold one record into the running totals, returning its period
    pub fn push(&mut self, record: &ActivityRecord) -> Bucket {
        let bucket = bucket_of(record.committed_at, &self.zone);
        self.totals.commits.increment(bucket);
        self.totals.additions += record.additions;
        self.totals.deletions += record.deletions;
        bucket
    }

    /// Totals so far
    pub fn snapshot(&self) -> AggregateTotals {
        self.totals
    }

    pub fn finish(self) -> AggregateTotals {
        self.totals
    }
}

/// Aggregate a complete batch of records
pub fn aggregate<'a, I>(records: I, zone: &Zone, counters: Counters) -> AggregateTotals
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut aggregator = Aggregator::new(*zone, counters);
    for record in records {
        aggregator.push(record);
    }
    aggregator.finish()
}
