//! The pet
//!
//! A small creature derived from a run's totals. It is born when the GitHub
//! account was created, ages one day at a time, and is an early bird or a
//! night owl depending on when most commits happen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateTotals, BucketCounts};

/// Source of "now"
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// When the pet is most active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Early,
    Night,
}

impl Mood {
    /// Early only on a strict majority of morning + daytime commits
    pub fn from_counts(counts: &BucketCounts) -> Self {
        if counts.first_half() > counts.second_half() {
            Self::Early
        } else {
            Self::Night
        }
    }

    pub fn of(totals: &AggregateTotals) -> Self {
        Self::from_counts(&totals.commits)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Night => "night",
        }
    }

    /// Gist title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Early => "I'm an early \u{1F424}",
            Self::Night => "I'm a night \u{1F989}",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pet statistics for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub total_contribution: u64,
    pub diurnal_commits: u64,
    pub issues: u64,
    pub code_reviews: u64,
    pub pull_requests: u64,
}

impl PetState {
    pub fn derive(
        name: impl Into<String>,
        birth_date: DateTime<Utc>,
        total_contribution: u64,
        totals: &AggregateTotals,
    ) -> Self {
        Self {
            name: name.into(),
            birth_date,
            total_contribution,
            diurnal_commits: totals.total_commits(),
            issues: totals.issues,
            code_reviews: totals.code_reviews,
            pull_requests: totals.pull_requests,
        }
    }

    /// Whole days since birth. A birth date in the future counts as day 0.
    pub fn age(&self, clock: &dyn Clock) -> i64 {
        clock
            .now()
            .signed_duration_since(self.birth_date)
            .num_days()
            .max(0)
    }
}
