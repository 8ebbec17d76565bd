//! Activity snapshots
//!
//! The GitHub client dumps what it fetched into a JSON snapshot; this module
//! turns it into commit records and window-filtered counters. Payloads from
//! the API are patchy, so every field is optional and `null` list entries are
//! tolerated. Missing counters count as zero.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregate::{ActivityRecord, Counters};
use crate::error::StatsError;
use crate::pet::Clock;

/// Snapshot as written by the collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Start of the reporting window (RFC 3339)
    pub since: Option<String>,
    pub user: Option<UserStatus>,
    #[serde(deserialize_with = "null_as_empty")]
    pub repositories: Vec<Option<RepositoryActivity>>,
    #[serde(deserialize_with = "null_as_empty")]
    pub pull_requests: Vec<Option<Dated>>,
    #[serde(deserialize_with = "null_as_empty")]
    pub reviews: Vec<Option<Dated>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatus {
    pub login: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<String>,
    pub restricted_contributions_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryActivity {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub issue_count: Option<u64>,
    #[serde(deserialize_with = "null_as_empty")]
    pub commits: Vec<Option<CommitNode>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitNode {
    pub committed_date: Option<String>,
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
}

/// Anything with a creation date: pull requests, reviews
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dated {
    pub created_at: Option<String>,
}

/// A list sent as `null` reads as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Records and counters ready for aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub since: DateTime<Utc>,
    pub records: Vec<ActivityRecord>,
    pub counters: Counters,
    /// Commits dropped because they carried no date
    pub skipped: usize,
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StatsError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StatsError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

impl Snapshot {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Window start: the snapshot's `since`, else `window_days` before now
    pub fn window_start(&self, clock: &dyn Clock, window_days: u32) -> Result<DateTime<Utc>, StatsError> {
        match self.since.as_deref() {
            Some(since) => parse_timestamp(since),
            None => Duration::try_days(i64::from(window_days))
                .and_then(|window| clock.now().checked_sub_signed(window))
                .ok_or(StatsError::WindowOutOfRange(window_days)),
        }
    }

    /// Commit records across all repositories
    pub fn records(&self) -> Result<(Vec<ActivityRecord>, usize), StatsError> {
        let mut records = Vec::new();
        let mut skipped = 0;

        for commit in self.commits() {
            let Some(date) = commit.committed_date.as_deref() else {
                skipped += 1;
                continue;
            };
            records.push(ActivityRecord::new(
                parse_timestamp(date)?,
                commit.additions.unwrap_or(0),
                commit.deletions.unwrap_or(0),
            ));
        }

        Ok((records, skipped))
    }

    /// Issue, pull request and review counts inside the window.
    ///
    /// Pull requests and reviews count only when created strictly after
    /// `since`; undated ones are ignored.
    pub fn counters(&self, since: DateTime<Utc>) -> Result<Counters, StatsError> {
        let issues = self
            .repositories
            .iter()
            .flatten()
            .map(|repo| repo.issue_count.unwrap_or(0))
            .sum();

        Ok(Counters {
            issues,
            pull_requests: count_after(&self.pull_requests, since)?,
            code_reviews: count_after(&self.reviews, since)?,
        })
    }

    /// Everything the aggregator needs, in one pass
    pub fn activity(&self, clock: &dyn Clock, window_days: u32) -> Result<Activity, StatsError> {
        let since = self.window_start(clock, window_days)?;
        let (records, skipped) = self.records()?;
        let counters = self.counters(since)?;

        Ok(Activity {
            since,
            records,
            counters,
            skipped,
        })
    }

    /// Account creation date, the pet's birthday
    pub fn birth_date(&self) -> Result<Option<DateTime<Utc>>, StatsError> {
        self.user
            .as_ref()
            .and_then(|u| u.created_at.as_deref())
            .map(parse_timestamp)
            .transpose()
    }

    pub fn total_contribution(&self) -> u64 {
        self.user
            .as_ref()
            .and_then(|u| u.restricted_contributions_count)
            .unwrap_or(0)
    }

    /// Display name, falling back to the login
    pub fn user_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        user.name.as_deref().or(user.login.as_deref())
    }

    fn commits(&self) -> impl Iterator<Item = &CommitNode> {
        self.repositories
            .iter()
            .flatten()
            .flat_map(|repo| repo.commits.iter().flatten())
    }
}

fn count_after(items: &[Option<Dated>], since: DateTime<Utc>) -> Result<u64, StatsError> {
    let mut count = 0;
    for created_at in items.iter().flatten().filter_map(|d| d.created_at.as_deref()) {
        if parse_timestamp(created_at)? > since {
            count += 1;
        }
    }
    Ok(count)
}
