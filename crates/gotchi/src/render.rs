//! Artifacts built from a run: the summary block, the gist payload and the
//! README.

use gotchi_core::format::{days, truncate};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateTotals;
use crate::bucket::Bucket;
use crate::percent::{per_day, percent_of};
use crate::pet::{Mood, PetState};
use crate::report::{render_lines, ReportLine};

const MAX_NAME_LEN: usize = 32;

/// Headline numbers for the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub commits: u64,
    pub per_day: Option<f64>,
    pub additions: u64,
    pub additions_percentage: Option<f64>,
    pub deletions: u64,
    pub deletions_percentage: Option<f64>,
    pub issues: u64,
    pub pull_requests: u64,
    pub code_reviews: u64,
}

impl Summary {
    pub fn from_totals(totals: &AggregateTotals, window_days: u32) -> Self {
        let changed = totals.changed_lines();
        Self {
            commits: totals.total_commits(),
            per_day: per_day(totals.total_commits(), window_days),
            additions: totals.additions,
            additions_percentage: percent_of(totals.additions, changed),
            deletions: totals.deletions,
            deletions_percentage: percent_of(totals.deletions, changed),
            issues: totals.issues,
            pull_requests: totals.pull_requests,
            code_reviews: totals.code_reviews,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut commit = format!("Commit: {}", self.commits);
        if let Some(avg) = self.per_day {
            commit.push_str(&format!(" avg({}/day)", avg));
        }

        vec![
            commit,
            with_share(
                format!("Total Additions: {}", self.additions),
                self.additions_percentage,
            ),
            with_share(
                format!("Total Deletions: {}", self.deletions),
                self.deletions_percentage,
            ),
            format!("Total Issue: {}", self.issues),
            format!("Total Pull Request: {}", self.pull_requests),
            format!("Total Code Review: {}", self.code_reviews),
        ]
    }
}

fn with_share(line: String, share: Option<f64>) -> String {
    match share {
        Some(pct) => format!("{} ({}%)", line, pct),
        None => line,
    }
}

/// What gets written to the gist: file title and body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistPayload {
    pub title: String,
    pub content: String,
}

impl GistPayload {
    pub fn new(mood: Mood, lines: &[ReportLine]) -> Self {
        Self {
            title: mood.title().to_string(),
            content: render_lines(lines),
        }
    }
}

/// Markdown status block for the pet
pub fn pet_status(pet: &PetState, mood: Mood, age_days: i64) -> String {
    [
        format!("## {}", truncate(&pet.name, MAX_NAME_LEN)),
        format!("- Age: {}", days(age_days)),
        format!("- Mood: {}", mood.title()),
        format!("- Contributions: {}", pet.total_contribution),
        format!("- Commits: {}", pet.diurnal_commits),
        format!("- Issues: {}", pet.issues),
        format!("- Pull requests: {}", pet.pull_requests),
        format!("- Code reviews: {}", pet.code_reviews),
    ]
    .join("\n")
}

/// README body: avatar, a greeting for the current period, the pet status
pub fn readme(avatar: Option<&str>, now: Bucket, status: &str) -> String {
    let mut content = String::new();
    if let Some(svg) = avatar {
        content.push_str(&format!("<div align=\"center\">{}</div>\n", svg.trim()));
    }
    content.push_str(now.greeting());
    content.push('\n');
    content.push_str(status);
    content.push('\n');
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::BucketCounts;
    use crate::report::format_report;
    use chrono::{TimeZone, Utc};

    fn totals() -> AggregateTotals {
        AggregateTotals {
            commits: BucketCounts {
                morning: 1,
                daytime: 0,
                evening: 1,
                night: 0,
            },
            additions: 15,
            deletions: 7,
            issues: 2,
            pull_requests: 1,
            code_reviews: 3,
        }
    }

    #[test]
    fn test_summary_lines() {
        let summary = Summary::from_totals(&totals(), 7);
        assert_eq!(
            summary.lines(),
            vec![
                "Commit: 2 avg(0.29/day)",
                "Total Additions: 15 (68.18%)",
                "Total Deletions: 7 (31.82%)",
                "Total Issue: 2",
                "Total Pull Request: 1",
                "Total Code Review: 3",
            ]
        );
    }

    #[test]
    fn test_summary_without_line_changes() {
        let t = AggregateTotals {
            additions: 0,
            deletions: 0,
            ..totals()
        };
        let lines = Summary::from_totals(&t, 7).lines();
        assert_eq!(lines[1], "Total Additions: 0");
        assert_eq!(lines[2], "Total Deletions: 0");
    }

    #[test]
    fn test_gist_payload() {
        let t = totals();
        let lines = format_report(&t).unwrap();
        let gist = GistPayload::new(Mood::of(&t), &lines);

        assert_eq!(gist.title, "I'm a night \u{1F989}");
        assert_eq!(gist.content.lines().count(), 4);
        assert!(gist.content.starts_with("\u{1F31E} Morning"));
    }

    #[test]
    fn test_readme() {
        let birth = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let pet = PetState::derive("Mochi", birth, 9, &totals());
        let status = pet_status(&pet, Mood::Early, 1);

        let with_avatar = readme(Some("<svg/>\n"), Bucket::Night, &status);
        assert!(with_avatar.starts_with("<div align=\"center\"><svg/></div>\n#You need to sleep bro!"));
        assert!(with_avatar.contains("- Age: 1 day"));
        assert!(with_avatar.contains("- Mood: I'm an early \u{1F424}"));

        let plain = readme(None, Bucket::Morning, &status);
        assert!(plain.starts_with("#Good Morning"));
        assert!(plain.ends_with("- Code reviews: 3\n"));
    }
}
