//! The circadian report
//!
//! One line per period, always in day order:
//!
//! ```text
//! 🌞 Morning     1 commits  ███████████░░░░░░░░░░  50.0%
//! 🌙 Night       0 commits  ░░░░░░░░░░░░░░░░░░░░░   0.0%
//! ```
//!
//! Columns are padded in UTF-16 units so output matches the published gist
//! byte for byte.

use gotchi_core::format::{pad_end, pad_start};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateTotals;
use crate::bucket::Bucket;
use crate::display::render_bar;
use crate::percent::{percent_of, raw_percent, round_to};

/// Width of the bars in the published report
pub const BAR_WIDTH: usize = 21;

const LABEL_WIDTH: usize = 10;
const COMMITS_WIDTH: usize = 14;
const PERCENT_WIDTH: usize = 5;

/// One row of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub bucket: Bucket,
    pub label: String,
    pub commit_count: u64,
    pub bar_chart: String,
    /// Share of all commits, one decimal place
    pub percentage: f64,
}

impl ReportLine {
    /// Build the row for `bucket`. `None` when there are no commits at all.
    pub fn for_bucket(bucket: Bucket, totals: &AggregateTotals, width: usize) -> Option<Self> {
        let count = totals.commits.get(bucket);
        let total = totals.total_commits();
        let bar_percent = percent_of(count, total)?;
        let shown = raw_percent(count, total)?;

        Some(Self {
            bucket,
            label: bucket.label().to_string(),
            commit_count: count,
            bar_chart: render_bar(bar_percent, width),
            percentage: round_to(shown, 1),
        })
    }

    /// Aligned text, columns separated by single spaces
    pub fn render(&self) -> String {
        [
            pad_end(&self.label, LABEL_WIDTH),
            pad_end(&format!("{:>5} commits", self.commit_count), COMMITS_WIDTH),
            self.bar_chart.clone(),
            format!(
                "{}%",
                pad_start(&format!("{:.1}", self.percentage), PERCENT_WIDTH)
            ),
        ]
        .join(" ")
    }
}

impl std::fmt::Display for ReportLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Report rows at the published bar width.
///
/// `None` means there is nothing to report (no commits in the window).
pub fn format_report(totals: &AggregateTotals) -> Option<Vec<ReportLine>> {
    format_report_with_width(totals, BAR_WIDTH)
}

/// Report rows with a custom bar width
pub fn format_report_with_width(totals: &AggregateTotals, width: usize) -> Option<Vec<ReportLine>> {
    if totals.is_empty() {
        return None;
    }
    Bucket::all()
        .iter()
        .map(|bucket| ReportLine::for_bucket(*bucket, totals, width))
        .collect()
}

/// Join rendered rows into the gist body
pub fn render_lines(lines: &[ReportLine]) -> String {
    lines
        .iter()
        .map(ReportLine::render)
        .collect::<Vec<_>>()
        .join("\n")
}
