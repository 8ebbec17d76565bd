//! gotchi - Circadian commit statistics and a virtual pet
//!
//! Buckets a week of commits into morning, daytime, evening and night,
//! renders the split as aligned bar charts, and feeds the totals into a small
//! pet whose mood follows when you code.
//!
//! Pipeline:
//! - bucket: timestamp + timezone -> circadian period
//! - aggregate: fold commit records and counters into totals
//! - percent: stable two-digit percentages
//! - display: fixed-width bar charts and terminal colours
//! - report: one aligned line per period
//! - pet: pet state, age and mood
//! - snapshot: collaborator output -> records and counters
//! - render: summary, gist and README artifacts

pub mod aggregate;
pub mod bucket;
pub mod display;
pub mod error;
pub mod percent;
pub mod pet;
pub mod render;
pub mod report;
pub mod snapshot;

pub use aggregate::{aggregate, ActivityRecord, AggregateTotals, Aggregator, BucketCounts, Counters};
pub use bucket::{bucket_of, Bucket, Zone, ZoneChoice};
pub use display::{render_bar, Colors};
pub use error::StatsError;
pub use percent::percent_of;
pub use pet::{Clock, FixedClock, Mood, PetState, SystemClock};
pub use report::{format_report, ReportLine};
pub use snapshot::Snapshot;
