//! gotchi - Circadian commit statistics and a virtual pet
//!
//! Reads an activity snapshot fetched by the GitHub client, aggregates it,
//! and prints the report, summary, pet status, gist payload or README.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use gotchi::aggregate::{aggregate, AggregateTotals};
use gotchi::bucket::{bucket_of, Zone};
use gotchi::display::{colored_bar, section_header, title, Colors};
use gotchi::pet::{Clock, Mood, PetState, SystemClock};
use gotchi::render::{pet_status, readme, GistPayload, Summary};
use gotchi::report::{format_report_with_width, ReportLine};
use gotchi::snapshot::Snapshot;
use gotchi::StatsError;
use gotchi_core::format::days;
use gotchi_core::{Config, Paths};

#[derive(Parser)]
#[command(name = "gotchi")]
#[command(about = "Circadian commit statistics and a virtual pet that grows with your activity")]
#[command(version)]
#[command(after_help = r#"SNAPSHOT:
    A JSON file written by the GitHub client (or - for stdin) holding the
    window start, user status, per-repository commits and issue counts,
    pull requests and reviews. Missing fields count as zero.

EXAMPLES:
    gotchi report activity.json             # Morning/daytime/evening/night bars
    gotchi summary activity.json --json     # Totals as JSON
    gotchi pet activity.json                # Pet status, age and mood
    gotchi gist activity.json --json        # Gist title and content
    gotchi readme activity.json -o README.md
    gotchi init                             # Write a default config
"#)]
struct Cli {
    /// Config file (default: ~/.config/gotchi/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// IANA timezone used to bucket commits (overrides config)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Reporting window in days (overrides config)
    #[arg(long, global = true)]
    days: Option<u32>,

    /// Pet name (overrides config)
    #[arg(long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commits per period of the day as bar charts
    Report {
        /// Activity snapshot (- for stdin)
        snapshot: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Commit, line, issue, pull request and review totals
    Summary {
        /// Activity snapshot (- for stdin)
        snapshot: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pet status
    Pet {
        /// Activity snapshot (- for stdin)
        snapshot: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Gist title and content
    Gist {
        /// Activity snapshot (- for stdin)
        snapshot: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the README
    Readme {
        /// Activity snapshot (- for stdin)
        snapshot: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = Paths::new();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());

    let settings = || Settings::load(&cli, &config_path);

    match &cli.command {
        Commands::Report { snapshot, json } => cmd_report(&settings()?, snapshot, *json),
        Commands::Summary { snapshot, json } => cmd_summary(&settings()?, snapshot, *json),
        Commands::Pet { snapshot, json } => cmd_pet(&settings()?, snapshot, *json),
        Commands::Gist { snapshot, json } => cmd_gist(&settings()?, snapshot, *json),
        Commands::Readme { snapshot, output } => {
            cmd_readme(&settings()?, snapshot, output.as_deref())
        }
        Commands::Init { force } => cmd_init(&config_path, *force),
    }
}

/// Config merged with command-line overrides
struct Settings {
    config: Config,
    zone: Zone,
    clock: SystemClock,
}

impl Settings {
    fn load(cli: &Cli, config_path: &Path) -> Result<Self> {
        let mut config = Config::load(config_path)?;
        debug!(path = %config_path.display(), "loaded config");

        if let Some(tz) = &cli.timezone {
            config.timezone = Some(tz.clone());
        }
        if let Some(days) = cli.days {
            config.window_days = days;
        }
        if let Some(name) = &cli.name {
            config.pet_name = name.clone();
        }
        config.validate()?;

        let choice = Zone::resolve(config.timezone.as_deref());
        if let Some(reason) = &choice.fallback {
            warn!("{}; falling back to the local timezone", reason);
        }
        debug!(zone = %choice.zone, "resolved timezone");

        Ok(Self {
            config,
            zone: choice.zone,
            clock: SystemClock,
        })
    }
}

/// A loaded snapshot and its aggregate
struct Run {
    snapshot: Snapshot,
    totals: AggregateTotals,
}

impl Run {
    fn load(settings: &Settings, source: &str) -> Result<Self> {
        let snapshot = read_snapshot(source)?;
        let activity = snapshot
            .activity(&settings.clock, settings.config.window_days)
            .context("Invalid activity snapshot")?;

        if activity.skipped > 0 {
            warn!(skipped = activity.skipped, "ignored commits without a date");
        }

        let totals = aggregate(&activity.records, &settings.zone, activity.counters);
        debug!(
            since = %activity.since,
            commits = totals.total_commits(),
            "aggregated activity"
        );

        Ok(Self { snapshot, totals })
    }

    /// Report rows, or `None` (logged) when the window has no commits
    fn lines(&self, settings: &Settings) -> Option<Vec<ReportLine>> {
        let lines = format_report_with_width(&self.totals, settings.config.bar_width);
        if lines.is_none() {
            info!("{}; nothing to render", StatsError::NoActivity);
        }
        lines
    }

    fn pet(&self, settings: &Settings) -> Result<PetState> {
        let birth = self
            .snapshot
            .birth_date()
            .context("Invalid account creation date")?
            .unwrap_or_else(|| settings.clock.now());

        Ok(PetState::derive(
            settings.config.pet_name.clone(),
            birth,
            self.snapshot.total_contribution(),
            &self.totals,
        ))
    }
}

fn read_snapshot(source: &str) -> Result<Snapshot> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read snapshot: {}", source))?
    };

    Snapshot::from_json(&content).with_context(|| format!("Failed to parse snapshot: {}", source))
}

/// Circadian report
fn cmd_report(settings: &Settings, source: &str, json: bool) -> Result<()> {
    let run = Run::load(settings, source)?;
    let Some(lines) = run.lines(settings) else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    let colors = Colors::auto();
    for line in &lines {
        let colored = ReportLine {
            bar_chart: colored_bar(&line.bar_chart, &colors),
            ..line.clone()
        };
        println!("{}", colored.render());
    }

    Ok(())
}

/// Totals for the window
fn cmd_summary(settings: &Settings, source: &str, json: bool) -> Result<()> {
    let run = Run::load(settings, source)?;
    if run.totals.is_empty() {
        info!("{}; nothing to summarise", StatsError::NoActivity);
        return Ok(());
    }

    let summary = Summary::from_totals(&run.totals, settings.config.window_days);

    if json {
        let output = serde_json::json!({
            "days": settings.config.window_days,
            "timezone": settings.zone.name(),
            "summary": summary,
            "commits": run.totals.commits,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let colors = Colors::auto();
    println!(
        "{}",
        title(
            &format!("Activity ({})", days(i64::from(settings.config.window_days))),
            &colors
        )
    );
    println!("{}{}{}", colors.dim, settings.zone, colors.reset);
    println!();
    for (i, line) in summary.lines().iter().enumerate() {
        match i {
            1 => println!("  {}{}{}", colors.green, line, colors.reset),
            2 => println!("  {}{}{}", colors.red, line, colors.reset),
            _ => println!("  {}", line),
        }
    }

    Ok(())
}

/// Pet status
fn cmd_pet(settings: &Settings, source: &str, json: bool) -> Result<()> {
    let run = Run::load(settings, source)?;
    let pet = run.pet(settings)?;
    let age = pet.age(&settings.clock);
    let mood = Mood::of(&run.totals);

    if json {
        let output = serde_json::json!({
            "pet": pet,
            "age_days": age,
            "mood": mood,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let colors = Colors::auto();
    println!("{}", title(&pet.name, &colors));
    if let Some(owner) = run.snapshot.user_name() {
        println!("{}Companion of {}{}", colors.dim, owner, colors.reset);
    }
    println!("{}{}{}", colors.yellow, mood.title(), colors.reset);
    println!();
    println!("{}", section_header("Statistics", &colors));
    println!("  Age:            {}", days(age));
    println!("  Contributions:  {}", pet.total_contribution);
    println!("  Commits:        {}", pet.diurnal_commits);
    println!("  Issues:         {}", pet.issues);
    println!("  Pull requests:  {}", pet.pull_requests);
    println!("  Code reviews:   {}", pet.code_reviews);

    Ok(())
}

/// Gist payload
fn cmd_gist(settings: &Settings, source: &str, json: bool) -> Result<()> {
    let run = Run::load(settings, source)?;
    let Some(lines) = run.lines(settings) else {
        return Ok(());
    };
    let gist = GistPayload::new(Mood::of(&run.totals), &lines);

    if json {
        println!("{}", serde_json::to_string_pretty(&gist)?);
    } else {
        println!("{}", gist.title);
        println!("{}", gist.content);
    }

    Ok(())
}

/// README artifact
fn cmd_readme(settings: &Settings, source: &str, output: Option<&Path>) -> Result<()> {
    let run = Run::load(settings, source)?;
    let Some(content) = readme_content(settings, &run)? else {
        return Ok(());
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write README: {}", path.display()))?;
            info!(path = %path.display(), "wrote README");
        }
        None => print!("{}", content),
    }

    Ok(())
}

/// README text, or `None` (logged) when the window has no commits
fn readme_content(settings: &Settings, run: &Run) -> Result<Option<String>> {
    if run.totals.is_empty() {
        info!("{}; nothing to render", StatsError::NoActivity);
        return Ok(None);
    }

    let pet = run.pet(settings)?;
    let status = pet_status(&pet, Mood::of(&run.totals), pet.age(&settings.clock));

    let avatar = match &settings.config.avatar {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(svg) => Some(svg),
            Err(e) => {
                warn!(path = %path.display(), "Failed to read avatar: {}", e);
                None
            }
        },
        None => None,
    };

    let now = bucket_of(settings.clock.now(), &settings.zone);
    Ok(Some(readme(avatar.as_deref(), now, &status)))
}

/// Write a default config
fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["gotchi", "--help"]);
        // --help returns an error (it exits), but shouldn't panic
        assert!(cli.is_err());
    }

    #[test]
    fn test_report_command() {
        let cli = Cli::try_parse_from(["gotchi", "report", "snap.json", "--json"]).unwrap();
        match cli.command {
            Commands::Report { snapshot, json } => {
                assert_eq!(snapshot, "snap.json");
                assert!(json);
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "gotchi",
            "summary",
            "-",
            "--timezone",
            "Asia/Seoul",
            "--days",
            "14",
        ])
        .unwrap();
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Seoul"));
        assert_eq!(cli.days, Some(14));
        assert!(matches!(cli.command, Commands::Summary { .. }));
    }

    #[test]
    fn test_readme_output() {
        let cli =
            Cli::try_parse_from(["gotchi", "readme", "snap.json", "-o", "out/README.md"]).unwrap();
        match cli.command {
            Commands::Readme { output, .. } => {
                assert_eq!(output, Some(PathBuf::from("out/README.md")))
            }
            _ => panic!("Expected Readme command"),
        }
    }

    #[test]
    fn test_settings_apply_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        Config {
            timezone: Some("UTC".to_string()),
            ..Default::default()
        }
        .save(&config_path)
        .unwrap();

        let cli = Cli::try_parse_from([
            "gotchi", "pet", "-", "--name", "Mochi", "--timezone", "Not/AZone",
        ])
        .unwrap();
        let settings = Settings::load(&cli, &config_path).unwrap();

        assert_eq!(settings.config.pet_name, "Mochi");
        assert_eq!(settings.zone, Zone::Local);
        assert_eq!(settings.config.window_days, 7);
    }

    #[test]
    fn test_zero_days_override_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");

        let cli = Cli::try_parse_from(["gotchi", "pet", "-", "--days", "0"]).unwrap();
        assert!(Settings::load(&cli, &config_path).is_err());
    }

    fn settings() -> Settings {
        Settings {
            config: Config::default(),
            zone: Zone::resolve(Some("UTC")).zone,
            clock: SystemClock,
        }
    }

    fn run_of(json: &str, settings: &Settings) -> Run {
        let snapshot = Snapshot::from_json(json).unwrap();
        let activity = snapshot
            .activity(&settings.clock, settings.config.window_days)
            .unwrap();
        let totals = aggregate(&activity.records, &settings.zone, activity.counters);
        Run { snapshot, totals }
    }

    #[test]
    fn test_readme_skipped_without_commits() {
        let settings = settings();
        let run = run_of(
            r#"{"since": "2024-05-01T00:00:00Z", "repositories": [{"issueCount": 3}]}"#,
            &settings,
        );
        assert!(readme_content(&settings, &run).unwrap().is_none());

        let run = run_of(
            r#"{
                "since": "2024-05-01T00:00:00Z",
                "repositories": [{"commits": [{"committedDate": "2024-05-02T08:00:00Z"}]}]
            }"#,
            &settings,
        );
        let content = readme_content(&settings, &run).unwrap().unwrap();
        assert!(content.contains("Gotchi"));
    }

    #[test]
    fn test_readme_reports_unwritable_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let snapshot = dir.path().join("snap.json");
        std::fs::write(
            &snapshot,
            r#"{
                "since": "2024-05-01T00:00:00Z",
                "repositories": [{"commits": [{"committedDate": "2024-05-02T08:00:00Z"}]}]
            }"#,
        )
        .unwrap();

        let output = blocker.join("out").join("README.md");
        let err = cmd_readme(&settings(), snapshot.to_str().unwrap(), Some(&output)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create directory"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        cmd_init(&path, false).unwrap();
        assert!(cmd_init(&path, false).is_err());
        cmd_init(&path, true).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
