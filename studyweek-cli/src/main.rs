use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studyweek_core::time::{parse_local_datetime, utc_to_local};
use studyweek_core::{
    DateRange, ScheduleItem, aggregate_week, calendar_feed, expand_all, select_upcoming,
};
use studyweek_ingest::NormalizeOptions;
use tracing_subscriber::EnvFilter;

mod config;
mod loader;
mod render;
mod state;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("STUDYWEEK_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "studyweek",
    version = VERSION,
    about = "Weekly overview of classes, assignments and exams"
)]
struct Cli {
    /// Directory holding assignments.json, exams.json and schedules.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default ~/.studyweek/config.toml
    InitConfig,

    /// Per-weekday counts of classes, tasks and exams for the current week
    Week {
        /// Reference time instead of now (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        now: Option<String>,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// What's next: items that have not started or are still recurring
    Upcoming {
        /// Reference time instead of now (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        now: Option<String>,

        /// Max items (default from config.calendar.upcoming_limit)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Every occurrence in [from, to)
    Calendar {
        /// Start of the range, inclusive
        #[arg(long)]
        from: String,

        /// End of the range, exclusive
        #[arg(long)]
        to: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Calendar feed: recurrence rules and single events as JSON
    Feed,
}

struct Session {
    tz: Tz,
    items: Vec<ScheduleItem>,
    upcoming_limit: usize,
}

impl Session {
    async fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let cfg = config::load_config()?;
        let tz = cfg.timezone()?;
        let dir = cfg.data_dir(data_dir)?;

        let mut options = NormalizeOptions::new(tz);
        if let Some(user_id) = cfg.data.user_id.clone() {
            options = options.for_user(user_id);
        }

        let items = loader::load_items(&dir, &options)
            .await
            .with_context(|| format!("loading records from {}", dir.display()))?;

        Ok(Self {
            tz,
            items,
            upcoming_limit: cfg.calendar.upcoming_limit,
        })
    }

    fn now(&self, arg: Option<&str>) -> Result<NaiveDateTime> {
        match arg {
            Some(s) => parse_local_datetime(s),
            None => Ok(utc_to_local(Utc::now(), self.tz)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::InitConfig => {
            config::init_config()?;
        }

        Command::Week { now, json } => {
            let session = Session::load(cli.data_dir).await?;
            let now = session.now(now.as_deref())?;
            let summary = aggregate_week(&session.items, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::week_table(&summary));
            }
        }

        Command::Upcoming { now, limit, json } => {
            let session = Session::load(cli.data_dir).await?;
            let now = session.now(now.as_deref())?;
            let limit = limit.unwrap_or(session.upcoming_limit);
            let upcoming = select_upcoming(&session.items, now, limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&upcoming)?);
            } else {
                print!("{}", render::upcoming_list(&upcoming));
            }
        }

        Command::Calendar { from, to, json } => {
            let from = parse_local_datetime(&from).context("--from")?;
            let to = parse_local_datetime(&to).context("--to")?;
            if to <= from {
                bail!("--to ({to}) must be after --from ({from})");
            }

            let session = Session::load(cli.data_dir).await?;
            let occurrences = expand_all(&session.items, &DateRange::new(from, to));

            if json {
                println!("{}", serde_json::to_string_pretty(&occurrences)?);
            } else {
                print!("{}", render::occurrence_list(&occurrences));
            }
        }

        Command::Feed => {
            let session = Session::load(cli.data_dir).await?;
            println!("{}", serde_json::to_string_pretty(&calendar_feed(&session.items))?);
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays clean. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
