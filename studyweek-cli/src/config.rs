use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use studyweek_core::DEFAULT_UPCOMING_LIMIT;
use studyweek_core::time::parse_timezone;

use crate::state::{default_data_dir, ensure_studyweek_home, expand_home, studyweek_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSection {
    /// IANA zone stored timestamps are shown in.
    pub timezone: String,
    /// How many entries `upcoming` lists by default.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSection {
    /// Directory holding assignments.json, exams.json and schedules.json.
    pub dir: Option<PathBuf>,
    /// Only records owned by this user are loaded.
    pub user_id: Option<String>,
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.calendar.timezone).context("config.toml [calendar].timezone")
    }

    /// `override_dir` (from the command line) wins over the configured one.
    pub fn data_dir(&self, override_dir: Option<PathBuf>) -> Result<PathBuf> {
        match override_dir.or_else(|| self.data.dir.clone()) {
            Some(dir) => expand_home(&dir),
            None => default_data_dir(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(studyweek_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_studyweek_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
