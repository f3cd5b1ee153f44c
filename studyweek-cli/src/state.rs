use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `$STUDYWEEK_HOME`, or `~/.studyweek`.
pub fn studyweek_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STUDYWEEK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".studyweek"))
}

pub fn ensure_studyweek_home() -> Result<PathBuf> {
    let dir = studyweek_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(studyweek_home()?.join("data"))
}

/// Expand a leading `~/` against `$HOME`.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var("HOME").context("HOME is not set")?;
            Ok(PathBuf::from(home).join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
