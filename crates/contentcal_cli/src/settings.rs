//! Effective runtime settings: config file merged with command-line flags.

use anyhow::{Context, Result};
use contentcal_core::config::CONFIG_FILE_NAME;
use contentcal_core::{default_log_level, AppConfig};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "contentcal.sqlite3";
const LOG_DIR_NAME: &str = "logs";

pub struct Settings {
    pub config: AppConfig,
    /// Absolute; created on resolve.
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Settings {
    /// Flags win over the config file, which wins over platform defaults.
    pub fn resolve(
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "contentcal", "contentcal");

        let config_path = config_path
            .map(Path::to_path_buf)
            .or_else(|| dirs.as_ref().map(|d| d.config_dir().join(CONFIG_FILE_NAME)));
        let config = match config_path {
            Some(path) => AppConfig::load(&path)?,
            None => AppConfig::default(),
        };

        let data_dir = data_dir
            .or_else(|| config.data_dir.clone())
            .or_else(|| dirs.as_ref().map(|d| d.data_dir().to_path_buf()))
            .context("could not determine a data directory; pass --data-dir")?;
        let data_dir = absolutize(data_dir)?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("could not create {}", data_dir.display()))?;

        let log_level = log_level
            .or_else(|| config.log_level.clone())
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            config,
            data_dir,
            log_level,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("could not read the working directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use contentcal_core::WeekStart;
    use std::fs;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let file_data_dir = dir.path().join("from-file");
        fs::write(
            &config_path,
            format!(
                "data_dir = {:?}\nweek_start = \"monday\"\nlog_level = \"warn\"\n",
                file_data_dir.display().to_string()
            ),
        )
        .unwrap();

        let from_file = Settings::resolve(Some(&config_path), None, None).unwrap();
        assert_eq!(from_file.data_dir, file_data_dir);
        assert_eq!(from_file.log_level, "warn");
        assert_eq!(from_file.config.week_start, WeekStart::Monday);
        assert!(file_data_dir.is_dir());

        let flag_dir = dir.path().join("from-flag");
        let from_flags = Settings::resolve(
            Some(&config_path),
            Some(flag_dir.clone()),
            Some("error".to_string()),
        )
        .unwrap();
        assert_eq!(from_flags.data_dir, flag_dir);
        assert_eq!(from_flags.log_level, "error");
        assert_eq!(from_flags.db_path(), flag_dir.join("contentcal.sqlite3"));
        assert_eq!(from_flags.log_dir(), flag_dir.join("logs"));
    }
}
