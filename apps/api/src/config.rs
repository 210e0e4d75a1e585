use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub skills_file: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub skill_match_threshold: u8,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let skill_match_threshold = env_or("SKILL_MATCH_THRESHOLD", "80")
            .parse::<u8>()
            .context("SKILL_MATCH_THRESHOLD must be an integer between 0 and 100")?;
        ensure!(
            skill_match_threshold <= 100,
            "SKILL_MATCH_THRESHOLD must be between 0 and 100, got {skill_match_threshold}"
        );

        Ok(Config {
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            skills_file: env_or("SKILLS_FILE", "skills_master.json"),
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            skill_match_threshold,
        })
    }

    /// Location of the skills vocabulary file.
    pub fn skills_path(&self) -> PathBuf {
        self.data_dir.join(&self.skills_file)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration for in-process tests; never touches the environment.
    pub fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            skills_file: "skills_master.json".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            max_upload_bytes: 1024 * 1024,
            skill_match_threshold: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_path_joins_data_dir_and_file() {
        let config = Config::for_tests("/srv/data");
        assert_eq!(
            config.skills_path(),
            PathBuf::from("/srv/data/skills_master.json")
        );
    }
}
