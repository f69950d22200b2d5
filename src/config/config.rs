use crate::filter::MismatchPolicy;
use crate::sequence_processor::ObservationLevel;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default)]
    pub mismatch_policy: MismatchPolicy,
    #[serde(default)]
    pub observation_level: ObservationLevel,
    #[serde(default = "default_report_extension")]
    pub report_extension: String,
}

fn default_threads() -> usize {
    1
}

fn default_report_extension() -> String {
    "excluded_reads".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            mismatch_policy: MismatchPolicy::default(),
            observation_level: ObservationLevel::default(),
            report_extension: default_report_extension(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("com", "decodingus", "decodingus-read-filter") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Config::default()
    }

    /// Reads `path`, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "threads = 4\nmismatch_policy = \"clear-group\"").unwrap();

        let config = Config::load_from(file.path());
        assert_eq!(config.threads, 4);
        assert_eq!(config.mismatch_policy, MismatchPolicy::ClearGroup);
        assert_eq!(config.observation_level, ObservationLevel::Base);
        assert_eq!(config.report_extension, "excluded_reads");
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "threads = \"many\"").unwrap();
        assert_eq!(Config::load_from(file.path()), Config::default());
    }

    #[test]
    fn test_missing_config_falls_back() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert_eq!(config, Config::default());
    }
}
