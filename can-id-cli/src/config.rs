//! Configuration loading and parsing

use anyhow::{Context, Result};
use can_id_scanner::{ScanConfig, SortKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
///
/// Every section is optional; command-line values take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    /// DBC files loaded before those given on the command line
    #[serde(default)]
    pub dbc_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    pub sort: Option<SortKey>,
    /// Directory for automatically named CSV files
    pub csv_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Configured DBC files followed by the command-line ones
    pub fn dbc_files(&self, extra: &[PathBuf]) -> Vec<PathBuf> {
        self.input
            .dbc_files
            .iter()
            .chain(extra)
            .cloned()
            .collect()
    }

    /// Scan settings with the command-line exclusions applied
    pub fn scan_config(&self, no_error_frames: bool, no_remote_frames: bool) -> ScanConfig {
        let mut config = self.scan.clone();
        if no_error_frames {
            config.include_error_frames = false;
        }
        if no_remote_frames {
            config.include_remote_frames = false;
        }
        config
    }

    /// Sort order from the command line, else the file, else by id
    pub fn sort_key(&self, cli: Option<SortKey>) -> SortKey {
        cli.or(self.output.sort).unwrap_or_default()
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            dbc_files = ["j1939.dbc"]

            [scan]
            include_error_frames = false

            [output]
            sort = "name"
            csv_dir = "reports"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.dbc_files, vec![PathBuf::from("j1939.dbc")]);
        assert!(!config.scan.include_error_frames);
        assert!(config.scan.include_remote_frames);
        assert_eq!(config.output.sort, Some(SortKey::Name));
        assert_eq!(config.output.csv_dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn test_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scan, ScanConfig::default());
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        let toml_content = "[output]\nsort = \"time\"\n";
        let result: std::result::Result<AppConfig, _> = toml::from_str(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_line_wins() {
        let config = AppConfig {
            input: InputConfig {
                dbc_files: vec![PathBuf::from("base.dbc")],
            },
            output: OutputConfig {
                sort: Some(SortKey::Name),
                csv_dir: None,
            },
            ..AppConfig::default()
        };

        assert_eq!(config.sort_key(Some(SortKey::Id)), SortKey::Id);
        assert_eq!(config.sort_key(None), SortKey::Name);
        assert_eq!(AppConfig::default().sort_key(None), SortKey::Id);

        assert_eq!(
            config.dbc_files(&[PathBuf::from("extra.dbc")]),
            vec![PathBuf::from("base.dbc"), PathBuf::from("extra.dbc")]
        );

        let scan = config.scan_config(true, false);
        assert!(!scan.include_error_frames);
        assert!(scan.include_remote_frames);
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nsort = \"id\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output.sort, Some(SortKey::Id));
    }

    #[test]
    fn test_load_missing_config() {
        assert!(load_config(Path::new("does/not/exist.toml")).is_err());
    }
}
