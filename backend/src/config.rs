//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Media played by the tutorials when no URI is given.
pub const DEFAULT_URI: &str =
    "https://www.freedesktop.org/software/gstreamer-sdk/data/media/sintel_trailer-480p.webm";

/// Application configuration, one section per TOML table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub tutorial: TutorialConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Comma-separated video effect factories for the rotating variants
    pub effects: String,
    /// Comma-separated audio visualizer factories, one button each
    pub visualizers: String,
    /// Audio source of the visualizer pipeline
    pub source: String,
    /// Video sink at the end of every swap pipeline
    pub sink: String,
    pub width: u32,
    pub height: u32,
    /// Period of the swap timer in the cycling variant
    pub swap_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            effects: hotswap_types::DEFAULT_VIDEO_EFFECTS.to_string(),
            visualizers: hotswap_types::DEFAULT_VISUALIZERS.to_string(),
            source: "audiotestsrc".to_string(),
            sink: "autovideosink".to_string(),
            width: 320,
            height: 240,
            swap_interval_ms: hotswap_types::DEFAULT_SWAP_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialConfig {
    pub uri: String,
    /// videotestsrc pattern, by nick or number
    pub pattern: String,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            pattern: "smpte".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    pub log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    pub log_level: Option<String>,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Extra config file, merged above the discovered ones
    pub config_file: Option<PathBuf>,
    pub effects: Option<String>,
    pub visualizers: Option<String>,
    pub source: Option<String>,
    pub sink: Option<String>,
    pub swap_interval_ms: Option<u64>,
    pub uri: Option<String>,
    pub pattern: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `config.toml` in user config directory (~/.config/hotswap/ on Linux)
    /// 2. `.hotswap.toml` in current directory
    /// 3. the file given with `--config`
    ///
    /// Environment variables use the `HOTSWAP_` prefix and `__` between the
    /// section and the key, e.g. `HOTSWAP_PIPELINE__SINK=fakesink`.
    pub fn from_figment(cli: &CliOverrides) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir().ok().map(|d| d.join(".hotswap.toml"));
        let user_config = directories::ProjectDirs::from("", "", "hotswap")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // 1. Start with defaults
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // 2. Merge config files that exist
        for path in [user_config, local_config].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        if let Some(ref path) = cli.config_file {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        // 3. Merge environment variables (HOTSWAP_* prefix)
        figment = figment.merge(Env::prefixed("HOTSWAP_").split("__"));

        // 4. Merge CLI arguments (highest priority)
        let overrides = [
            ("pipeline.effects", &cli.effects),
            ("pipeline.visualizers", &cli.visualizers),
            ("pipeline.source", &cli.source),
            ("pipeline.sink", &cli.sink),
            ("tutorial.uri", &cli.uri),
            ("tutorial.pattern", &cli.pattern),
            ("logging.log_level", &cli.log_level),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        if let Some(interval) = cli.swap_interval_ms {
            figment = figment.merge(Serialized::default("pipeline.swap_interval_ms", interval));
        }

        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "HOTSWAP_PIPELINE__SINK",
        "HOTSWAP_PIPELINE__SWAP_INTERVAL_MS",
        "HOTSWAP_LOGGING__LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    /// Load the config from inside `dir`, restoring the working directory after.
    fn load_in(dir: &TempDir, cli: &CliOverrides) -> Config {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let config = Config::from_figment(cli);
        // Restore (ignore errors)
        let _ = std::env::set_current_dir(original_dir);
        config.unwrap()
    }

    #[test]
    #[serial]
    fn test_from_figment_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let config = load_in(&temp_dir, &CliOverrides::default());

        assert_eq!(config.pipeline, PipelineConfig::default());
        assert_eq!(config.tutorial.uri, DEFAULT_URI);
        assert!(config.logging.log_file.is_none());
    }

    #[test]
    #[serial]
    fn test_from_figment_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"
[pipeline]
effects = "agingtv,edgetv"
width = 640

[logging]
log_level = "debug"
"#;
        fs::write(temp_dir.path().join(".hotswap.toml"), config_content).unwrap();

        let config = load_in(&temp_dir, &CliOverrides::default());

        assert_eq!(config.pipeline.effects, "agingtv,edgetv");
        assert_eq!(config.pipeline.width, 640);
        // Unset keys keep their defaults
        assert_eq!(config.pipeline.height, 240);
        assert_eq!(config.logging.log_level.as_deref(), Some("debug"));
    }

    #[test]
    #[serial]
    fn test_from_figment_env_vars_override_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".hotswap.toml"),
            "[pipeline]\nsink = \"ximagesink\"\nswap_interval_ms = 250",
        )
        .unwrap();

        std::env::set_var("HOTSWAP_PIPELINE__SINK", "fakesink");
        let config = load_in(&temp_dir, &CliOverrides::default());
        clear_env();

        assert_eq!(config.pipeline.sink, "fakesink");
        assert_eq!(config.pipeline.swap_interval_ms, 250);
    }

    #[test]
    #[serial]
    fn test_from_figment_cli_overrides_env_and_config() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".hotswap.toml"),
            "[pipeline]\nswap_interval_ms = 250",
        )
        .unwrap();
        std::env::set_var("HOTSWAP_PIPELINE__SWAP_INTERVAL_MS", "500");

        let cli = CliOverrides {
            swap_interval_ms: Some(2000),
            effects: Some("identity".to_string()),
            ..Default::default()
        };
        let config = load_in(&temp_dir, &cli);
        clear_env();

        assert_eq!(config.pipeline.swap_interval_ms, 2000);
        assert_eq!(config.pipeline.effects, "identity");
    }

    #[test]
    #[serial]
    fn test_explicit_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("visualizer.toml");
        fs::write(&explicit, "[pipeline]\nsource = \"pulsesrc\"").unwrap();

        let cli = CliOverrides {
            config_file: Some(explicit),
            ..Default::default()
        };
        let config = load_in(&temp_dir, &cli);
        assert_eq!(config.pipeline.source, "pulsesrc");

        let missing = CliOverrides {
            config_file: Some(temp_dir.path().join("missing.toml")),
            ..Default::default()
        };
        assert!(Config::from_figment(&missing).is_err());
    }
}
