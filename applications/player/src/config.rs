/// Player configuration
use crate::error::{PlayerError, Result};
use lumen_discovery::FileScanner;
use lumen_playback::{SessionConfig, WindowSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "lumen.toml";

const ENV_PREFIX: &str = "LUMEN";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player")]
    pub player: PlayerSettings,

    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_window")]
    pub window: WindowSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Media length reported by the software backend (0 = unknown)
    #[serde(default = "default_simulated_length_secs")]
    pub simulated_length_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_library_root")]
    pub root: PathBuf,

    /// Whether the library may be scanned at startup
    #[serde(default = "default_scan_on_start")]
    pub scan_on_start: bool,

    #[serde(default)]
    pub follow_links: bool,

    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Order the playlist by file name instead of filesystem order
    #[serde(default)]
    pub sort_by_name: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_toolbar_height")]
    pub toolbar_height: u32,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `lumen.toml` in the working
    /// directory is used when present. `LUMEN_`-prefixed variables override
    /// both, with `__` between section and key (`LUMEN_PLAYER__INITIAL_VOLUME`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    pub(crate) fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerError::Config(format!(
                        "Config file not found at {:?}",
                        path
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.initial_volume > 100 {
            return Err(PlayerError::Config(format!(
                "Initial volume must be 0-100, got {}",
                self.player.initial_volume
            )));
        }

        if self.player.poll_interval_ms == 0 {
            return Err(PlayerError::Config(
                "Poll interval must be greater than zero".to_string(),
            ));
        }

        if self.window.toolbar_height >= self.window.height {
            return Err(PlayerError::Config(format!(
                "Toolbar height {} leaves no room in a window {} high",
                self.window.toolbar_height, self.window.height
            )));
        }

        Ok(())
    }

    /// Session settings derived from this configuration
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            app_name: self.player.app_name.clone(),
            initial_volume: self.player.initial_volume,
            toolbar_height: self.window.toolbar_height,
            window: WindowSize {
                width: self.window.width,
                height: self.window.height,
            },
        }
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.player.poll_interval_ms)
    }

    pub fn simulated_length(&self) -> Duration {
        Duration::from_secs(self.player.simulated_length_secs)
    }

    /// Scanner configured from the `[library]` section
    pub fn scanner(&self) -> FileScanner {
        let scanner = FileScanner::new()
            .follow_links(self.library.follow_links)
            .sort_by_name(self.library.sort_by_name);
        match self.library.max_depth {
            Some(depth) => scanner.max_depth(depth),
            None => scanner,
        }
    }
}

// Default values
fn default_player() -> PlayerSettings {
    PlayerSettings {
        app_name: default_app_name(),
        initial_volume: default_initial_volume(),
        poll_interval_ms: default_poll_interval_ms(),
        simulated_length_secs: default_simulated_length_secs(),
    }
}

fn default_app_name() -> String {
    "Lumen".to_string()
}

fn default_initial_volume() -> u8 {
    50
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_simulated_length_secs() -> u64 {
    300
}

fn default_library() -> LibrarySettings {
    LibrarySettings {
        root: default_library_root(),
        scan_on_start: default_scan_on_start(),
        follow_links: false,
        max_depth: None,
        sort_by_name: false,
    }
}

fn default_library_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_scan_on_start() -> bool {
    true
}

fn default_window() -> WindowSettings {
    WindowSettings {
        width: default_width(),
        height: default_height(),
        toolbar_height: default_toolbar_height(),
    }
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

fn default_toolbar_height() -> u32 {
    40
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            library: default_library(),
            window: default_window(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Prefix nobody sets, so the process environment cannot leak in
    const QUIET_PREFIX: &str = "LUMEN_CONFIG_TEST_UNSET";

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.player.app_name, "Lumen");
        assert_eq!(config.player.initial_volume, 50);
        assert_eq!(config.poll_period(), Duration::from_secs(1));
        assert!(config.library.scan_on_start);
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.window.height, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lumen.toml");
        fs::write(
            &path,
            r#"
[player]
initial_volume = 80

[library]
root = "/srv/videos"
scan_on_start = false
max_depth = 3
sort_by_name = true
"#,
        )
        .unwrap();

        let config = PlayerConfig::load_with_prefix(Some(&path), QUIET_PREFIX).unwrap();
        assert_eq!(config.player.initial_volume, 80);
        assert_eq!(config.player.app_name, "Lumen");
        assert_eq!(config.library.root, PathBuf::from("/srv/videos"));
        assert!(!config.library.scan_on_start);
        assert_eq!(config.library.max_depth, Some(3));
        assert!(config.library.sort_by_name);
        assert_eq!(config.window.toolbar_height, 40);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");

        let err = PlayerConfig::load_with_prefix(Some(&path), QUIET_PREFIX).unwrap_err();
        assert!(matches!(err, PlayerError::Config(_)));
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lumen.toml");
        fs::write(&path, "[player]\napp_name = \"FromFile\"\n").unwrap();

        std::env::set_var("LUMEN_ENV_TEST_PLAYER__APP_NAME", "FromEnv");
        std::env::set_var("LUMEN_ENV_TEST_WINDOW__HEIGHT", "720");
        let config = PlayerConfig::load_with_prefix(Some(&path), "LUMEN_ENV_TEST").unwrap();
        std::env::remove_var("LUMEN_ENV_TEST_PLAYER__APP_NAME");
        std::env::remove_var("LUMEN_ENV_TEST_WINDOW__HEIGHT");

        assert_eq!(config.player.app_name, "FromEnv");
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PlayerConfig::default();
        config.player.initial_volume = 101;
        assert!(config.validate().is_err());

        let mut config = PlayerConfig::default();
        config.player.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = PlayerConfig::default();
        config.window.toolbar_height = config.window.height;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scanner_follows_library_settings() {
        let temp = TempDir::new().unwrap();
        for name in ["c.mp4", "a.mkv", "b.avi"] {
            fs::write(temp.path().join(name), b"fake").unwrap();
        }
        let nested = temp.path().join("deeper");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("0.mov"), b"fake").unwrap();

        let mut config = PlayerConfig::default();
        config.library.sort_by_name = true;
        config.library.max_depth = Some(1);

        let files = config.scanner().scan_directory(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.mkv", "b.avi", "c.mp4"]);
    }

    #[test]
    fn test_session_config() {
        let mut config = PlayerConfig::default();
        config.player.app_name = "Cinema".to_string();
        config.window.width = 1280;
        config.window.height = 720;

        let session = config.session_config();
        assert_eq!(session.app_name, "Cinema");
        assert_eq!(session.initial_volume, 50);
        assert_eq!(session.toolbar_height, 40);
        assert_eq!(session.window, WindowSize { width: 1280, height: 720 });
    }
}
