use crate::consts;
use crate::game::{Boundary, Preset, Rules, SelfCollision, StartRow, TurnPolicy};
use ratatui::style::Style;
use serde::Deserialize;
use std::num::{NonZeroU16, NonZeroU32};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// The set of rules to start from
    pub(crate) preset: Preset,

    /// Number of moves the snake makes per second
    pub(crate) fps: Option<NonZeroU32>,

    /// File to which to write log messages.  No logs are written if this is
    /// not set.
    pub(crate) log_file: Option<PathBuf>,

    pub(crate) grid: GridConfig,

    /// Individual rules that override those of the preset
    pub(crate) rules: RulesConfig,

    pub(crate) sound: SoundConfig,

    pub(crate) theme: ThemeConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Resolve the configuration into the settings used by the game.  If
    /// `preset` is given, it replaces the preset from the file; rule
    /// overrides from the file still apply on top of it.
    pub(crate) fn settings(&self, preset: Option<Preset>) -> Settings {
        let preset = preset.unwrap_or(self.preset);
        Settings {
            preset,
            rules: self.rules.apply(preset.rules()),
            fps: self.fps.unwrap_or(consts::DEFAULT_FPS),
            cell_size: self.grid.cell_size.get(),
            columns: self.grid.columns.map(NonZeroU16::get),
            rows: self.grid.rows.map(NonZeroU16::get),
            sound: self.sound.enabled,
            snake_style: self
                .theme
                .snake
                .clone()
                .map_or(consts::SNAKE_STYLE, Style::from),
            apple_style: self
                .theme
                .apple
                .clone()
                .map_or(consts::APPLE_STYLE, Style::from),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GridConfig {
    /// Side length of a cell of the playing field
    pub(crate) cell_size: NonZeroU32,

    /// Width of the playing field in cells.  If unset, the field fills the
    /// width of the terminal and follows it when it is resized.
    pub(crate) columns: Option<NonZeroU16>,

    /// Height of the playing field in cells.  If unset, the field fills the
    /// height of the terminal and follows it when it is resized.
    pub(crate) rows: Option<NonZeroU16>,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            cell_size: NonZeroU32::new(consts::DEFAULT_CELL_SIZE).unwrap_or(NonZeroU32::MIN),
            columns: None,
            rows: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct RulesConfig {
    pub(crate) boundary: Option<Boundary>,
    pub(crate) self_collision: Option<SelfCollision>,
    pub(crate) safe_zone: Option<usize>,
    pub(crate) growth: Option<NonZeroU32>,
    pub(crate) reward: Option<NonZeroU32>,
    pub(crate) apple_margin: Option<bool>,
    pub(crate) reposition_stale_apple: Option<bool>,
    pub(crate) initial_length: Option<NonZeroU32>,
    pub(crate) start_row: Option<StartRow>,
    pub(crate) turns: Option<TurnPolicy>,
    pub(crate) turn_while_paused: Option<bool>,
}

impl RulesConfig {
    /// Return `rules` with every rule set in `self` replaced
    pub(crate) fn apply(&self, rules: Rules) -> Rules {
        Rules {
            boundary: self.boundary.unwrap_or(rules.boundary),
            self_collision: self.self_collision.unwrap_or(rules.self_collision),
            safe_zone: self.safe_zone.unwrap_or(rules.safe_zone),
            growth: self.growth.unwrap_or(rules.growth),
            reward: self.reward.unwrap_or(rules.reward),
            apple_margin: self.apple_margin.unwrap_or(rules.apple_margin),
            reposition_stale_apple: self
                .reposition_stale_apple
                .unwrap_or(rules.reposition_stale_apple),
            initial_length: self.initial_length.unwrap_or(rules.initial_length),
            start_row: self.start_row.unwrap_or(rules.start_row),
            turns: self.turns.unwrap_or(rules.turns),
            turn_while_paused: self.turn_while_paused.unwrap_or(rules.turn_while_paused),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct SoundConfig {
    /// Ring the terminal bell when the snake eats or dies
    pub(crate) enabled: bool,
}

impl Default for SoundConfig {
    fn default() -> SoundConfig {
        SoundConfig { enabled: true }
    }
}

/// Styles for the pieces of the game, given as style strings like `"bold
/// green"` or `"#ff8800 on black"`
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct ThemeConfig {
    pub(crate) snake: Option<parse_style::Style>,
    pub(crate) apple: Option<parse_style::Style>,
}

/// Everything the game needs to know from the configuration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) preset: Preset,
    pub(crate) rules: Rules,
    pub(crate) fps: NonZeroU32,
    pub(crate) cell_size: u32,
    pub(crate) columns: Option<u16>,
    pub(crate) rows: Option<u16>,
    pub(crate) sound: bool,
    pub(crate) snake_style: Style,
    pub(crate) apple_style: Style,
}

impl Default for Settings {
    fn default() -> Settings {
        Config::default().settings(None)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(src: &str) -> Result<Config, ConfigError> {
        let mut tmpfile = NamedTempFile::new().unwrap();
        tmpfile.write_all(src.as_bytes()).unwrap();
        tmpfile.flush().unwrap();
        Config::load(tmpfile.path(), false)
    }

    #[test]
    fn empty_file() {
        let cfg = load_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.settings(None), Settings::default());
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.preset, Preset::Arcade);
        assert_eq!(settings.rules, Rules::ARCADE);
        assert_eq!(settings.fps, consts::DEFAULT_FPS);
        assert_eq!(settings.cell_size, 25);
        assert_eq!(settings.columns, None);
        assert_eq!(settings.rows, None);
        assert!(settings.sound);
        assert_eq!(settings.snake_style, consts::SNAKE_STYLE);
        assert_eq!(settings.apple_style, consts::APPLE_STYLE);
    }

    #[test]
    fn missing_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn full_file() {
        let cfg = load_str(concat!(
            "preset = \"classic\"\n",
            "fps = 20\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
            "\n",
            "[grid]\n",
            "cell-size = 10\n",
            "columns = 40\n",
            "rows = 16\n",
            "\n",
            "[rules]\n",
            "boundary = \"lethal\"\n",
            "self-collision = \"die\"\n",
            "safe-zone = 2\n",
            "growth = 3\n",
            "turns = \"first-per-tick\"\n",
            "\n",
            "[sound]\n",
            "enabled = false\n",
        ))
        .unwrap();
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/gridsnake.log")));
        let settings = cfg.settings(None);
        assert_eq!(settings.preset, Preset::Classic);
        assert_eq!(settings.fps.get(), 20);
        assert_eq!(settings.cell_size, 10);
        assert_eq!(settings.columns, Some(40));
        assert_eq!(settings.rows, Some(16));
        assert!(!settings.sound);
        assert_eq!(
            settings.rules,
            Rules {
                boundary: Boundary::Lethal,
                self_collision: SelfCollision::Die,
                safe_zone: 2,
                growth: NonZeroU32::new(3).unwrap(),
                turns: TurnPolicy::FirstPerTick,
                ..Rules::CLASSIC
            }
        );
    }

    #[test]
    fn preset_override_keeps_rule_overrides() {
        let cfg = load_str("preset = \"arcade\"\n[rules]\nreward = 5\n").unwrap();
        let settings = cfg.settings(Some(Preset::Classic));
        assert_eq!(settings.preset, Preset::Classic);
        assert_eq!(
            settings.rules,
            Rules {
                reward: NonZeroU32::new(5).unwrap(),
                ..Rules::CLASSIC
            }
        );
    }

    #[test]
    fn theme() {
        let cfg = load_str("[theme]\nsnake = \"blue\"\n").unwrap();
        let settings = cfg.settings(None);
        assert_eq!(
            settings.snake_style,
            Style::new().fg(ratatui::style::Color::Blue)
        );
        assert_eq!(settings.apple_style, consts::APPLE_STYLE);
    }

    #[test]
    fn zero_fps() {
        assert!(matches!(load_str("fps = 0\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_growth() {
        assert!(matches!(
            load_str("[rules]\ngrowth = 0\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_preset() {
        assert!(matches!(
            load_str("preset = \"modern\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_syntax() {
        assert!(matches!(load_str("fps = \n"), Err(ConfigError::Parse(_))));
    }
}
