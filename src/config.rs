use crate::consts;
use crate::util::Bounds;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay parameters
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) logging: LogConfig,
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
}

/// The tunable parameters of a game session.  Fixed at startup.
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    pub(crate) board_width: u16,
    pub(crate) board_height: u16,
    pub(crate) cell_size: u16,

    /// Snake speed, in ticks per second, at the start of a game
    pub(crate) base_speed: u32,

    pub(crate) acceleration_enabled: bool,
    pub(crate) acceleration_factor: u32,

    /// Raise the base speed by one each time this many food items have been
    /// eaten.  Zero means never.
    pub(crate) acceleration_food_threshold: u32,

    /// Acceleration applies once the heading key has been held for more
    /// than this many consecutive ticks
    pub(crate) acceleration_hold_ticks: u32,

    pub(crate) game_over_on_edge: bool,
    pub(crate) starting_length: usize,
}

impl GameConfig {
    pub(crate) fn bounds(&self) -> Bounds {
        Bounds {
            width: self.board_width,
            height: self.board_height,
            cell: self.cell_size,
            wrap: !self.game_over_on_edge,
        }
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            board_width: consts::BOARD_WIDTH,
            board_height: consts::BOARD_HEIGHT,
            cell_size: consts::CELL_SIZE,
            base_speed: consts::BASE_SPEED,
            acceleration_enabled: consts::ACCELERATION_ENABLED,
            acceleration_factor: consts::ACCELERATION_FACTOR,
            acceleration_food_threshold: consts::ACCELERATION_FOOD_THRESHOLD,
            acceleration_hold_ticks: consts::ACCELERATION_HOLD_TICKS,
            game_over_on_edge: consts::GAME_OVER_ON_EDGE,
            starting_length: consts::STARTING_LENGTH,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    board_width: u16,
    board_height: u16,
    cell_size: u16,
    base_speed: u32,
    acceleration_enabled: bool,
    acceleration_factor: u32,
    acceleration_food_threshold: u32,
    acceleration_hold_ticks: u32,
    game_over_on_edge: bool,
    starting_length: usize,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        let GameConfig {
            board_width,
            board_height,
            cell_size,
            base_speed,
            acceleration_enabled,
            acceleration_factor,
            acceleration_food_threshold,
            acceleration_hold_ticks,
            game_over_on_edge,
            starting_length,
        } = GameConfig::default();
        RawGameConfig {
            board_width,
            board_height,
            cell_size,
            base_speed,
            acceleration_enabled,
            acceleration_factor,
            acceleration_food_threshold,
            acceleration_hold_ticks,
            game_over_on_edge,
            starting_length,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = InvalidConfig;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, InvalidConfig> {
        let cell_size = value.cell_size;
        if cell_size == 0 {
            return Err(InvalidConfig::ZeroCellSize);
        }
        for (dimension, extent) in [
            ("board-width", value.board_width),
            ("board-height", value.board_height),
        ] {
            if extent == 0 || extent % cell_size != 0 {
                return Err(InvalidConfig::Misaligned {
                    dimension,
                    extent,
                    cell_size,
                });
            }
        }
        let columns = value.board_width / cell_size;
        let rows = value.board_height / cell_size;
        if columns > consts::MAX_GRID_SIZE.width || rows > consts::MAX_GRID_SIZE.height {
            return Err(InvalidConfig::TooLarge { columns, rows });
        }
        if u32::from(columns) * u32::from(rows) < 2 {
            return Err(InvalidConfig::TooSmall);
        }
        if value.base_speed == 0 {
            return Err(InvalidConfig::ZeroSpeed);
        }
        if value.acceleration_factor == 0 {
            return Err(InvalidConfig::ZeroFactor);
        }
        if value.starting_length == 0 {
            return Err(InvalidConfig::ZeroLength);
        }
        Ok(GameConfig {
            board_width: value.board_width,
            board_height: value.board_height,
            cell_size,
            base_speed: value.base_speed,
            acceleration_enabled: value.acceleration_enabled,
            acceleration_factor: value.acceleration_factor,
            acceleration_food_threshold: value.acceleration_food_threshold,
            acceleration_hold_ticks: value.acceleration_hold_ticks,
            game_over_on_edge: value.game_over_on_edge,
            starting_length: value.starting_length,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// File to append log messages to.  Nothing is logged if this is unset,
    /// as the terminal is taken up by the game.
    pub(crate) file: Option<PathBuf>,

    /// Default log filter directive, used when `RUST_LOG` is not set
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: String::from("info"),
        }
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

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidConfig {
    #[error("cell-size must be positive")]
    ZeroCellSize,
    #[error("{dimension} ({extent}) is not a positive multiple of cell-size ({cell_size})")]
    Misaligned {
        dimension: &'static str,
        extent: u16,
        cell_size: u16,
    },
    #[error(
        "a board of {columns}x{rows} cells does not fit on the screen (at most {}x{} cells)",
        consts::MAX_GRID_SIZE.width,
        consts::MAX_GRID_SIZE.height
    )]
    TooLarge { columns: u16, rows: u16 },
    #[error("the board must have at least two cells")]
    TooSmall,
    #[error("base-speed must be at least 1")]
    ZeroSpeed,
    #[error("acceleration-factor must be at least 1")]
    ZeroFactor,
    #[error("starting-length must be at least 1")]
    ZeroLength,
}
