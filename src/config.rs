use chessbot_core::engine::SearchConfig;
use chessbot_core::logic::board::Color;
use chessbot_core::SearchError;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SEARCH_SLOTS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
    #[error("could not read engine config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("engine config: {0}")]
    Search(#[from] SearchError),
}

/// Which side the engine takes in a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSide {
    Fixed(Color),
    /// Drawn per session.
    Random,
}

impl EngineSide {
    pub fn pick(self) -> Color {
        match self {
            Self::Fixed(color) => color,
            Self::Random => {
                if rand::random() {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

impl FromStr for EngineSide {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("random") {
            Ok(Self::Random)
        } else {
            s.parse::<Color>().map(Self::Fixed).map_err(|_| ())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Searches allowed to run at the same time across all sessions.
    pub search_slots: usize,
    pub engine_side: EngineSide,
    pub search: SearchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            search_slots: DEFAULT_SEARCH_SLOTS,
            engine_side: EngineSide::Fixed(Color::Black),
            search: SearchConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `PORT`, `CHESSBOT_SEARCH_SLOTS`,
    /// `CHESSBOT_ENGINE_COLOR` and the JSON file named by
    /// `CHESSBOT_ENGINE_CONFIG`. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            config.port = parse_var("PORT", value)?;
        }
        if let Some(value) = lookup("CHESSBOT_SEARCH_SLOTS") {
            config.search_slots = parse_var("CHESSBOT_SEARCH_SLOTS", value)?;
            if config.search_slots == 0 {
                return Err(ConfigError::InvalidVar {
                    name: "CHESSBOT_SEARCH_SLOTS",
                    value: "0".to_string(),
                });
            }
        }
        if let Some(value) = lookup("CHESSBOT_ENGINE_COLOR") {
            config.engine_side = parse_var("CHESSBOT_ENGINE_COLOR", value)?;
        }
        if let Some(path) = lookup("CHESSBOT_ENGINE_CONFIG") {
            let json = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path, source })?;
            config.search = SearchConfig::load_from_json(&json)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar { name, value })
}
