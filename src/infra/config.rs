//! Конфиг лобби (TOML).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Tokens;
use crate::engine::roulette::DEFAULT_MAX_BETS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать конфиг {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("битый TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("некорректное значение {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Параметры лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LobbyConfig {
    /// Баланс новой сессии.
    pub starting_balance: Tokens,
    /// Ставка, которую фронт подставляет по умолчанию.
    pub default_stake: Tokens,
    pub min_stake: Tokens,
    /// Лимит ставок в одном слипе рулетки.
    pub max_roulette_bets: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            starting_balance: Tokens(3000),
            default_stake: Tokens(100),
            min_stake: Tokens(1),
            max_roulette_bets: DEFAULT_MAX_BETS,
        }
    }
}

impl LobbyConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: LobbyConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_stake.is_zero() {
            return Err(ConfigError::Invalid {
                field: "min_stake",
                reason: "должна быть не меньше 1",
            });
        }
        if self.max_roulette_bets == 0 {
            return Err(ConfigError::Invalid {
                field: "max_roulette_bets",
                reason: "нужна хотя бы одна ставка",
            });
        }
        if self.default_stake < self.min_stake {
            return Err(ConfigError::Invalid {
                field: "default_stake",
                reason: "меньше min_stake",
            });
        }
        Ok(())
    }
}
