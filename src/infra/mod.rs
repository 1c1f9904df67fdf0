//! Инфраструктурный слой вокруг движка:
//! - генерация ID раундов;
//! - RNG-реализации для движка;
//! - конфиг лобби.

pub mod config;
pub mod ids;
pub mod rng;

pub use config::{ConfigError, LobbyConfig};
pub use ids::RoundIdGenerator;
pub use rng::*;
