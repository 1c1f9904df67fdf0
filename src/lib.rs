//! Ядро казино-лобби: один баланс токенов на семь мини-игр.
//!
//! Слои:
//!   - `domain` – карты, колода, токены, руки;
//!   - `eval`   – оценка 5-карточных покерных рук;
//!   - `engine` – валидация ставок, резолверы игр, сессия с балансом;
//!   - `infra`  – реализации RNG, генерация ID, конфиг;
//!   - `api`    – команды/запросы/DTO для слоя отрисовки.
//!
//! Отрисовка, анимации и задержки живут снаружи: резолвер
//! синхронно возвращает полный исход, фронт его только проигрывает.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Card, Deck, GameKind, Rank, Suit, Tokens};
pub use engine::{
    GameChoice, GameError, Outcome, RandomSource, Resolution, RoundAction, RoundHandle,
    RoundState, Session, Verdict, Wager,
};
pub use infra::{DeterministicRng, LobbyConfig, ScriptedRng, SystemRng};
