use serde::{Deserialize, Serialize};

use crate::domain::RoundId;
use crate::engine::{ActionError, GameError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Раунд с таким ID не активен.
    RoundNotFound(RoundId),

    /// Не хватает токенов на ставку.
    InsufficientFunds(String),

    /// Ставка или выбор не прошли проверку.
    InvalidChoice(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match &err {
            GameError::InsufficientFunds { .. } => ApiError::InsufficientFunds(err.to_string()),
            GameError::InvalidChoice(_) => ApiError::InvalidChoice(err.to_string()),
            GameError::InvalidAction(ActionError::UnknownRound(id)) => ApiError::RoundNotFound(*id),
            GameError::InvalidAction(_) => ApiError::InvalidCommand(err.to_string()),
            GameError::DeckExhausted | GameError::BalanceOverflow { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
