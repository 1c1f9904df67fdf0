//! Внешний API лобби.
//!
//! Здесь описываются:
//! - команды (commands.rs): ставка, ход, расчёт;
//! - запросы (queries.rs): только чтение;
//! - DTO (dto.rs): ответы для фронта;
//! - ошибки (errors.rs): то, что видит клиент.
//!
//! Всё сериализуется через serde, JSON-обёртки есть у обеих точек входа.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;

use crate::domain::RoundId;
use crate::engine::{RoundHandle, Session};

/// Найти хэндл активного раунда по ID, пришедшему с фронта.
pub(crate) fn resolve_handle(session: &Session, round_id: RoundId) -> Result<RoundHandle, ApiError> {
    match session.active_round() {
        Some(handle) if handle.round_id == round_id => Ok(handle),
        _ => Err(ApiError::RoundNotFound(round_id)),
    }
}
