use serde::{Deserialize, Serialize};

use crate::domain::RoundId;
use crate::engine::{RoundState, Session};

use super::dto::BalanceDto;
use super::errors::ApiError;
use super::resolve_handle;

/// Запросы "только чтение".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Баланс и активный раунд.
    Balance,

    /// Состояние раунда по ID.
    RoundState { round_id: RoundId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Balance(BalanceDto),
    RoundState(RoundState),
}

/// Запросы не меняют сессию, поэтому берут `&Session`.
pub fn handle_query(session: &Session, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::Balance => Ok(QueryResponse::Balance(BalanceDto::from_session(session))),
        Query::RoundState { round_id } => {
            let handle = resolve_handle(session, round_id)?;
            Ok(QueryResponse::RoundState(session.round_state(handle)?))
        }
    }
}

pub fn handle_query_json(session: &Session, raw: &str) -> Result<String, ApiError> {
    let query: Query = serde_json::from_str(raw)?;
    let response = handle_query(session, query)?;
    serde_json::to_string(&response).map_err(|err| ApiError::Internal(err.to_string()))
}
