use serde::{Deserialize, Serialize};

use crate::domain::{GameKind, RoundId, Tokens};
use crate::engine::{Resolution, RoundHandle, RoundState, Session, Verdict};

/// Баланс и активный раунд (для шапки лобби).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceDto {
    pub balance: Tokens,
    pub active_round: Option<RoundHandle>,
}

impl BalanceDto {
    pub fn from_session(session: &Session) -> Self {
        Self {
            balance: session.balance(),
            active_round: session.active_round(),
        }
    }
}

/// Короткая сводка расчёта: то, что фронт показывает в тосте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementDto {
    pub round_id: RoundId,
    pub game: GameKind,
    pub verdict: Verdict,
    pub payout_delta: i64,
    pub new_balance: Tokens,
    /// Полный исход раунда.
    pub resolution: Resolution,
}

impl From<Resolution> for SettlementDto {
    fn from(resolution: Resolution) -> Self {
        Self {
            round_id: resolution.round_id,
            game: resolution.game,
            verdict: resolution.verdict,
            payout_delta: resolution.payout_delta,
            new_balance: resolution.new_balance,
            resolution,
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Ставка принята, токены списаны.
    WagerPlaced {
        balance: Tokens,
        state: RoundState,
    },

    /// Ход сделан, вернуть новое состояние раунда.
    RoundAdvanced(RoundState),

    /// Раунд рассчитан.
    Settled(SettlementDto),
}
