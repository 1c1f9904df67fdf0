use crate::domain::Tokens;
use crate::engine::errors::{ChoiceError, GameError};

/// Общая проверка ставки для всех игр: `0 < stake <= balance`.
///
/// Вызывается до любого обращения к RNG и до списания.
pub fn validate_wager(balance: Tokens, stake: Tokens) -> Result<(), GameError> {
    if stake.is_zero() {
        return Err(ChoiceError::ZeroStake.into());
    }
    if stake > balance {
        return Err(GameError::InsufficientFunds { stake, balance });
    }
    Ok(())
}

/// Нижний предел ставки из конфига лобби.
pub fn check_minimum(stake: Tokens, min: Tokens) -> Result<(), GameError> {
    if stake < min {
        return Err(ChoiceError::BelowMinimum { stake, min }.into());
    }
    Ok(())
}
