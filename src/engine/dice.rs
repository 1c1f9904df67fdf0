use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Tokens;
use crate::engine::errors::{ChoiceError, GameError};
use crate::engine::round::Verdict;
use crate::engine::RandomSource;

/// На этой грани ставка High/Low возвращается.
pub const TIE_FACE: u8 = 3;

pub const HIGH_LOW_MULTIPLIER: u64 = 2;
pub const EXACT_MULTIPLIER: u64 = 6;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HighLow {
    High,
    Low,
}

/// Режим ставки, выбирается до броска.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiceMode {
    HighLow,
    Exact,
}

/// Готовая ставка на кубик.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiceBet {
    HighLow(HighLow),
    /// Точная грань 1..=6.
    Exact(u8),
}

/// Незавершённый выбор с фронта: режим и значение могут быть не заданы.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceSelection {
    pub mode: Option<DiceMode>,
    pub high_low: Option<HighLow>,
    pub face: Option<u8>,
}

impl DiceSelection {
    /// Превратить выбор в ставку; без режима или значения – отказ.
    pub fn into_bet(self) -> Result<DiceBet, ChoiceError> {
        let bet = match self.mode {
            None => return Err(ChoiceError::MissingSelection("dice mode")),
            Some(DiceMode::HighLow) => DiceBet::HighLow(
                self.high_low
                    .ok_or(ChoiceError::MissingSelection("high or low"))?,
            ),
            Some(DiceMode::Exact) => {
                DiceBet::Exact(self.face.ok_or(ChoiceError::MissingSelection("die face"))?)
            }
        };
        bet.validate()?;
        Ok(bet)
    }
}

impl DiceBet {
    pub fn validate(&self) -> Result<(), ChoiceError> {
        match *self {
            DiceBet::Exact(face) if !(1..=6).contains(&face) => {
                Err(ChoiceError::DieFaceOutOfRange(face))
            }
            _ => Ok(()),
        }
    }

    pub fn multiplier(&self) -> u64 {
        match self {
            DiceBet::HighLow(_) => HIGH_LOW_MULTIPLIER,
            DiceBet::Exact(_) => EXACT_MULTIPLIER,
        }
    }
}

/// Исход броска.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceOutcome {
    pub bet: DiceBet,
    pub face: u8,
    pub verdict: Verdict,
    pub credit: Tokens,
}

/// Судить бросок. Ничья возможна только в High/Low на тройке.
pub fn judge_roll(bet: DiceBet, face: u8) -> Verdict {
    match bet {
        DiceBet::HighLow(_) if face == TIE_FACE => Verdict::Push,
        DiceBet::HighLow(HighLow::High) if face > TIE_FACE => Verdict::Win,
        DiceBet::HighLow(HighLow::Low) if face < TIE_FACE => Verdict::Win,
        DiceBet::Exact(prediction) if face == prediction => Verdict::Win,
        _ => Verdict::Lose,
    }
}

/// Бросить d6 и рассчитать зачисление.
pub fn roll_dice<R: RandomSource>(
    rng: &mut R,
    stake: Tokens,
    bet: DiceBet,
) -> Result<DiceOutcome, GameError> {
    bet.validate()?;

    let face = rng.next_below(6) as u8 + 1;
    let verdict = judge_roll(bet, face);
    let credit = match verdict {
        Verdict::Win => stake.times(bet.multiplier()),
        Verdict::Push => stake,
        Verdict::Lose => Tokens::ZERO,
    };

    debug!(?bet, face, ?verdict, "die rolled");

    Ok(DiceOutcome {
        bet,
        face,
        verdict,
        credit,
    })
}
