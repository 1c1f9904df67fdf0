use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Tokens;
use crate::engine::errors::{ChoiceError, GameError};
use crate::engine::RandomSource;

pub const GUESS_MIN: u8 = 1;
pub const GUESS_MAX: u8 = 100;

/// "Близко": промах не больше чем на столько.
pub const CLOSE_DISTANCE: u8 = 5;

/// Точное попадание – чистый выигрыш ×10.
pub const EXACT_NET_MULTIPLIER: u64 = 10;

/// Ярус исхода. Проверяется в порядке: точно → близко → мимо.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GuessTier {
    Exact,
    Close,
    Miss,
}

/// Исход угадывания. Загаданное число раскрывается всегда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessOutcome {
    pub guess: u8,
    pub target: u8,
    pub distance: u8,
    pub tier: GuessTier,
    pub credit: Tokens,
}

pub fn validate_guess(guess: u8) -> Result<(), ChoiceError> {
    if (GUESS_MIN..=GUESS_MAX).contains(&guess) {
        Ok(())
    } else {
        Err(ChoiceError::GuessOutOfRange(guess))
    }
}

pub fn tier_for(guess: u8, target: u8) -> GuessTier {
    match guess.abs_diff(target) {
        0 => GuessTier::Exact,
        d if d <= CLOSE_DISTANCE => GuessTier::Close,
        _ => GuessTier::Miss,
    }
}

/// Валовое зачисление: ставка + чистый выигрыш, либо ноль.
pub fn credit_for(stake: Tokens, tier: GuessTier) -> Tokens {
    match tier {
        GuessTier::Exact => stake + stake.times(EXACT_NET_MULTIPLIER),
        GuessTier::Close => stake + stake.half(),
        GuessTier::Miss => Tokens::ZERO,
    }
}

/// Загадать число в 1..=100 и сравнить с догадкой.
pub fn resolve_guess<R: RandomSource>(
    rng: &mut R,
    stake: Tokens,
    guess: u8,
) -> Result<GuessOutcome, GameError> {
    validate_guess(guess)?;

    let span = u32::from(GUESS_MAX - GUESS_MIN) + 1;
    let target = rng.next_below(span) as u8 + GUESS_MIN;
    let tier = tier_for(guess, target);

    debug!(guess, target, ?tier, "number revealed");

    Ok(GuessOutcome {
        guess,
        target,
        distance: guess.abs_diff(target),
        tier,
        credit: credit_for(stake, tier),
    })
}
