use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Tokens;
use crate::engine::RandomSource;

/// Выигрыш возвращает ставку и столько же сверху.
pub const COIN_FLIP_MULTIPLIER: u64 = 2;

/// Сторона монеты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Исход подбрасывания.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoinFlipOutcome {
    pub call: CoinSide,
    pub landed: CoinSide,
    pub won: bool,
    /// Сколько зачислить при расчёте (ставка уже списана).
    pub credit: Tokens,
}

/// Подбросить честную монету: один бит из RNG.
pub fn flip_coin<R: RandomSource>(rng: &mut R, stake: Tokens, call: CoinSide) -> CoinFlipOutcome {
    let landed = if rng.next_below(2) == 0 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };
    let won = landed == call;
    let credit = if won {
        stake.times(COIN_FLIP_MULTIPLIER)
    } else {
        Tokens::ZERO
    };

    debug!(?call, ?landed, won, "coin flipped");

    CoinFlipOutcome {
        call,
        landed,
        won,
        credit,
    }
}
