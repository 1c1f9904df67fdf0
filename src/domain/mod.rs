//! Доменная модель лобби: карты, колода, токены, руки, виды игр.

pub mod card;
pub mod deck;
pub mod hand;
pub mod tokens;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Идентификатор раунда внутри сессии.
pub type RoundId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use hand::*;
pub use tokens::*;

/// Мини-игра лобби.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameKind {
    CoinFlip,
    NumberGuess,
    Dice,
    Slots,
    Roulette,
    Blackjack,
    Poker,
}

impl GameKind {
    pub const ALL: [GameKind; 7] = [
        GameKind::CoinFlip,
        GameKind::NumberGuess,
        GameKind::Dice,
        GameKind::Slots,
        GameKind::Roulette,
        GameKind::Blackjack,
        GameKind::Poker,
    ];

    /// Пошаговая игра: между ставкой и расчётом игрок делает ходы.
    pub fn is_turn_based(self) -> bool {
        matches!(self, GameKind::Blackjack)
    }

    pub fn name(self) -> &'static str {
        match self {
            GameKind::CoinFlip => "coin flip",
            GameKind::NumberGuess => "number guess",
            GameKind::Dice => "dice",
            GameKind::Slots => "slots",
            GameKind::Roulette => "roulette",
            GameKind::Blackjack => "blackjack",
            GameKind::Poker => "poker showdown",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
