use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе. Порядок вариантов = порядок силы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    /// Порядковый номер категории: 1 (старшая карта) .. 10 (роял-флеш).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Результат оценки руки: категория + тай-брейк.
///
/// `ranks` – 5 рангов по убыванию значимости: сначала группы
/// (каре, сет, пары) по размеру, затем кикеры по убыванию.
/// Для старшей карты и флеша это просто сортировка по убыванию.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PokerHandRank {
    pub category: HandCategory,
    pub ranks: [Rank; 5],
}

impl PokerHandRank {
    pub fn new(category: HandCategory, ranks: [Rank; 5]) -> Self {
        Self { category, ranks }
    }

    /// Сравнение только по категории – именно так судит шоудаун лобби:
    /// две "One Pair" разного достоинства считаются ничьей.
    pub fn compare_category(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category)
    }

    /// Полное сравнение с кикерами (через упакованное значение).
    pub fn cmp_with_kickers(&self, other: &Self) -> Ordering {
        self.packed().cmp(&other.packed())
    }

    /// Упаковка в u32:
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита.
    pub fn packed(&self) -> u32 {
        let cat_bits = u32::from(self.category.ordinal()) & 0x0F;
        self.ranks
            .iter()
            .fold(cat_bits, |acc, r| (acc << 4) | (u32::from(r.poker_value()) & 0x0F))
    }

    pub fn describe(&self) -> String {
        describe_hand(self)
    }
}

/// Человеческое описание руки, например "One Pair (K)" или "Flush (A high)".
pub fn describe_hand(rank: &PokerHandRank) -> String {
    let top = rank.ranks[0];
    match rank.category {
        HandCategory::RoyalFlush => rank.category.name().to_string(),
        HandCategory::HighCard
        | HandCategory::Straight
        | HandCategory::Flush
        | HandCategory::StraightFlush => format!("{} ({} high)", rank.category, top),
        HandCategory::OnePair | HandCategory::ThreeOfAKind | HandCategory::FourOfAKind => {
            format!("{} ({})", rank.category, top)
        }
        HandCategory::TwoPair => format!("{} ({} & {})", rank.category, top, rank.ranks[2]),
        HandCategory::FullHouse => format!("{} ({} over {})", rank.category, top, rank.ranks[3]),
    }
}
