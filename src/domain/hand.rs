use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Предел очков в блэкджеке.
pub const BLACKJACK: u8 = 21;

/// Рука в блэкджеке (игрока или дилера).
///
/// Меняется только добавлением карты. Очки не хранятся, а
/// пересчитываются при каждом вызове, т.к. состав руки меняется.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Очки руки: каждый туз сначала 11, затем, пока перебор и есть
    /// туз "за 11", один такой туз пересчитывается в 1.
    pub fn value(&self) -> u8 {
        self.tally().0
    }

    /// Мягкая рука: хотя бы один туз всё ещё считается за 11.
    pub fn is_soft(&self) -> bool {
        self.tally().1
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// 21 двумя картами.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }

    fn tally(&self) -> (u8, bool) {
        let mut total: u32 = 0;
        let mut aces_as_eleven = 0u32;

        for card in &self.cards {
            total += u32::from(card.rank.blackjack_value());
            if card.rank.is_ace() {
                aces_as_eleven += 1;
            }
        }

        while total > u32::from(BLACKJACK) && aces_as_eleven > 0 {
            total -= 10;
            aces_as_eleven -= 1;
        }

        (total.min(u32::from(u8::MAX)) as u8, aces_as_eleven > 0)
    }
}

/// Покерная рука: ровно 5 карт, после раздачи не меняется.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerHand {
    cards: [Card; 5],
}

impl PokerHand {
    pub const SIZE: usize = 5;

    pub fn new(cards: [Card; 5]) -> Self {
        Self { cards }
    }

    /// Собрать руку из среза; `None`, если карт не ровно пять.
    pub fn from_slice(cards: &[Card]) -> Option<Self> {
        let cards: [Card; 5] = cards.try_into().ok()?;
        Some(Self { cards })
    }

    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }
}
