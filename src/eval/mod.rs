//! Оценка силы 5-карточных покерных рук (шоудаун против AI).
//!
//! Основная функция:
//!   `evaluate_five(hand) -> PokerHandRank`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_cards, evaluate_five};
pub use hand_rank::{describe_hand, HandCategory, PokerHandRank};
