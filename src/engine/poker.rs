//! Шоудаун против пассивного AI: по пять карт из одной колоды, без
//! обменов и торговли.
//!
//! Победитель определяется только по категории руки. Две руки одной
//! категории – ничья, кикеры не смотрим. Полное сравнение есть в
//! `PokerHandRank::cmp_with_kickers`.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Card, Deck, PokerHand, Tokens};
use crate::engine::errors::{ActionError, GameError};
use crate::engine::round::Verdict;
use crate::engine::RandomSource;
use crate::eval::{evaluate_five, PokerHandRank};

/// Банк = ставка игрока + равная ставка AI.
pub const POT_MULTIPLIER: u64 = 2;

/// Исход шоудауна.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerOutcome {
    pub player_hand: PokerHand,
    pub ai_hand: PokerHand,
    pub player_rank: PokerHandRank,
    pub ai_rank: PokerHandRank,
    pub verdict: Verdict,
    pub pot: Tokens,
    pub credit: Tokens,
}

/// Судить две оценённые руки по категории.
pub fn judge(player: &PokerHandRank, ai: &PokerHandRank) -> Verdict {
    match player.compare_category(ai) {
        Ordering::Greater => Verdict::Win,
        Ordering::Less => Verdict::Lose,
        Ordering::Equal => Verdict::Push,
    }
}

/// Свежая колода, раздача, оценка.
pub fn deal_showdown<R: RandomSource>(rng: &mut R, stake: Tokens) -> Result<PokerOutcome, GameError> {
    showdown_from_deck(Deck::shuffled(rng), stake)
}

/// Раздать из готовой колоды: карты идут по очереди игроку и AI.
pub fn showdown_from_deck(mut deck: Deck, stake: Tokens) -> Result<PokerOutcome, GameError> {
    if deck.len() < PokerHand::SIZE * 2 {
        return Err(ActionError::DeckEmpty.into());
    }

    let dealt = deck.draw_n(PokerHand::SIZE * 2);
    let player_cards: Vec<Card> = dealt.iter().step_by(2).copied().collect();
    let ai_cards: Vec<Card> = dealt.iter().skip(1).step_by(2).copied().collect();

    let player_hand = PokerHand::from_slice(&player_cards).ok_or(ActionError::DeckEmpty)?;
    let ai_hand = PokerHand::from_slice(&ai_cards).ok_or(ActionError::DeckEmpty)?;

    let player_rank = evaluate_five(&player_hand);
    let ai_rank = evaluate_five(&ai_hand);
    let verdict = judge(&player_rank, &ai_rank);

    let pot = stake.times(POT_MULTIPLIER);
    let credit = match verdict {
        Verdict::Win => pot,
        Verdict::Push => stake,
        Verdict::Lose => Tokens::ZERO,
    };

    debug!(
        player = %player_rank.category,
        ai = %ai_rank.category,
        ?verdict,
        "showdown"
    );

    Ok(PokerOutcome {
        player_hand,
        ai_hand,
        player_rank,
        ai_rank,
        verdict,
        pot,
        credit,
    })
}
