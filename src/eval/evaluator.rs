use crate::domain::card::{Card, Rank};
use crate::domain::hand::PokerHand;

use super::hand_rank::{HandCategory, PokerHandRank};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Оценить произвольный срез карт; `None`, если карт не ровно пять.
pub fn evaluate_cards(cards: &[Card]) -> Option<PokerHandRank> {
    PokerHand::from_slice(cards).map(|hand| evaluate_five(&hand))
}

/// Оценка строго 5-карточной руки.
///
/// Порядок проверок – от сильнейшей категории к слабейшей, первая
/// подошедшая выигрывает. Роял и стрит-флеш – уточнение флеш+стрит.
pub fn evaluate_five(hand: &PokerHand) -> PokerHandRank {
    let cards = hand.cards();

    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        rank_counts[card.rank.poker_value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let first_suit = cards[0].suit;
    let is_flush = cards.iter().all(|c| c.suit == first_suit);
    let straight_high = detect_straight(rank_mask);

    // Группы (rank, count): сначала по количеству (desc), затем по рангу (desc).
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = rank_counts[r.poker_value() as usize];
            (c > 0).then_some((r, c))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    // pattern: например [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1], [1,1,1,1,1]
    let pattern: Vec<u8> = groups.iter().map(|&(_, c)| c).collect();
    let ranks = expand_groups(&groups);

    let category = match (is_flush, straight_high) {
        (true, Some(Rank::Ace)) => HandCategory::RoyalFlush,
        (true, Some(_)) => HandCategory::StraightFlush,
        _ if pattern == [4, 1] => HandCategory::FourOfAKind,
        _ if pattern == [3, 2] => HandCategory::FullHouse,
        (true, None) => HandCategory::Flush,
        (false, Some(_)) => HandCategory::Straight,
        _ if pattern == [3, 1, 1] => HandCategory::ThreeOfAKind,
        _ if pattern == [2, 2, 1] => HandCategory::TwoPair,
        _ if pattern == [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    PokerHandRank::new(category, ranks)
}

/// Развернуть группы обратно в 5 рангов: KKK22 -> [K, K, K, 2, 2].
fn expand_groups(groups: &[(Rank, u8)]) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    let flat = groups
        .iter()
        .flat_map(|&(r, c)| std::iter::repeat(r).take(c as usize));
    for (slot, r) in out.iter_mut().zip(flat) {
        *slot = r;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Suit;

    #[test]
    fn expand_groups_keeps_group_order() {
        let groups = [(Rank::King, 3), (Rank::Two, 2)];
        assert_eq!(
            expand_groups(&groups),
            [Rank::King, Rank::King, Rank::King, Rank::Two, Rank::Two]
        );
    }

    #[test]
    fn evaluate_cards_rejects_wrong_length() {
        let cards = [
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
        ];
        assert!(evaluate_cards(&cards).is_none());
    }
}
