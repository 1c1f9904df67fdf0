//! Интеграционные тесты для доменной модели (crate::domain).

use std::collections::HashSet;

use casino_engine::domain::*;

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

#[test]
fn card_parse_and_display() {
    assert_eq!(card("Ah"), Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(card("Td"), Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(card("10c"), Card::new(Rank::Ten, Suit::Clubs));
    assert_eq!(card("K♠"), Card::new(Rank::King, Suit::Spades));

    assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
    assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
}

#[test]
fn card_parse_errors() {
    assert_eq!("".parse::<Card>(), Err(ParseCardError::Empty));
    assert_eq!(
        "1h".parse::<Card>(),
        Err(ParseCardError::InvalidRank("1".to_string()))
    );
    assert_eq!("Ax".parse::<Card>(), Err(ParseCardError::InvalidSuit('x')));
}

#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);
    let unique: HashSet<Card> = deck.cards().iter().copied().collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn deck_from_top_draws_in_given_order() {
    let mut deck = Deck::from_top(&[card("Ah"), card("Kd"), card("2c")]);
    assert_eq!(deck.draw_one(), Some(card("Ah")));
    assert_eq!(deck.draw_n(5), vec![card("Kd"), card("2c")]);
    assert!(deck.is_empty());
    assert_eq!(deck.draw_one(), None);
}

#[test]
fn blackjack_hand_values_reduce_aces() {
    let hand = |s: &[&str]| Hand::from_cards(&s.iter().map(|c| card(c)).collect::<Vec<_>>());

    assert_eq!(hand(&["Ah", "Ad", "9c"]).value(), 21);
    assert_eq!(hand(&["Ah", "Ad", "Ac", "8s"]).value(), 21);
    assert_eq!(hand(&["Kh", "Qd"]).value(), 20);
    assert_eq!(hand(&["Ah", "6d"]).value(), 17);
    assert!(hand(&["Ah", "6d"]).is_soft());
    assert!(!hand(&["Th", "6d", "Ac"]).is_soft());
    assert!(hand(&["Kh", "Qd", "5c"]).is_bust());
    assert!(hand(&["Ah", "Kd"]).is_natural());
    assert!(!hand(&["7h", "7d", "7c"]).is_natural());
}

#[test]
fn tokens_arithmetic_never_goes_negative() {
    let a = Tokens(100);
    assert_eq!(a - Tokens(250), Tokens::ZERO);
    assert_eq!(a.checked_sub(Tokens(250)), None);
    assert_eq!(a.times(3), Tokens(300));
    assert_eq!(a.tenths(35), Tokens(350));
    assert_eq!(Tokens(101).half(), Tokens(50));
    assert_eq!(Tokens(50).delta_from(Tokens(100)), -50);
    assert_eq!([Tokens(1), Tokens(2)].iter().copied().sum::<Tokens>(), Tokens(3));
}

#[test]
fn only_blackjack_is_turn_based() {
    let turn_based: Vec<GameKind> = GameKind::ALL
        .iter()
        .copied()
        .filter(|g| g.is_turn_based())
        .collect();
    assert_eq!(turn_based, vec![GameKind::Blackjack]);
}
