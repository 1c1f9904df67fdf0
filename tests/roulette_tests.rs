//! Европейская рулетка: ставки, купон, расчёт.

use casino_engine::domain::Tokens;
use casino_engine::engine::roulette::{pocket_color, settle_bets, spin_and_settle, PocketColor};
use casino_engine::engine::{BetSlip, ChoiceError, RouletteBet, RouletteBetKind};
use casino_engine::infra::ScriptedRng;

#[test]
fn straight_on_seventeen_pays_thirty_five_to_one() {
    let bet = RouletteBet::straight(17, Tokens(100)).unwrap();
    let outcome = settle_bets(&[bet], 17);

    assert_eq!(outcome.total_winnings, Tokens(3500));
    assert_eq!(outcome.credit, Tokens(3600));
    assert!(outcome.results[0].won);
}

#[test]
fn zero_loses_every_outside_bet() {
    let bets: Vec<RouletteBet> = RouletteBetKind::ALL
        .iter()
        .filter(|k| !k.is_inside())
        .map(|&k| RouletteBet::outside(k, Tokens(10)).unwrap())
        .collect();
    let outcome = settle_bets(&bets, 0);
    assert_eq!(outcome.color, PocketColor::Green);
    assert_eq!(outcome.credit, Tokens::ZERO);
}

#[test]
fn colors_match_the_table() {
    assert_eq!(pocket_color(0), PocketColor::Green);
    assert_eq!(pocket_color(1), PocketColor::Red);
    assert_eq!(pocket_color(17), PocketColor::Black);
    assert_eq!(pocket_color(36), PocketColor::Red);
}

#[test]
fn inside_bets_check_cardinality_and_range() {
    assert_eq!(
        RouletteBet::new(RouletteBetKind::Split, &[1], Tokens(10)),
        Err(ChoiceError::WrongCardinality {
            kind: RouletteBetKind::Split,
            expected: 2,
            got: 1,
        })
    );
    assert_eq!(
        RouletteBet::straight(37, Tokens(10)),
        Err(ChoiceError::PocketOutOfRange(37))
    );
    assert_eq!(
        RouletteBet::new(RouletteBetKind::Split, &[5, 5], Tokens(10)),
        Err(ChoiceError::DuplicatePocket(5))
    );
    assert_eq!(RouletteBet::straight(0, Tokens::ZERO), Err(ChoiceError::ZeroStake));

    let corner = RouletteBet::new(RouletteBetKind::Corner, &[5, 1, 2, 4], Tokens(10)).unwrap();
    assert_eq!(corner.numbers(), &[1, 2, 4, 5]);
    assert!(corner.covers(4));
    assert!(!corner.covers(3));
}

#[test]
fn outside_bets_fill_numbers_from_the_table() {
    let dozen = RouletteBet::outside(RouletteBetKind::Dozen2, Tokens(10)).unwrap();
    assert_eq!(dozen.numbers().len(), 12);
    assert!(dozen.covers(13) && dozen.covers(24));
    assert!(!dozen.covers(25));

    assert!(RouletteBet::new(RouletteBetKind::Red, &[1], Tokens(10)).is_err());
}

#[test]
fn slip_limits_and_totals() {
    let mut slip = BetSlip::with_limit(2);
    slip.add_bet(RouletteBet::straight(1, Tokens(10)).unwrap()).unwrap();
    slip.add_bet(RouletteBet::outside(RouletteBetKind::Odd, Tokens(25)).unwrap())
        .unwrap();
    assert_eq!(slip.total(), Tokens(35));

    let extra = RouletteBet::straight(2, Tokens(10)).unwrap();
    assert_eq!(slip.add_bet(extra), Err(ChoiceError::TooManyBets { max: 2 }));

    assert_eq!(slip.remove_bet(5), Err(ChoiceError::BetIndexOutOfRange(5)));
    let removed = slip.remove_bet(0).unwrap();
    assert_eq!(removed.amount(), Tokens(10));
    assert_eq!(slip.total(), Tokens(25));

    slip.clear();
    assert!(slip.is_empty());
}

#[test]
fn winning_even_money_bet_returns_stake_plus_winnings() {
    let mut slip = BetSlip::new();
    slip.add_bet(RouletteBet::outside(RouletteBetKind::Black, Tokens(50)).unwrap())
        .unwrap();
    slip.add_bet(RouletteBet::straight(3, Tokens(50)).unwrap()).unwrap();

    let mut rng = ScriptedRng::new(vec![17]);
    let outcome = spin_and_settle(&mut rng, &slip);

    assert_eq!(outcome.pocket, 17);
    assert_eq!(outcome.total_winnings, Tokens(50));
    assert_eq!(outcome.credit, Tokens(100));
}

#[test]
fn bets_from_json_are_validated() {
    let all_pockets: Vec<u8> = (0..37).collect();
    let raw = serde_json::json!({
        "kind": "Straight",
        "numbers": all_pockets,
        "amount": 100,
    });
    assert!(serde_json::from_value::<RouletteBet>(raw).is_err());

    let zero = serde_json::json!({ "kind": "Red", "amount": 0 });
    assert!(serde_json::from_value::<RouletteBet>(zero).is_err());

    let wager = serde_json::json!({
        "amount": 100,
        "choice": { "Roulette": { "bets": [
            { "kind": "Straight", "numbers": all_pockets, "amount": 100 }
        ] } },
    });
    assert!(serde_json::from_value::<casino_engine::Wager>(wager).is_err());
}

#[test]
fn serialized_slip_reads_back() {
    let mut slip = BetSlip::new();
    slip.add_bet(RouletteBet::outside(RouletteBetKind::Dozen3, Tokens(10)).unwrap())
        .unwrap();
    slip.add_bet(RouletteBet::new(RouletteBetKind::Street, &[1, 2, 3], Tokens(5)).unwrap())
        .unwrap();

    let json = serde_json::to_string(&slip).unwrap();
    let back: BetSlip = serde_json::from_str(&json).unwrap();
    assert_eq!(back, slip);
}

#[test]
fn slip_from_json_respects_its_limit() {
    let raw = serde_json::json!({
        "bets": [
            { "kind": "Red", "amount": 10 },
            { "kind": "Odd", "amount": 10 },
        ],
        "max_bets": 1,
    });
    assert!(serde_json::from_value::<BetSlip>(raw).is_err());
}
