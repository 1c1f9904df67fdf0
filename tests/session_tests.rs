//! Сессия: баланс, один активный раунд, отказы без побочных эффектов.

use casino_engine::domain::{GameKind, Tokens};
use casino_engine::engine::{
    ActionError, BetSlip, ChoiceError, CoinSide, DiceBet, GameError, HighLow, Outcome,
    RoundAction, RoundPhase, RouletteBet, RouletteBetKind, Session, Verdict, Wager,
};
use casino_engine::infra::{DeterministicRng, LobbyConfig, ScriptedRng};

fn session(balance: u64) -> Session {
    Session::with_balance(Tokens(balance))
}

#[test]
fn new_session_uses_configured_starting_balance() {
    let s = Session::new(LobbyConfig::default());
    assert_eq!(s.balance(), Tokens(3000));
    assert!(!s.has_active_round());
}

#[test]
fn coin_flip_win_and_loss_move_balance() {
    let mut s = session(1000);

    let win = s
        .play(&mut ScriptedRng::new(vec![0]), Wager::coin_flip(Tokens(100), CoinSide::Heads))
        .unwrap();
    assert_eq!(win.verdict, Verdict::Win);
    assert_eq!(win.staked, Tokens(100));
    assert_eq!(win.credited, Tokens(200));
    assert_eq!(win.payout_delta, 100);
    assert_eq!(s.balance(), Tokens(1100));

    let loss = s
        .play(&mut ScriptedRng::new(vec![1]), Wager::coin_flip(Tokens(100), CoinSide::Heads))
        .unwrap();
    assert_eq!(loss.payout_delta, -100);
    assert_eq!(loss.new_balance, Tokens(1000));
    assert_eq!(s.balance(), Tokens(1000));
}

#[test]
fn number_guess_payouts_through_session() {
    let cases = [(50, 2000), (55, 1050), (56, 900)];
    for (guess, expected) in cases {
        let mut s = session(1000);
        let mut rng = ScriptedRng::new(vec![49]);
        s.play(&mut rng, Wager::number_guess(Tokens(100), guess)).unwrap();
        assert_eq!(s.balance(), Tokens(expected), "guess {guess}");
    }
}

#[test]
fn dice_tie_returns_stake() {
    let mut s = session(1000);
    let res = s
        .play(
            &mut ScriptedRng::new(vec![2]),
            Wager::dice(Tokens(100), DiceBet::HighLow(HighLow::High)),
        )
        .unwrap();
    assert_eq!(res.verdict, Verdict::Push);
    assert_eq!(res.payout_delta, 0);
    assert_eq!(s.balance(), Tokens(1000));
}

#[test]
fn slots_and_roulette_settle_gross_credit() {
    let mut s = session(1000);
    s.play(&mut ScriptedRng::new(vec![0]), Wager::slots(Tokens(100)))
        .unwrap();
    assert_eq!(s.balance(), Tokens(1400));

    let mut slip = BetSlip::new();
    slip.add_bet(RouletteBet::straight(17, Tokens(100)).unwrap())
        .unwrap();
    let res = s
        .play(&mut ScriptedRng::new(vec![17]), Wager::roulette(slip))
        .unwrap();
    match &res.outcome {
        Outcome::Roulette(o) => assert_eq!(o.total_winnings, Tokens(3500)),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(res.payout_delta, 3500);
    assert_eq!(s.balance(), Tokens(4900));
}

#[test]
fn rejected_wagers_change_nothing() {
    let mut s = session(100);
    let mut rng = ScriptedRng::new(vec![0]);

    let rejections = vec![
        (
            Wager::coin_flip(Tokens::ZERO, CoinSide::Heads),
            GameError::InvalidChoice(ChoiceError::ZeroStake),
        ),
        (
            Wager::coin_flip(Tokens(101), CoinSide::Heads),
            GameError::InsufficientFunds {
                stake: Tokens(101),
                balance: Tokens(100),
            },
        ),
        (
            Wager::number_guess(Tokens(10), 0),
            GameError::InvalidChoice(ChoiceError::GuessOutOfRange(0)),
        ),
        (
            Wager::number_guess(Tokens(10), 101),
            GameError::InvalidChoice(ChoiceError::GuessOutOfRange(101)),
        ),
        (
            Wager::dice(Tokens(10), DiceBet::Exact(7)),
            GameError::InvalidChoice(ChoiceError::DieFaceOutOfRange(7)),
        ),
        (
            Wager::roulette(BetSlip::new()),
            GameError::InvalidAction(ActionError::NoBetsPlaced),
        ),
    ];

    for (wager, expected) in rejections {
        assert_eq!(s.place_wager(&mut rng, wager), Err(expected));
        assert_eq!(s.balance(), Tokens(100));
        assert!(!s.has_active_round());
    }
    assert_eq!(rng.draws(), 0);
}

#[test]
fn minimum_stake_and_slip_limit_come_from_config() {
    let config = LobbyConfig {
        min_stake: Tokens(10),
        max_roulette_bets: 2,
        ..LobbyConfig::default()
    };
    let mut s = Session::new(config);
    let mut rng = ScriptedRng::new(vec![0]);

    assert_eq!(
        s.play(&mut rng, Wager::slots(Tokens(5))),
        Err(GameError::InvalidChoice(ChoiceError::BelowMinimum {
            stake: Tokens(5),
            min: Tokens(10),
        }))
    );

    let mut slip = BetSlip::new();
    for kind in [RouletteBetKind::Red, RouletteBetKind::Odd, RouletteBetKind::Low] {
        slip.add_bet(RouletteBet::outside(kind, Tokens(10)).unwrap())
            .unwrap();
    }
    assert_eq!(
        s.play(&mut rng, Wager::roulette(slip)),
        Err(GameError::InvalidChoice(ChoiceError::TooManyBets { max: 2 }))
    );
    assert_eq!(s.balance(), Tokens(3000));
}

#[test]
fn one_round_at_a_time() {
    let mut s = session(1000);
    let mut rng = DeterministicRng::from_seed(7);

    let handle = s.place_wager(&mut rng, Wager::blackjack(Tokens(100))).unwrap();
    assert_eq!(handle.game, GameKind::Blackjack);
    assert_eq!(s.balance(), Tokens(900));
    assert_eq!(s.active_round(), Some(handle));

    assert_eq!(
        s.place_wager(&mut rng, Wager::slots(Tokens(10))),
        Err(GameError::InvalidAction(ActionError::RoundInProgress))
    );
    assert_eq!(
        s.settle(handle),
        Err(GameError::InvalidAction(ActionError::RoundNotFinished))
    );
    assert_eq!(s.balance(), Tokens(900));
}

#[test]
fn blackjack_round_through_session() {
    let mut s = session(1000);
    let mut rng = DeterministicRng::from_seed(42);

    let handle = s.place_wager(&mut rng, Wager::blackjack(Tokens(100))).unwrap();
    let state = s.round_state(handle).unwrap();
    assert_eq!(state.phase, RoundPhase::PlayerTurn);
    assert_eq!(state.player_cards.len(), 2);
    assert_eq!(state.dealer_cards.len(), 1);
    assert!(state.dealer_hole_hidden);
    assert!(!state.terminal);

    let state = s.advance(handle, RoundAction::Stand).unwrap();
    assert!(state.terminal);
    assert!(!state.dealer_hole_hidden);
    assert!(state.dealer_cards.len() >= 2);

    let res = s.settle(handle).unwrap();
    assert!([Tokens(0), Tokens(100), Tokens(200)].contains(&res.credited));
    assert_eq!(s.balance(), Tokens(900) + res.credited);
    assert!(!s.has_active_round());
}

#[test]
fn turn_actions_on_instant_rounds_are_rejected() {
    let mut s = session(1000);
    let mut rng = ScriptedRng::new(vec![0]);

    assert_eq!(
        s.play(&mut rng, Wager::blackjack(Tokens(10))),
        Err(GameError::InvalidAction(ActionError::TurnBased(GameKind::Blackjack)))
    );

    let handle = s.place_wager(&mut rng, Wager::poker(Tokens(10))).unwrap();
    assert_eq!(
        s.advance(handle, RoundAction::Hit),
        Err(GameError::InvalidAction(ActionError::NotTurnBased(GameKind::Poker)))
    );
    let state = s.round_state(handle).unwrap();
    assert!(state.terminal);
    assert_eq!(state.player_cards.len(), 5);
    assert_eq!(state.dealer_cards.len(), 5);

    let mut stale = handle;
    stale.round_id += 100;
    assert_eq!(
        s.settle(stale),
        Err(GameError::InvalidAction(ActionError::UnknownRound(stale.round_id)))
    );
    s.settle(handle).unwrap();
    assert_eq!(
        s.settle(handle),
        Err(GameError::InvalidAction(ActionError::NoActiveRound))
    );
}

#[test]
fn balance_never_goes_negative_over_many_rounds() {
    let mut s = session(500);
    let mut rng = DeterministicRng::from_seed(2024);

    for i in 0..300u64 {
        let stake = Tokens(1 + i % 50).min(s.balance());
        if stake.is_zero() {
            break;
        }
        let wager = match i % 6 {
            0 => Wager::coin_flip(stake, CoinSide::Tails),
            1 => Wager::number_guess(stake, 42),
            2 => Wager::dice(stake, DiceBet::Exact(3)),
            3 => Wager::slots(stake),
            4 => Wager::poker(stake),
            _ => {
                let mut slip = BetSlip::new();
                slip.add_bet(RouletteBet::outside(RouletteBetKind::Black, stake).unwrap())
                    .unwrap();
                Wager::roulette(slip)
            }
        };
        let before = s.balance();
        let res = s.play(&mut rng, wager).unwrap();
        assert_eq!(res.new_balance, s.balance());
        assert_eq!(
            i128::from(s.balance().amount()) - i128::from(before.amount()),
            i128::from(res.payout_delta)
        );
    }
}

#[test]
fn round_ids_increase() {
    let mut s = session(1000);
    let mut rng = ScriptedRng::new(vec![0]);
    let a = s.play(&mut rng, Wager::slots(Tokens(1))).unwrap();
    let b = s.play(&mut rng, Wager::slots(Tokens(1))).unwrap();
    assert!(b.round_id > a.round_id);
}

#[test]
fn balance_reads_are_stable() {
    let mut s = session(1000);
    assert_eq!(s.balance(), s.balance());

    s.play(&mut ScriptedRng::new(vec![0]), Wager::slots(Tokens(10)))
        .unwrap();
    let after = s.balance();
    assert_eq!(s.balance(), after);
}

#[test]
fn settle_overflow_keeps_round_open() {
    let mut s = session(u64::MAX);
    let mut rng = ScriptedRng::new(vec![0]);

    let handle = s
        .place_wager(&mut rng, Wager::coin_flip(Tokens(100), CoinSide::Heads))
        .unwrap();
    let debited = Tokens(u64::MAX - 100);
    assert_eq!(s.balance(), debited);

    assert_eq!(
        s.settle(handle),
        Err(GameError::BalanceOverflow {
            balance: debited,
            credit: Tokens(200),
        })
    );
    assert_eq!(s.balance(), debited);
    assert_eq!(s.active_round(), Some(handle));
}
