//! Интеграционные тесты для внешнего API (crate::api).

use casino_engine::api::*;
use casino_engine::domain::{GameKind, Tokens};
use casino_engine::engine::{CoinSide, RoundAction, Session, Verdict};
use casino_engine::infra::{DeterministicRng, LobbyConfig, ScriptedRng};

fn new_session() -> Session {
    Session::new(LobbyConfig::default())
}

#[test]
fn coin_flip_over_json() {
    let mut session = new_session();
    let mut rng = ScriptedRng::new(vec![0]);

    let raw = r#"{"PlaceWager":{"game":"CoinFlip","amount":100,"choice":{"coin_side":"Heads"}}}"#;
    let placed: CommandResponse =
        serde_json::from_str(&handle_command_json(&mut session, &mut rng, raw).unwrap()).unwrap();
    let round_id = match placed {
        CommandResponse::WagerPlaced { balance, state } => {
            assert_eq!(balance, Tokens(2900));
            assert!(state.terminal);
            state.round_id
        }
        other => panic!("unexpected response {other:?}"),
    };

    let raw = format!(r#"{{"Settle":{{"round_id":{round_id}}}}}"#);
    let settled: CommandResponse =
        serde_json::from_str(&handle_command_json(&mut session, &mut rng, &raw).unwrap()).unwrap();
    match settled {
        CommandResponse::Settled(dto) => {
            assert_eq!(dto.game, GameKind::CoinFlip);
            assert_eq!(dto.verdict, Verdict::Win);
            assert_eq!(dto.payout_delta, 100);
            assert_eq!(dto.new_balance, Tokens(3100));
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn broken_json_is_bad_request() {
    let mut session = new_session();
    let mut rng = ScriptedRng::new(vec![0]);
    let err = handle_command_json(&mut session, &mut rng, "{not json").unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(session.balance(), Tokens(3000));
}

#[test]
fn unset_choices_are_rejected() {
    let mut session = new_session();
    let mut rng = ScriptedRng::new(vec![0]);

    for game in [GameKind::CoinFlip, GameKind::NumberGuess, GameKind::Dice] {
        let cmd = Command::PlaceWager(PlaceWagerCommand {
            game,
            amount: Tokens(10),
            choice: ChoiceDto::default(),
        });
        let err = handle_command(&mut session, &mut rng, cmd).unwrap_err();
        assert!(matches!(err, ApiError::InvalidChoice(_)), "{game}: {err:?}");
    }

    let cmd = Command::PlaceWager(PlaceWagerCommand {
        game: GameKind::Roulette,
        amount: Tokens(10),
        choice: ChoiceDto::default(),
    });
    assert!(matches!(
        handle_command(&mut session, &mut rng, cmd),
        Err(ApiError::InvalidCommand(_))
    ));
    assert_eq!(session.balance(), Tokens(3000));
    assert_eq!(rng.draws(), 0);
}

#[test]
fn roulette_slip_from_dto() {
    let mut session = new_session();
    let mut rng = ScriptedRng::new(vec![17]);

    let cmd = Command::PlaceWager(PlaceWagerCommand {
        game: GameKind::Roulette,
        amount: Tokens(150),
        choice: ChoiceDto {
            roulette_bets: vec![
                RouletteBetDto {
                    kind: casino_engine::engine::RouletteBetKind::Straight,
                    numbers: vec![17],
                    amount: Tokens(100),
                },
                RouletteBetDto {
                    kind: casino_engine::engine::RouletteBetKind::Red,
                    numbers: Vec::new(),
                    amount: Tokens(50),
                },
            ],
            ..ChoiceDto::default()
        },
    });
    handle_command(&mut session, &mut rng, cmd).unwrap();
    let handle = session.active_round().unwrap();

    let response = handle_command(
        &mut session,
        &mut rng,
        Command::Settle(SettleCommand {
            round_id: handle.round_id,
        }),
    )
    .unwrap();
    match response {
        CommandResponse::Settled(dto) => {
            assert_eq!(dto.payout_delta, 3600 - 150);
            assert_eq!(dto.new_balance, Tokens(3000 - 150 + 3600));
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn blackjack_over_commands_and_queries() {
    let mut session = new_session();
    let mut rng = DeterministicRng::from_seed(5);

    let placed = handle_command(
        &mut session,
        &mut rng,
        Command::PlaceWager(PlaceWagerCommand {
            game: GameKind::Blackjack,
            amount: Tokens(100),
            choice: ChoiceDto::default(),
        }),
    )
    .unwrap();
    let round_id = match placed {
        CommandResponse::WagerPlaced { state, .. } => state.round_id,
        other => panic!("unexpected response {other:?}"),
    };

    let balance = handle_query(&session, Query::Balance).unwrap();
    match balance {
        QueryResponse::Balance(dto) => {
            assert_eq!(dto.balance, Tokens(2900));
            assert_eq!(dto.active_round.map(|h| h.round_id), Some(round_id));
        }
        other => panic!("unexpected response {other:?}"),
    }

    let advanced = handle_command(
        &mut session,
        &mut rng,
        Command::Advance(AdvanceCommand {
            round_id,
            action: RoundAction::Stand,
        }),
    )
    .unwrap();
    assert!(matches!(advanced, CommandResponse::RoundAdvanced(ref s) if s.terminal));

    let state_json = handle_query_json(
        &session,
        &format!(r#"{{"RoundState":{{"round_id":{round_id}}}}}"#),
    )
    .unwrap();
    let state: QueryResponse = serde_json::from_str(&state_json).unwrap();
    assert!(matches!(state, QueryResponse::RoundState(ref s) if s.outcome.is_some()));

    handle_command(
        &mut session,
        &mut rng,
        Command::Settle(SettleCommand { round_id }),
    )
    .unwrap();
    assert!(!session.has_active_round());
}

#[test]
fn unknown_round_and_busy_session() {
    let mut session = new_session();
    let mut rng = DeterministicRng::from_seed(5);

    assert_eq!(
        handle_query(&session, Query::RoundState { round_id: 9 }),
        Err(ApiError::RoundNotFound(9))
    );

    let place = Command::PlaceWager(PlaceWagerCommand {
        game: GameKind::CoinFlip,
        amount: Tokens(10),
        choice: ChoiceDto {
            coin_side: Some(CoinSide::Tails),
            ..ChoiceDto::default()
        },
    });
    handle_command(&mut session, &mut rng, place.clone()).unwrap();
    assert!(matches!(
        handle_command(&mut session, &mut rng, place),
        Err(ApiError::InvalidCommand(_))
    ));
}

#[test]
fn game_errors_map_to_api_errors() {
    let mut session = Session::with_balance(Tokens(5));
    let mut rng = ScriptedRng::new(vec![0]);
    let cmd = Command::PlaceWager(PlaceWagerCommand {
        game: GameKind::Slots,
        amount: Tokens(50),
        choice: ChoiceDto::default(),
    });
    assert!(matches!(
        handle_command(&mut session, &mut rng, cmd),
        Err(ApiError::InsufficientFunds(_))
    ));
}
