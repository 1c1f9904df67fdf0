// src/bin/casino_dev_cli.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};

use casino_engine::domain::Tokens;
use casino_engine::engine::{
    BetSlip, CoinSide, DiceBet, HighLow, Outcome, Resolution, RouletteBet, RouletteBetKind,
    RoundAction, RoundPhase,
};
use casino_engine::infra::{DeterministicRng, LobbyConfig, SystemRng};
use casino_engine::{RandomSource, Session, Wager};

#[derive(Parser, Debug)]
#[command(author, version, about = "Dev-CLI: прогоняет все игры лобби", long_about = None)]
struct Args {
    /// Seed для воспроизводимого прогона. Без него берётся системный RNG.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Путь к TOML-конфигу лобби.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сколько кругов по всем играм сыграть.
    #[arg(short, long, default_value_t = 1)]
    rounds: u32,

    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = match &args.config {
        Some(path) => LobbyConfig::load(path)
            .with_context(|| format!("не удалось загрузить конфиг {}", path.display()))?,
        None => LobbyConfig::default(),
    };

    println!("casino_dev_cli: стартуем, баланс {}", config.starting_balance);

    match args.seed {
        Some(seed) => {
            info!(seed, "deterministic run");
            run(&mut DeterministicRng::from_seed(seed), config, args.rounds)
        }
        None => run(&mut SystemRng, config, args.rounds),
    }
}

fn run<R: RandomSource>(rng: &mut R, config: LobbyConfig, rounds: u32) -> anyhow::Result<()> {
    let stake = config.default_stake;
    let mut session = Session::new(config);

    for lap in 1..=rounds {
        println!();
        println!("================ КРУГ {lap} ================");

        let wagers = vec![
            Wager::coin_flip(stake, CoinSide::Heads),
            Wager::number_guess(stake, 50),
            Wager::dice(stake, DiceBet::HighLow(HighLow::High)),
            Wager::dice(stake, DiceBet::Exact(6)),
            Wager::slots(stake),
            Wager::roulette(demo_slip(stake)?),
            Wager::poker(stake),
        ];

        for wager in wagers {
            if session.balance() < wager.amount {
                println!(
                    "Баланс {} меньше ставки {}, останавливаемся",
                    session.balance(),
                    wager.amount
                );
                return Ok(());
            }
            let resolution = session.play(rng, wager).context("раунд не сыгран")?;
            print_resolution(&resolution);
        }

        if session.balance() < stake {
            println!(
                "Баланс {} меньше ставки {}, останавливаемся",
                session.balance(),
                stake
            );
            return Ok(());
        }
        play_blackjack(&mut session, rng, stake)?;
    }

    println!();
    println!("Итоговый баланс: {}", session.balance());
    Ok(())
}

/// Ставка на красное + straight на 17.
fn demo_slip(stake: Tokens) -> anyhow::Result<BetSlip> {
    let mut slip = BetSlip::new();
    let half = stake.half();
    slip.add_bet(RouletteBet::outside(RouletteBetKind::Red, stake.saturating_sub(half))?)?;
    if !half.is_zero() {
        slip.add_bet(RouletteBet::straight(17, half)?)?;
    }
    Ok(slip)
}

/// Простая стратегия: добираем, пока меньше 17.
fn play_blackjack<R: RandomSource>(
    session: &mut Session,
    rng: &mut R,
    stake: Tokens,
) -> anyhow::Result<()> {
    let handle = session.place_wager(rng, Wager::blackjack(stake))?;
    let mut state = session.round_state(handle)?;

    while state.phase == RoundPhase::PlayerTurn {
        let value = state.player_value.unwrap_or_default();
        println!(
            "  игрок: {:?} ({value}), дилер показывает {:?}",
            fmt_cards(&state.player_cards),
            fmt_cards(&state.dealer_cards)
        );
        let action = if value < 17 { RoundAction::Hit } else { RoundAction::Stand };
        state = session.advance(handle, action)?;
    }

    let resolution = session.settle(handle)?;
    print_resolution(&resolution);
    Ok(())
}

fn fmt_cards(cards: &[casino_engine::Card]) -> Vec<String> {
    cards.iter().map(ToString::to_string).collect()
}

fn print_resolution(resolution: &Resolution) {
    let detail = match &resolution.outcome {
        Outcome::CoinFlip(o) => format!("выпало {:?}", o.landed),
        Outcome::NumberGuess(o) => format!("загадано {}, расстояние {}", o.target, o.distance),
        Outcome::Dice(o) => format!("грань {}", o.face),
        Outcome::Slots(o) => format!("выигрышных линий: {}", o.wins.len()),
        Outcome::Roulette(o) => format!("шарик на {} ({:?})", o.pocket, o.color),
        Outcome::Blackjack(o) => format!("игрок {} / дилер {}", o.player_value, o.dealer_value),
        Outcome::Poker(o) => format!("{} против {}", o.player_rank.describe(), o.ai_rank.describe()),
    };
    println!(
        "[{}] {:?}: {}, дельта {:+}, баланс {}",
        resolution.game, resolution.verdict, detail, resolution.payout_delta, resolution.new_balance
    );
}
