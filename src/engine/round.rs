//! Ставка, исход и состояние раунда – то, чем ядро обменивается с фронтом.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, GameKind, RoundId, Tokens};
use crate::engine::blackjack::BlackjackOutcome;
use crate::engine::coin_flip::{flip_coin, CoinFlipOutcome, CoinSide};
use crate::engine::dice::{roll_dice, DiceBet, DiceOutcome};
use crate::engine::errors::{ActionError, ChoiceError, GameError};
use crate::engine::number_guess::{resolve_guess, validate_guess, GuessOutcome, GuessTier};
use crate::engine::poker::{deal_showdown, PokerOutcome};
use crate::engine::roulette::{spin_and_settle, BetSlip, RouletteOutcome};
use crate::engine::slots::{spin_slots, SlotsOutcome};
use crate::engine::RandomSource;

/// Выбор игрока для конкретной игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameChoice {
    CoinFlip(CoinSide),
    NumberGuess(u8),
    Dice(DiceBet),
    Slots,
    Roulette(BetSlip),
    Blackjack,
    Poker,
}

impl GameChoice {
    pub fn game(&self) -> GameKind {
        match self {
            GameChoice::CoinFlip(_) => GameKind::CoinFlip,
            GameChoice::NumberGuess(_) => GameKind::NumberGuess,
            GameChoice::Dice(_) => GameKind::Dice,
            GameChoice::Slots => GameKind::Slots,
            GameChoice::Roulette(_) => GameKind::Roulette,
            GameChoice::Blackjack => GameKind::Blackjack,
            GameChoice::Poker => GameKind::Poker,
        }
    }
}

/// Ставка: сумма + выбор. Для рулетки сумма = сумма купона.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wager {
    pub amount: Tokens,
    pub choice: GameChoice,
}

impl Wager {
    pub fn new(amount: Tokens, choice: GameChoice) -> Self {
        Self { amount, choice }
    }

    pub fn coin_flip(amount: Tokens, call: CoinSide) -> Self {
        Self::new(amount, GameChoice::CoinFlip(call))
    }

    pub fn number_guess(amount: Tokens, guess: u8) -> Self {
        Self::new(amount, GameChoice::NumberGuess(guess))
    }

    pub fn dice(amount: Tokens, bet: DiceBet) -> Self {
        Self::new(amount, GameChoice::Dice(bet))
    }

    pub fn slots(amount: Tokens) -> Self {
        Self::new(amount, GameChoice::Slots)
    }

    /// Ставка на рулетку: сумма берётся из купона.
    pub fn roulette(slip: BetSlip) -> Self {
        Self::new(slip.total(), GameChoice::Roulette(slip))
    }

    pub fn blackjack(amount: Tokens) -> Self {
        Self::new(amount, GameChoice::Blackjack)
    }

    pub fn poker(amount: Tokens) -> Self {
        Self::new(amount, GameChoice::Poker)
    }

    pub fn game(&self) -> GameKind {
        self.choice.game()
    }

    /// Проверка выбора без учёта баланса. Не трогает RNG.
    pub fn validate_choice(&self) -> Result<(), GameError> {
        match &self.choice {
            GameChoice::NumberGuess(guess) => validate_guess(*guess)?,
            GameChoice::Dice(bet) => bet.validate()?,
            GameChoice::Roulette(slip) => {
                if slip.is_empty() {
                    return Err(ActionError::NoBetsPlaced.into());
                }
                if slip.total() != self.amount {
                    return Err(ChoiceError::SlipTotalMismatch {
                        stake: self.amount,
                        total: slip.total(),
                    }
                    .into());
                }
            }
            GameChoice::CoinFlip(_)
            | GameChoice::Slots
            | GameChoice::Blackjack
            | GameChoice::Poker => {}
        }
        Ok(())
    }
}

/// Ссылка на активный раунд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RoundHandle {
    pub round_id: RoundId,
    pub game: GameKind,
}

/// Ход в пошаговой игре.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundAction {
    Hit,
    Stand,
}

/// Фаза раунда. Мгновенные игры сразу попадают в `Settled`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Итог раунда с точки зрения игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Win,
    Push,
    Lose,
}

/// Описание исхода для отрисовки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    CoinFlip(CoinFlipOutcome),
    NumberGuess(GuessOutcome),
    Dice(DiceOutcome),
    Slots(SlotsOutcome),
    Roulette(RouletteOutcome),
    Blackjack(BlackjackOutcome),
    Poker(PokerOutcome),
}

impl Outcome {
    pub fn game(&self) -> GameKind {
        match self {
            Outcome::CoinFlip(_) => GameKind::CoinFlip,
            Outcome::NumberGuess(_) => GameKind::NumberGuess,
            Outcome::Dice(_) => GameKind::Dice,
            Outcome::Slots(_) => GameKind::Slots,
            Outcome::Roulette(_) => GameKind::Roulette,
            Outcome::Blackjack(_) => GameKind::Blackjack,
            Outcome::Poker(_) => GameKind::Poker,
        }
    }

    /// Валовое зачисление при расчёте (ставка к этому моменту уже списана).
    pub fn credit(&self) -> Tokens {
        match self {
            Outcome::CoinFlip(o) => o.credit,
            Outcome::NumberGuess(o) => o.credit,
            Outcome::Dice(o) => o.credit,
            Outcome::Slots(o) => o.credit,
            Outcome::Roulette(o) => o.credit,
            Outcome::Blackjack(o) => o.credit,
            Outcome::Poker(o) => o.credit,
        }
    }

    pub fn verdict(&self, staked: Tokens) -> Verdict {
        match self {
            Outcome::CoinFlip(o) => {
                if o.won {
                    Verdict::Win
                } else {
                    Verdict::Lose
                }
            }
            Outcome::NumberGuess(o) => match o.tier {
                GuessTier::Exact | GuessTier::Close => Verdict::Win,
                GuessTier::Miss => Verdict::Lose,
            },
            Outcome::Dice(o) => o.verdict,
            Outcome::Slots(o) => {
                if o.wins.is_empty() {
                    Verdict::Lose
                } else {
                    Verdict::Win
                }
            }
            Outcome::Roulette(o) => match o.credit.cmp(&staked) {
                core::cmp::Ordering::Greater => Verdict::Win,
                core::cmp::Ordering::Equal => Verdict::Push,
                core::cmp::Ordering::Less => Verdict::Lose,
            },
            Outcome::Blackjack(o) => o.verdict,
            Outcome::Poker(o) => o.verdict,
        }
    }
}

/// Что возвращает расчёт раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    pub round_id: RoundId,
    pub game: GameKind,
    pub new_balance: Tokens,
    pub outcome: Outcome,
    pub verdict: Verdict,
    /// Списано при ставке.
    pub staked: Tokens,
    /// Зачислено при расчёте.
    pub credited: Tokens,
    /// Чистое изменение баланса за раунд: `credited - staked`.
    pub payout_delta: i64,
}

/// Представление раунда для фронта.
///
/// Закрытая карта дилера не попадает в `dealer_cards`, пока игрок ходит.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub round_id: RoundId,
    pub game: GameKind,
    pub phase: RoundPhase,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub dealer_hole_hidden: bool,
    pub player_value: Option<u8>,
    pub dealer_value: Option<u8>,
    pub terminal: bool,
    pub outcome: Option<Outcome>,
}

/// Сыграть мгновенную игру целиком. Ставка уже проверена и списана.
pub(crate) fn play_instant<R: RandomSource>(
    rng: &mut R,
    stake: Tokens,
    choice: &GameChoice,
) -> Result<Outcome, GameError> {
    let outcome = match choice {
        GameChoice::CoinFlip(call) => Outcome::CoinFlip(flip_coin(rng, stake, *call)),
        GameChoice::NumberGuess(guess) => Outcome::NumberGuess(resolve_guess(rng, stake, *guess)?),
        GameChoice::Dice(bet) => Outcome::Dice(roll_dice(rng, stake, *bet)?),
        GameChoice::Slots => Outcome::Slots(spin_slots(rng, stake)),
        GameChoice::Roulette(slip) => {
            if slip.is_empty() {
                return Err(ActionError::NoBetsPlaced.into());
            }
            Outcome::Roulette(spin_and_settle(rng, slip))
        }
        GameChoice::Poker => Outcome::Poker(deal_showdown(rng, stake)?),
        GameChoice::Blackjack => {
            return Err(ActionError::TurnBased(GameKind::Blackjack).into());
        }
    };
    Ok(outcome)
}
