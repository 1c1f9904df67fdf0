use thiserror::Error;

use crate::domain::{GameKind, RoundId, Tokens};
use crate::engine::roulette::RouletteBetKind;
use crate::engine::round::RoundPhase;

/// Ошибки движка ставок.
///
/// Любой отказ локальный и не меняет состояние: баланс не списан,
/// RNG не тронут, раунд остался как был.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Недостаточно токенов: ставка {stake}, баланс {balance}")]
    InsufficientFunds { stake: Tokens, balance: Tokens },

    #[error("Некорректный выбор: {0}")]
    InvalidChoice(#[from] ChoiceError),

    #[error("Недопустимое действие: {0}")]
    InvalidAction(#[from] ActionError),

    /// Колода кончилась во время добора дилера. Наружу не выходит:
    /// блэкджек превращает это в принудительный push.
    #[error("Колода закончилась")]
    DeckExhausted,

    /// Зачисление не помещается в баланс. Раунд остаётся нерассчитанным.
    #[error("Переполнение баланса: баланс {balance}, зачисление {credit}")]
    BalanceOverflow { balance: Tokens, credit: Tokens },
}

/// Почему не принят выбор игрока (ставка, число, набор номеров).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChoiceError {
    #[error("ставка должна быть больше нуля")]
    ZeroStake,

    #[error("ставка {stake} меньше минимальной {min}")]
    BelowMinimum { stake: Tokens, min: Tokens },

    #[error("выбор не задан: {0}")]
    MissingSelection(&'static str),

    #[error("число {0} вне диапазона 1..=100")]
    GuessOutOfRange(u8),

    #[error("грань кубика {0} вне диапазона 1..=6")]
    DieFaceOutOfRange(u8),

    #[error("ставка {kind:?} требует {expected} номеров, передано {got}")]
    WrongCardinality {
        kind: RouletteBetKind,
        expected: usize,
        got: usize,
    },

    #[error("номер {0} вне колеса 0..=36")]
    PocketOutOfRange(u8),

    #[error("номер {0} указан дважды")]
    DuplicatePocket(u8),

    #[error("в купоне уже {max} ставок")]
    TooManyBets { max: usize },

    #[error("нет ставки с индексом {0}")]
    BetIndexOutOfRange(usize),

    #[error("сумма ставки {stake} не совпадает с суммой купона {total}")]
    SlipTotalMismatch { stake: Tokens, total: Tokens },
}

/// Почему отклонено действие над раундом.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("раунд уже идёт")]
    RoundInProgress,

    #[error("нет активного раунда")]
    NoActiveRound,

    #[error("раунд {0} не найден")]
    UnknownRound(RoundId),

    #[error("игра {0} не принимает ходов")]
    NotTurnBased(GameKind),

    #[error("игра {0} пошаговая, её нельзя сыграть одним вызовом")]
    TurnBased(GameKind),

    #[error("действие недоступно в фазе {actual:?}")]
    WrongPhase { actual: RoundPhase },

    #[error("раунд ещё не завершён")]
    RoundNotFinished,

    #[error("ставки не сделаны")]
    NoBetsPlaced,

    #[error("в колоде не осталось карт")]
    DeckEmpty,

    #[error("у игрока уже 21, можно только остановиться")]
    AlreadyTwentyOne,
}
