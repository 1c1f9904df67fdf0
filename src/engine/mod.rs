//! Движок ставок: валидация, резолверы семи игр, сессия с балансом.
//!
//! Высокоуровневый объект: `Session`
//! Основные операции:
//!   - `place_wager` – проверить и списать ставку, сыграть/раздать раунд
//!   - `advance` – ход в пошаговой игре (блэкджек)
//!   - `settle` – зачислить выплату и закрыть раунд
//!
//! Каждый резолвер – чистая функция от RNG, ставки и выбора игрока.

pub mod blackjack;
pub mod coin_flip;
pub mod dice;
pub mod errors;
pub mod number_guess;
pub mod poker;
pub mod roulette;
pub mod round;
pub mod session;
pub mod slots;
pub mod validation;

pub use blackjack::{BlackjackEvent, BlackjackOutcome, BlackjackTable, SettleReason};
pub use coin_flip::{flip_coin, CoinFlipOutcome, CoinSide};
pub use dice::{roll_dice, DiceBet, DiceMode, DiceOutcome, DiceSelection, HighLow};
pub use errors::{ActionError, ChoiceError, GameError};
pub use number_guess::{resolve_guess, GuessOutcome, GuessTier};
pub use poker::{deal_showdown, showdown_from_deck, PokerOutcome};
pub use roulette::{BetSlip, RouletteBet, RouletteBetKind, RouletteOutcome};
pub use round::{
    GameChoice, Outcome, Resolution, RoundAction, RoundHandle, RoundPhase, RoundState, Verdict,
    Wager,
};
pub use session::Session;
pub use slots::{spin_slots, SlotGrid, SlotSymbol, SlotsOutcome};
pub use validation::validate_wager;

/// Источник случайности для всех исходов.
///
/// Все игры берут случайность только отсюда, поэтому его можно
/// подменить на сидированный или заскриптованный в тестах.
/// Реализации – в `infra::rng`.
pub trait RandomSource {
    /// Равномерное целое в `[0, n)`. Требуется `n > 0`.
    fn next_below(&mut self, n: u32) -> u32;

    /// Равномерное вещественное в `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Равномерная перестановка (Фишер–Йейтс поверх `next_below`).
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}
