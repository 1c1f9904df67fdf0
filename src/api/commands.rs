use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{GameKind, RoundId, Tokens};
use crate::engine::{
    ActionError, BetSlip, ChoiceError, CoinSide, DiceSelection, GameChoice, GameError,
    RandomSource, RouletteBet, RouletteBetKind, RoundAction, Session, Wager,
};

use super::dto::{CommandResponse, SettlementDto};
use super::errors::ApiError;
use super::resolve_handle;

/// Команда верхнего уровня: всё, что меняет сессию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Поставить и запустить раунд.
    PlaceWager(PlaceWagerCommand),

    /// Ход в пошаговом раунде (блэкджек).
    Advance(AdvanceCommand),

    /// Рассчитать раунд и зачислить выплату.
    Settle(SettleCommand),
}

/// Ставка в том виде, в каком её шлёт фронт.
///
/// Выбор приходит "как есть": незаполненные поля ловятся здесь,
/// а не молча подменяются значениями по умолчанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceWagerCommand {
    pub game: GameKind,
    pub amount: Tokens,
    #[serde(default)]
    pub choice: ChoiceDto,
}

/// Поля выбора для всех игр сразу; нужное зависит от `game`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChoiceDto {
    pub coin_side: Option<CoinSide>,
    pub guess: Option<u8>,
    pub dice: Option<DiceSelection>,
    pub roulette_bets: Vec<RouletteBetDto>,
}

/// Одна ставка рулетки. Для внешних ставок `numbers` пустой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteBetDto {
    pub kind: RouletteBetKind,
    #[serde(default)]
    pub numbers: Vec<u8>,
    pub amount: Tokens,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvanceCommand {
    pub round_id: RoundId,
    pub action: RoundAction,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettleCommand {
    pub round_id: RoundId,
}

impl PlaceWagerCommand {
    /// Собрать доменную ставку. Лимит слипа берётся из конфига сессии.
    pub fn into_wager(self, max_roulette_bets: usize) -> Result<Wager, GameError> {
        let choice = match self.game {
            GameKind::CoinFlip => GameChoice::CoinFlip(
                self.choice
                    .coin_side
                    .ok_or(ChoiceError::MissingSelection("coin side"))?,
            ),
            GameKind::NumberGuess => GameChoice::NumberGuess(
                self.choice
                    .guess
                    .ok_or(ChoiceError::MissingSelection("guess"))?,
            ),
            GameKind::Dice => GameChoice::Dice(
                self.choice
                    .dice
                    .ok_or(ChoiceError::MissingSelection("dice mode"))?
                    .into_bet()?,
            ),
            GameKind::Slots => GameChoice::Slots,
            GameKind::Roulette => {
                if self.choice.roulette_bets.is_empty() {
                    return Err(ActionError::NoBetsPlaced.into());
                }
                let mut slip = BetSlip::with_limit(max_roulette_bets);
                for bet in &self.choice.roulette_bets {
                    slip.add_bet(RouletteBet::new(bet.kind, &bet.numbers, bet.amount)?)?;
                }
                GameChoice::Roulette(slip)
            }
            GameKind::Blackjack => GameChoice::Blackjack,
            GameKind::Poker => GameChoice::Poker,
        };
        Ok(Wager::new(self.amount, choice))
    }
}

/// Выполнить команду над сессией.
pub fn handle_command<R: RandomSource>(
    session: &mut Session,
    rng: &mut R,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    debug!(?command, "handling command");
    match command {
        Command::PlaceWager(cmd) => {
            if session.has_active_round() {
                return Err(GameError::from(ActionError::RoundInProgress).into());
            }
            let wager = cmd.into_wager(session.config().max_roulette_bets)?;
            let handle = session.place_wager(rng, wager)?;
            let state = session.round_state(handle)?;
            Ok(CommandResponse::WagerPlaced {
                balance: session.balance(),
                state,
            })
        }
        Command::Advance(cmd) => {
            let handle = resolve_handle(session, cmd.round_id)?;
            let state = session.advance(handle, cmd.action)?;
            Ok(CommandResponse::RoundAdvanced(state))
        }
        Command::Settle(cmd) => {
            let handle = resolve_handle(session, cmd.round_id)?;
            let resolution = session.settle(handle)?;
            Ok(CommandResponse::Settled(SettlementDto::from(resolution)))
        }
    }
}

/// JSON-вход для браузерного хоста: строка команды, строка ответа.
pub fn handle_command_json<R: RandomSource>(
    session: &mut Session,
    rng: &mut R,
    raw: &str,
) -> Result<String, ApiError> {
    let command: Command = serde_json::from_str(raw)?;
    let response = handle_command(session, rng, command)?;
    serde_json::to_string(&response).map_err(|err| ApiError::Internal(err.to_string()))
}
