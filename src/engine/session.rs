//! Сессия лобби: единственная ячейка баланса и не больше одного
//! активного раунда на все игры.

use tracing::{debug, info, warn};

use crate::domain::Tokens;
use crate::engine::blackjack::BlackjackTable;
use crate::engine::errors::{ActionError, ChoiceError, GameError};
use crate::engine::round::{
    play_instant, GameChoice, Outcome, Resolution, RoundAction, RoundHandle, RoundPhase,
    RoundState, Wager,
};
use crate::engine::validation::{check_minimum, validate_wager};
use crate::engine::RandomSource;
use crate::infra::config::LobbyConfig;
use crate::infra::ids::RoundIdGenerator;

/// Внутренний объект: раунд между ставкой и расчётом.
#[derive(Debug)]
enum ActiveRound {
    /// Мгновенная игра: исход уже известен, ждёт `settle`.
    Resolved {
        handle: RoundHandle,
        staked: Tokens,
        outcome: Outcome,
    },
    /// Блэкджек: ходы идут через `advance`.
    Blackjack {
        handle: RoundHandle,
        table: BlackjackTable,
    },
}

impl ActiveRound {
    fn handle(&self) -> RoundHandle {
        match self {
            ActiveRound::Resolved { handle, .. } | ActiveRound::Blackjack { handle, .. } => *handle,
        }
    }
}

/// Сессия игрока.
#[derive(Debug)]
pub struct Session {
    balance: Tokens,
    config: LobbyConfig,
    ids: RoundIdGenerator,
    active: Option<ActiveRound>,
}

impl Session {
    /// Сессия со стартовым балансом из конфига.
    pub fn new(config: LobbyConfig) -> Self {
        Self {
            balance: config.starting_balance,
            config,
            ids: RoundIdGenerator::new(),
            active: None,
        }
    }

    /// Сессия с конфигом по умолчанию и заданным балансом.
    pub fn with_balance(balance: Tokens) -> Self {
        let mut session = Self::new(LobbyConfig::default());
        session.balance = balance;
        session
    }

    /// Текущий баланс. Только чтение.
    pub fn balance(&self) -> Tokens {
        self.balance
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    pub fn active_round(&self) -> Option<RoundHandle> {
        self.active.as_ref().map(ActiveRound::handle)
    }

    pub fn has_active_round(&self) -> bool {
        self.active.is_some()
    }

    /// Принять ставку.
    ///
    /// Все проверки идут до RNG и до списания; после них ставка
    /// списывается, мгновенная игра разыгрывается целиком, а блэкджек
    /// раздаёт стартовые карты.
    pub fn place_wager<R: RandomSource>(
        &mut self,
        rng: &mut R,
        wager: Wager,
    ) -> Result<RoundHandle, GameError> {
        if let Err(err) = self.check_wager(&wager) {
            warn!(game = %wager.game(), stake = %wager.amount, %err, "wager rejected");
            return Err(err);
        }

        let handle = RoundHandle {
            round_id: self.ids.next_round_id(),
            game: wager.game(),
        };

        let active = match &wager.choice {
            GameChoice::Blackjack => {
                let mut table = BlackjackTable::new(rng);
                table.deal(wager.amount)?;
                ActiveRound::Blackjack { handle, table }
            }
            choice => ActiveRound::Resolved {
                handle,
                staked: wager.amount,
                outcome: play_instant(rng, wager.amount, choice)?,
            },
        };

        self.balance -= wager.amount;
        self.active = Some(active);

        info!(
            round = handle.round_id,
            game = %handle.game,
            stake = %wager.amount,
            balance = %self.balance,
            "wager accepted"
        );
        Ok(handle)
    }

    /// Ход в пошаговом раунде. При отказе состояние не меняется.
    pub fn advance(
        &mut self,
        handle: RoundHandle,
        action: RoundAction,
    ) -> Result<RoundState, GameError> {
        match self.active_for_mut(handle)? {
            ActiveRound::Blackjack { table, .. } => table.apply(action)?,
            ActiveRound::Resolved { .. } => {
                return Err(ActionError::NotTurnBased(handle.game).into());
            }
        }
        debug!(round = handle.round_id, ?action, "round advanced");
        self.round_state(handle)
    }

    /// Представление активного раунда для фронта.
    pub fn round_state(&self, handle: RoundHandle) -> Result<RoundState, GameError> {
        let state = match self.active_for(handle)? {
            ActiveRound::Resolved { outcome, .. } => {
                let (player_cards, dealer_cards) = match outcome {
                    Outcome::Poker(o) => (o.player_hand.cards().to_vec(), o.ai_hand.cards().to_vec()),
                    _ => (Vec::new(), Vec::new()),
                };
                RoundState {
                    round_id: handle.round_id,
                    game: handle.game,
                    phase: RoundPhase::Settled,
                    player_cards,
                    dealer_cards,
                    dealer_hole_hidden: false,
                    player_value: None,
                    dealer_value: None,
                    terminal: true,
                    outcome: Some(outcome.clone()),
                }
            }
            ActiveRound::Blackjack { table, .. } => RoundState {
                round_id: handle.round_id,
                game: handle.game,
                phase: table.phase(),
                player_cards: table.player_hand().cards().to_vec(),
                dealer_cards: table.visible_dealer_cards(),
                dealer_hole_hidden: table.dealer_hole_hidden(),
                player_value: Some(table.player_hand().value()),
                dealer_value: Some(table.visible_dealer_value()),
                terminal: table.is_settled(),
                outcome: table.outcome().map(Outcome::Blackjack),
            },
        };
        Ok(state)
    }

    /// Рассчитать завершённый раунд: зачислить выплату и освободить сессию.
    /// При переполнении баланса ничего не меняется.
    pub fn settle(&mut self, handle: RoundHandle) -> Result<Resolution, GameError> {
        let (staked, outcome) = match self.active_for(handle)? {
            ActiveRound::Resolved {
                staked, outcome, ..
            } => (*staked, outcome.clone()),
            ActiveRound::Blackjack { table, .. } => {
                let outcome = table.outcome().ok_or(ActionError::RoundNotFinished)?;
                (table.stake(), Outcome::Blackjack(outcome))
            }
        };

        let credited = outcome.credit();
        let new_balance = self.balance.checked_add(credited).ok_or(GameError::BalanceOverflow {
            balance: self.balance,
            credit: credited,
        })?;
        self.balance = new_balance;
        self.active = None;

        let resolution = Resolution {
            round_id: handle.round_id,
            game: handle.game,
            new_balance: self.balance,
            verdict: outcome.verdict(staked),
            staked,
            credited,
            payout_delta: credited.delta_from(staked),
            outcome,
        };

        info!(
            round = handle.round_id,
            game = %handle.game,
            verdict = ?resolution.verdict,
            delta = resolution.payout_delta,
            balance = %self.balance,
            "round settled"
        );
        Ok(resolution)
    }

    /// Ставка + расчёт одним вызовом для мгновенных игр.
    pub fn play<R: RandomSource>(
        &mut self,
        rng: &mut R,
        wager: Wager,
    ) -> Result<Resolution, GameError> {
        let game = wager.game();
        if game.is_turn_based() {
            return Err(ActionError::TurnBased(game).into());
        }
        let handle = self.place_wager(rng, wager)?;
        self.settle(handle)
    }

    fn check_wager(&self, wager: &Wager) -> Result<(), GameError> {
        if self.active.is_some() {
            return Err(ActionError::RoundInProgress.into());
        }
        wager.validate_choice()?;
        if let GameChoice::Roulette(slip) = &wager.choice {
            let max = self.config.max_roulette_bets;
            if slip.len() > max {
                return Err(ChoiceError::TooManyBets { max }.into());
            }
        }
        validate_wager(self.balance, wager.amount)?;
        check_minimum(wager.amount, self.config.min_stake)?;
        Ok(())
    }

    fn active_for(&self, handle: RoundHandle) -> Result<&ActiveRound, GameError> {
        let active = self.active.as_ref().ok_or(ActionError::NoActiveRound)?;
        if active.handle() != handle {
            return Err(ActionError::UnknownRound(handle.round_id).into());
        }
        Ok(active)
    }

    fn active_for_mut(&mut self, handle: RoundHandle) -> Result<&mut ActiveRound, GameError> {
        let active = self.active.as_mut().ok_or(ActionError::NoActiveRound)?;
        if active.handle() != handle {
            return Err(ActionError::UnknownRound(handle.round_id).into());
        }
        Ok(active)
    }
}
