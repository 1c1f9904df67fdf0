//! Блэкджек один на один с дилером.
//!
//! Фазы: `Betting → PlayerTurn → DealerTurn → Settled`.
//! Дилер добирает, пока у него меньше 17, и стоит на любых 17+.
//! Если колода кончилась во время добора дилера – принудительный push.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{Card, Deck, Hand, Tokens};
use crate::engine::errors::{ActionError, ChoiceError, GameError};
use crate::engine::round::{RoundAction, RoundPhase, Verdict};
use crate::engine::RandomSource;

/// Дилер останавливается на стольких очках и выше.
pub const DEALER_STANDS_ON: u8 = 17;

/// Выигрыш: ставка возвращается и столько же сверху.
pub const WIN_MULTIPLIER: u64 = 2;

/// Почему раунд закончился именно так.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettleReason {
    PlayerBust,
    DealerBust,
    HigherTotal,
    LowerTotal,
    EqualTotal,
    DeckExhausted,
}

/// Событие раунда. Фронт проигрывает их с задержками.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackEvent {
    Dealt { player: Vec<Card>, dealer_up: Card },
    PlayerHit { card: Card, value: u8 },
    PlayerStood { value: u8 },
    DealerRevealed { hole: Card, value: u8 },
    DealerDrew { card: Card, value: u8 },
    DealerStood { value: u8 },
    DeckExhausted,
    Settled { verdict: Verdict, reason: SettleReason },
}

/// Итог раунда блэкджека.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackOutcome {
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_value: u8,
    pub dealer_value: u8,
    pub verdict: Verdict,
    pub reason: SettleReason,
    pub credit: Tokens,
    pub history: Vec<BlackjackEvent>,
}

/// Стол блэкджека: колода раунда, две руки и фаза.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlackjackTable {
    phase: RoundPhase,
    deck: Deck,
    player: Hand,
    dealer: Hand,
    stake: Tokens,
    result: Option<(Verdict, SettleReason)>,
    history: Vec<BlackjackEvent>,
}

impl BlackjackTable {
    /// Новый стол в фазе `Betting` со свежей перемешанной колодой.
    pub fn new<R: RandomSource>(rng: &mut R) -> Self {
        Self::with_deck(Deck::shuffled(rng))
    }

    /// Стол с заранее подготовленной колодой.
    pub fn with_deck(deck: Deck) -> Self {
        Self {
            phase: RoundPhase::Betting,
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            stake: Tokens::ZERO,
            result: None,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    /// Полная рука дилера, включая закрытую карту.
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn stake(&self) -> Tokens {
        self.stake
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn history(&self) -> &[BlackjackEvent] {
        &self.history
    }

    pub fn result(&self) -> Option<(Verdict, SettleReason)> {
        self.result
    }

    pub fn is_settled(&self) -> bool {
        self.phase == RoundPhase::Settled
    }

    /// Пока игрок ходит, вторая карта дилера скрыта.
    pub fn dealer_hole_hidden(&self) -> bool {
        self.phase == RoundPhase::PlayerTurn
    }

    /// Карты дилера, которые видит игрок.
    pub fn visible_dealer_cards(&self) -> Vec<Card> {
        if self.dealer_hole_hidden() {
            self.dealer.cards().iter().take(1).copied().collect()
        } else {
            self.dealer.cards().to_vec()
        }
    }

    /// Очки видимой части руки дилера.
    pub fn visible_dealer_value(&self) -> u8 {
        Hand::from_cards(&self.visible_dealer_cards()).value()
    }

    /// `Betting → PlayerTurn`: по две карты игроку и дилеру.
    /// Баланс списывает сессия; стол только запоминает ставку.
    pub fn deal(&mut self, stake: Tokens) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::Betting)?;
        if stake.is_zero() {
            return Err(ChoiceError::ZeroStake.into());
        }
        if self.deck.len() < 4 {
            return Err(ActionError::DeckEmpty.into());
        }

        let cards = self.deck.draw_n(4);
        self.player.push(cards[0]);
        self.player.push(cards[1]);
        self.dealer.push(cards[2]);
        self.dealer.push(cards[3]);
        self.stake = stake;
        self.phase = RoundPhase::PlayerTurn;

        self.history.push(BlackjackEvent::Dealt {
            player: self.player.cards().to_vec(),
            dealer_up: cards[2],
        });
        debug!(
            player = self.player.value(),
            dealer_up = %cards[2],
            "blackjack dealt"
        );
        Ok(())
    }

    /// Взять карту. Перебор сразу завершает раунд проигрышем.
    /// На 21 брать нельзя, остаётся только `stand`.
    pub fn hit(&mut self) -> Result<Card, GameError> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        if self.player.value() >= crate::domain::BLACKJACK {
            return Err(ActionError::AlreadyTwentyOne.into());
        }
        let card = self.deck.draw_one().ok_or(ActionError::DeckEmpty)?;
        self.player.push(card);

        let value = self.player.value();
        self.history.push(BlackjackEvent::PlayerHit { card, value });
        debug!(%card, value, "player hit");

        if value > crate::domain::BLACKJACK {
            self.settle(Verdict::Lose, SettleReason::PlayerBust);
        }
        Ok(card)
    }

    /// Остановиться: ход переходит к дилеру, который доигрывает сразу.
    pub fn stand(&mut self) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        self.history.push(BlackjackEvent::PlayerStood {
            value: self.player.value(),
        });
        self.phase = RoundPhase::DealerTurn;
        self.play_dealer();
        Ok(())
    }

    pub fn apply(&mut self, action: RoundAction) -> Result<(), GameError> {
        match action {
            RoundAction::Hit => self.hit().map(|_| ()),
            RoundAction::Stand => self.stand(),
        }
    }

    /// Вернуться в `Betting` со свежей колодой и пустыми руками.
    /// Посреди раунда нельзя: начатый раунд доигрывается до конца.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), GameError> {
        match self.phase {
            RoundPhase::Betting | RoundPhase::Settled => {
                *self = Self::new(rng);
                Ok(())
            }
            actual => Err(ActionError::WrongPhase { actual }.into()),
        }
    }

    /// Валовое зачисление после расчёта.
    pub fn credit(&self) -> Option<Tokens> {
        self.result
            .map(|(verdict, _)| credit_for(verdict, self.stake))
    }

    pub fn outcome(&self) -> Option<BlackjackOutcome> {
        let (verdict, reason) = self.result?;
        Some(BlackjackOutcome {
            player_cards: self.player.cards().to_vec(),
            dealer_cards: self.dealer.cards().to_vec(),
            player_value: self.player.value(),
            dealer_value: self.dealer.value(),
            verdict,
            reason,
            credit: credit_for(verdict, self.stake),
            history: self.history.clone(),
        })
    }

    fn play_dealer(&mut self) {
        if let Some(&hole) = self.dealer.cards().get(1) {
            self.history.push(BlackjackEvent::DealerRevealed {
                hole,
                value: self.dealer.value(),
            });
        }

        while dealer_should_hit(&self.dealer) {
            match self.draw_for_dealer() {
                Ok(card) => {
                    self.dealer.push(card);
                    let value = self.dealer.value();
                    self.history.push(BlackjackEvent::DealerDrew { card, value });
                    debug!(%card, value, "dealer drew");
                }
                Err(_) => {
                    warn!(
                        dealer = self.dealer.value(),
                        "deck exhausted during dealer draw, forcing push"
                    );
                    self.history.push(BlackjackEvent::DeckExhausted);
                    self.settle(Verdict::Push, SettleReason::DeckExhausted);
                    return;
                }
            }
        }

        self.history.push(BlackjackEvent::DealerStood {
            value: self.dealer.value(),
        });
        let (verdict, reason) = compare_hands(&self.player, &self.dealer);
        self.settle(verdict, reason);
    }

    fn draw_for_dealer(&mut self) -> Result<Card, GameError> {
        self.deck.draw_one().ok_or(GameError::DeckExhausted)
    }

    fn settle(&mut self, verdict: Verdict, reason: SettleReason) {
        self.phase = RoundPhase::Settled;
        self.result = Some((verdict, reason));
        self.history.push(BlackjackEvent::Settled { verdict, reason });
        info!(
            ?verdict,
            ?reason,
            player = self.player.value(),
            dealer = self.dealer.value(),
            "blackjack settled"
        );
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ActionError::WrongPhase { actual: self.phase }.into())
        }
    }
}

/// Политика дилера: брать, пока меньше 17.
pub fn dealer_should_hit(dealer: &Hand) -> bool {
    dealer.value() < DEALER_STANDS_ON
}

/// Сравнить финальные руки.
pub fn compare_hands(player: &Hand, dealer: &Hand) -> (Verdict, SettleReason) {
    if player.is_bust() {
        return (Verdict::Lose, SettleReason::PlayerBust);
    }
    if dealer.is_bust() {
        return (Verdict::Win, SettleReason::DealerBust);
    }
    match player.value().cmp(&dealer.value()) {
        core::cmp::Ordering::Greater => (Verdict::Win, SettleReason::HigherTotal),
        core::cmp::Ordering::Less => (Verdict::Lose, SettleReason::LowerTotal),
        core::cmp::Ordering::Equal => (Verdict::Push, SettleReason::EqualTotal),
    }
}

pub fn credit_for(verdict: Verdict, stake: Tokens) -> Tokens {
    match verdict {
        Verdict::Win => stake.times(WIN_MULTIPLIER),
        Verdict::Push => stake,
        Verdict::Lose => Tokens::ZERO,
    }
}
