//! Европейская рулетка (37 номеров, один зеро) с несколькими ставками на спин.
//!
//! Купон (`BetSlip`) копится до спина; сумма всех ставок списывается
//! разом, затем каждая ставка судится независимо.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Tokens;
use crate::engine::errors::ChoiceError;
use crate::engine::RandomSource;

/// Количество номеров на колесе: 0..=36.
pub const POCKETS: u8 = 37;

/// Лимит ставок в одном купоне по умолчанию.
pub const DEFAULT_MAX_BETS: usize = 20;

/// Физический порядок номеров на европейском колесе (для отрисовки).
pub const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Цвет номера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PocketColor {
    Green,
    Red,
    Black,
}

pub fn pocket_color(pocket: u8) -> PocketColor {
    if pocket == 0 {
        PocketColor::Green
    } else if RED_NUMBERS.contains(&pocket) {
        PocketColor::Red
    } else {
        PocketColor::Black
    }
}

/// Позиция номера на колесе (индекс в `WHEEL_ORDER`).
pub fn wheel_slot(pocket: u8) -> Option<usize> {
    WHEEL_ORDER.iter().position(|&p| p == pocket)
}

/// Вид ставки. Внутренние ставки несут явный набор номеров,
/// внешние покрывают фиксированные таблицы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RouletteBetKind {
    Straight,
    Split,
    Street,
    Corner,
    Line,
    Red,
    Black,
    Even,
    Odd,
    Low,
    High,
    Dozen1,
    Dozen2,
    Dozen3,
    Column1,
    Column2,
    Column3,
}

impl RouletteBetKind {
    pub const ALL: [RouletteBetKind; 17] = [
        RouletteBetKind::Straight,
        RouletteBetKind::Split,
        RouletteBetKind::Street,
        RouletteBetKind::Corner,
        RouletteBetKind::Line,
        RouletteBetKind::Red,
        RouletteBetKind::Black,
        RouletteBetKind::Even,
        RouletteBetKind::Odd,
        RouletteBetKind::Low,
        RouletteBetKind::High,
        RouletteBetKind::Dozen1,
        RouletteBetKind::Dozen2,
        RouletteBetKind::Dozen3,
        RouletteBetKind::Column1,
        RouletteBetKind::Column2,
        RouletteBetKind::Column3,
    ];

    /// Выплата "к одному": выигрыш = сумма × множитель (плюс возврат ставки).
    pub fn payout_multiplier(self) -> u64 {
        match self {
            RouletteBetKind::Straight => 35,
            RouletteBetKind::Split => 17,
            RouletteBetKind::Street => 11,
            RouletteBetKind::Corner => 8,
            RouletteBetKind::Line => 5,
            RouletteBetKind::Dozen1
            | RouletteBetKind::Dozen2
            | RouletteBetKind::Dozen3
            | RouletteBetKind::Column1
            | RouletteBetKind::Column2
            | RouletteBetKind::Column3 => 2,
            RouletteBetKind::Red
            | RouletteBetKind::Black
            | RouletteBetKind::Even
            | RouletteBetKind::Odd
            | RouletteBetKind::Low
            | RouletteBetKind::High => 1,
        }
    }

    /// Сколько номеров покрывает ставка.
    pub fn cardinality(self) -> usize {
        match self {
            RouletteBetKind::Straight => 1,
            RouletteBetKind::Split => 2,
            RouletteBetKind::Street => 3,
            RouletteBetKind::Corner => 4,
            RouletteBetKind::Line => 6,
            RouletteBetKind::Dozen1
            | RouletteBetKind::Dozen2
            | RouletteBetKind::Dozen3
            | RouletteBetKind::Column1
            | RouletteBetKind::Column2
            | RouletteBetKind::Column3 => 12,
            _ => 18,
        }
    }

    /// Внутренняя ставка: номера выбирает игрок.
    pub fn is_inside(self) -> bool {
        matches!(
            self,
            RouletteBetKind::Straight
                | RouletteBetKind::Split
                | RouletteBetKind::Street
                | RouletteBetKind::Corner
                | RouletteBetKind::Line
        )
    }

    /// Таблица принадлежности для внешних ставок. Зеро не входит ни в одну.
    pub fn table_covers(self, pocket: u8) -> bool {
        if pocket == 0 || pocket >= POCKETS {
            return false;
        }
        match self {
            RouletteBetKind::Red => pocket_color(pocket) == PocketColor::Red,
            RouletteBetKind::Black => pocket_color(pocket) == PocketColor::Black,
            RouletteBetKind::Even => pocket % 2 == 0,
            RouletteBetKind::Odd => pocket % 2 == 1,
            RouletteBetKind::Low => pocket <= 18,
            RouletteBetKind::High => pocket >= 19,
            RouletteBetKind::Dozen1 => pocket <= 12,
            RouletteBetKind::Dozen2 => (13..=24).contains(&pocket),
            RouletteBetKind::Dozen3 => pocket >= 25,
            RouletteBetKind::Column1 => pocket % 3 == 1,
            RouletteBetKind::Column2 => pocket % 3 == 2,
            RouletteBetKind::Column3 => pocket % 3 == 0,
            _ => false,
        }
    }
}

/// Одна ставка на поле.
///
/// Десериализация идёт через `RouletteBet::new`, поэтому ставка из JSON
/// проходит те же проверки, что и собранная в коде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRouletteBet")]
pub struct RouletteBet {
    kind: RouletteBetKind,
    numbers: Vec<u8>,
    amount: Tokens,
}

/// Ставка "как пришла" до проверки.
#[derive(Deserialize)]
struct RawRouletteBet {
    kind: RouletteBetKind,
    #[serde(default)]
    numbers: Vec<u8>,
    amount: Tokens,
}

impl TryFrom<RawRouletteBet> for RouletteBet {
    type Error = ChoiceError;

    fn try_from(raw: RawRouletteBet) -> Result<Self, Self::Error> {
        // Внешняя ставка после сериализации несёт номера из таблицы.
        if !raw.kind.is_inside() && !raw.numbers.is_empty() {
            let table: Vec<u8> = (1..POCKETS).filter(|&p| raw.kind.table_covers(p)).collect();
            let mut numbers = raw.numbers;
            numbers.sort_unstable();
            if numbers == table {
                return RouletteBet::new(raw.kind, &[], raw.amount);
            }
            return RouletteBet::new(raw.kind, &numbers, raw.amount);
        }
        RouletteBet::new(raw.kind, &raw.numbers, raw.amount)
    }
}

impl RouletteBet {
    /// Создать ставку с проверкой: число номеров строго равно
    /// мощности вида, номера в 0..=36 и не повторяются.
    /// Для внешних ставок номера берутся из таблицы, а `numbers`
    /// должен быть пустым.
    pub fn new(
        kind: RouletteBetKind,
        numbers: &[u8],
        amount: Tokens,
    ) -> Result<Self, ChoiceError> {
        if amount.is_zero() {
            return Err(ChoiceError::ZeroStake);
        }

        if !kind.is_inside() {
            if !numbers.is_empty() {
                return Err(ChoiceError::WrongCardinality {
                    kind,
                    expected: 0,
                    got: numbers.len(),
                });
            }
            let numbers = (1..POCKETS).filter(|&p| kind.table_covers(p)).collect();
            return Ok(Self {
                kind,
                numbers,
                amount,
            });
        }

        if numbers.len() != kind.cardinality() {
            return Err(ChoiceError::WrongCardinality {
                kind,
                expected: kind.cardinality(),
                got: numbers.len(),
            });
        }

        let mut sorted = Vec::with_capacity(numbers.len());
        for &n in numbers {
            if n >= POCKETS {
                return Err(ChoiceError::PocketOutOfRange(n));
            }
            if sorted.contains(&n) {
                return Err(ChoiceError::DuplicatePocket(n));
            }
            sorted.push(n);
        }
        sorted.sort_unstable();

        Ok(Self {
            kind,
            numbers: sorted,
            amount,
        })
    }

    pub fn straight(pocket: u8, amount: Tokens) -> Result<Self, ChoiceError> {
        Self::new(RouletteBetKind::Straight, &[pocket], amount)
    }

    /// Внешняя ставка (цвет, чёт/нечет, половина, дюжина, колонка).
    pub fn outside(kind: RouletteBetKind, amount: Tokens) -> Result<Self, ChoiceError> {
        Self::new(kind, &[], amount)
    }

    pub fn kind(&self) -> RouletteBetKind {
        self.kind
    }

    pub fn amount(&self) -> Tokens {
        self.amount
    }

    /// Покрытые номера по возрастанию; размер всегда равен мощности вида.
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn payout_multiplier(&self) -> u64 {
        self.kind.payout_multiplier()
    }

    pub fn covers(&self, pocket: u8) -> bool {
        if self.kind.is_inside() {
            self.numbers.contains(&pocket)
        } else {
            self.kind.table_covers(pocket)
        }
    }
}

fn default_max_bets() -> usize {
    DEFAULT_MAX_BETS
}

/// Купон ставок до спина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawBetSlip")]
pub struct BetSlip {
    bets: Vec<RouletteBet>,
    max_bets: usize,
}

#[derive(Deserialize)]
struct RawBetSlip {
    bets: Vec<RouletteBet>,
    #[serde(default = "default_max_bets")]
    max_bets: usize,
}

impl TryFrom<RawBetSlip> for BetSlip {
    type Error = ChoiceError;

    fn try_from(raw: RawBetSlip) -> Result<Self, Self::Error> {
        let mut slip = BetSlip::with_limit(raw.max_bets);
        for bet in raw.bets {
            slip.add_bet(bet)?;
        }
        Ok(slip)
    }
}

impl Default for BetSlip {
    fn default() -> Self {
        Self::new()
    }
}

impl BetSlip {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_BETS)
    }

    pub fn with_limit(max_bets: usize) -> Self {
        Self {
            bets: Vec::new(),
            max_bets,
        }
    }

    pub fn add_bet(&mut self, bet: RouletteBet) -> Result<(), ChoiceError> {
        if self.bets.len() >= self.max_bets {
            return Err(ChoiceError::TooManyBets { max: self.max_bets });
        }
        self.bets.push(bet);
        Ok(())
    }

    pub fn remove_bet(&mut self, index: usize) -> Result<RouletteBet, ChoiceError> {
        if index >= self.bets.len() {
            return Err(ChoiceError::BetIndexOutOfRange(index));
        }
        Ok(self.bets.remove(index))
    }

    pub fn clear(&mut self) {
        self.bets.clear();
    }

    pub fn bets(&self) -> &[RouletteBet] {
        &self.bets
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    pub fn max_bets(&self) -> usize {
        self.max_bets
    }

    /// Сумма всех ставок – столько списывается перед спином.
    pub fn total(&self) -> Tokens {
        self.bets.iter().map(RouletteBet::amount).sum()
    }
}

/// Результат одной ставки после спина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetResult {
    pub bet: RouletteBet,
    pub won: bool,
    /// Чистый выигрыш: сумма × множитель.
    pub winnings: Tokens,
    /// Зачисление: выигрыш + возврат ставки, либо ноль.
    pub credit: Tokens,
}

/// Исход спина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteOutcome {
    pub pocket: u8,
    pub color: PocketColor,
    pub results: Vec<BetResult>,
    pub total_winnings: Tokens,
    pub credit: Tokens,
}

/// Равномерный номер из 37.
pub fn spin_wheel<R: RandomSource>(rng: &mut R) -> u8 {
    rng.next_below(u32::from(POCKETS)) as u8
}

/// Рассчитать все ставки купона на выпавший номер.
pub fn settle_bets(bets: &[RouletteBet], pocket: u8) -> RouletteOutcome {
    let results: Vec<BetResult> = bets
        .iter()
        .map(|bet| {
            let won = bet.covers(pocket);
            let winnings = if won {
                bet.amount.times(bet.payout_multiplier())
            } else {
                Tokens::ZERO
            };
            let credit = if won { winnings + bet.amount } else { Tokens::ZERO };
            BetResult {
                bet: bet.clone(),
                won,
                winnings,
                credit,
            }
        })
        .collect();

    let total_winnings = results.iter().map(|r| r.winnings).sum();
    let credit = results.iter().map(|r| r.credit).sum();

    RouletteOutcome {
        pocket,
        color: pocket_color(pocket),
        results,
        total_winnings,
        credit,
    }
}

/// Крутануть колесо и рассчитать купон.
pub fn spin_and_settle<R: RandomSource>(rng: &mut R, slip: &BetSlip) -> RouletteOutcome {
    let pocket = spin_wheel(rng);
    let outcome = settle_bets(slip.bets(), pocket);

    debug!(
        pocket,
        bets = slip.len(),
        winnings = %outcome.total_winnings,
        "wheel stopped"
    );

    outcome
}
