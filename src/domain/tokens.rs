use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество токенов. Обёртка над u64, чтобы не путать с обычными числами.
///
/// Баланс не бывает отрицательным или дробным: операторы `+`/`-`
/// насыщающие, а для проверок есть `checked_add` и `checked_sub`.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct Tokens(pub u64);

impl Tokens {
    pub const ZERO: Tokens = Tokens(0);

    pub const fn new(amount: u64) -> Self {
        Tokens(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, other: Tokens) -> Option<Tokens> {
        self.0.checked_sub(other.0).map(Tokens)
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Tokens) -> Tokens {
        Tokens(self.0.saturating_sub(other.0))
    }

    /// `self × k` с насыщением.
    pub fn times(self, k: u64) -> Tokens {
        Tokens(self.0.saturating_mul(k))
    }

    /// `⌊self × tenths / 10⌋` – выплаты вида "ставка × value/10".
    pub fn tenths(self, tenths: u64) -> Tokens {
        Tokens(self.0.saturating_mul(tenths) / 10)
    }

    /// Половина с округлением вниз.
    pub fn half(self) -> Tokens {
        Tokens(self.0 / 2)
    }

    pub fn checked_add(self, other: Tokens) -> Option<Tokens> {
        self.0.checked_add(other.0).map(Tokens)
    }

    /// Знаковая разница `self - before` (чистый результат раунда).
    pub fn delta_from(self, before: Tokens) -> i64 {
        let diff = i128::from(self.0) - i128::from(before.0);
        diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Tokens {
    type Output = Tokens;

    fn add(self, rhs: Tokens) -> Self::Output {
        Tokens(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Tokens {
    fn add_assign(&mut self, rhs: Tokens) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Tokens {
    type Output = Tokens;

    fn sub(self, rhs: Tokens) -> Self::Output {
        Tokens(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Tokens {
    fn sub_assign(&mut self, rhs: Tokens) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Tokens {
    fn sum<I: Iterator<Item = Tokens>>(iter: I) -> Self {
        iter.fold(Tokens::ZERO, |acc, t| acc + t)
    }
}

impl<'a> Sum<&'a Tokens> for Tokens {
    fn sum<I: Iterator<Item = &'a Tokens>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
