//! Слот 3×3: пять линий (три ряда и две диагонали).
//!
//! Каждая клетка тянется независимо по фиксированным весам:
//! чем реже символ, тем дороже линия из трёх таких символов.
//! Выигрыш линии = ставка × value / 10, линии суммируются.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Tokens;
use crate::engine::RandomSource;

/// Сумма весов всех символов.
pub const TOTAL_WEIGHT: u32 = 100;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Orange,
    Diamond,
    Seven,
    Jackpot,
}

impl SlotSymbol {
    /// В порядке убывания частоты; на этом порядке построен выбор по весам.
    pub const ALL: [SlotSymbol; 6] = [
        SlotSymbol::Cherry,
        SlotSymbol::Lemon,
        SlotSymbol::Orange,
        SlotSymbol::Diamond,
        SlotSymbol::Seven,
        SlotSymbol::Jackpot,
    ];

    /// Стоимость символа; линия платит `stake × value / 10`.
    pub fn value(self) -> u64 {
        match self {
            SlotSymbol::Cherry => 10,
            SlotSymbol::Lemon => 20,
            SlotSymbol::Orange => 30,
            SlotSymbol::Diamond => 50,
            SlotSymbol::Seven => 100,
            SlotSymbol::Jackpot => 200,
        }
    }

    /// Вес из `TOTAL_WEIGHT`.
    pub fn weight(self) -> u32 {
        match self {
            SlotSymbol::Cherry => 30,
            SlotSymbol::Lemon => 25,
            SlotSymbol::Orange => 20,
            SlotSymbol::Diamond => 15,
            SlotSymbol::Seven => 8,
            SlotSymbol::Jackpot => 2,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SlotSymbol::Cherry => "🍒",
            SlotSymbol::Lemon => "🍋",
            SlotSymbol::Orange => "🍊",
            SlotSymbol::Diamond => "💎",
            SlotSymbol::Seven => "7️⃣",
            SlotSymbol::Jackpot => "🎰",
        }
    }

    /// Символ по числу из `[0, TOTAL_WEIGHT)`.
    pub fn from_roll(roll: u32) -> SlotSymbol {
        let mut acc = 0;
        for symbol in SlotSymbol::ALL {
            acc += symbol.weight();
            if roll < acc {
                return symbol;
            }
        }
        SlotSymbol::Jackpot
    }
}

/// Линия выплат.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PayLine {
    Row(u8),
    /// (0,0) → (2,2)
    Diagonal,
    /// (0,2) → (2,0)
    AntiDiagonal,
}

/// Ровно пять линий, других нет.
pub const PAY_LINES: [PayLine; 5] = [
    PayLine::Row(0),
    PayLine::Row(1),
    PayLine::Row(2),
    PayLine::Diagonal,
    PayLine::AntiDiagonal,
];

/// Сетка 3×3, индексация `[row][col]`. Каждый спин – новая сетка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotGrid {
    pub rows: [[SlotSymbol; 3]; 3],
}

impl SlotGrid {
    pub fn from_rows(rows: [[SlotSymbol; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Новая сетка: девять независимых розыгрышей, по рядам.
    pub fn spin<R: RandomSource>(rng: &mut R) -> Self {
        let mut rows = [[SlotSymbol::Cherry; 3]; 3];
        for row in rows.iter_mut() {
            for cell in row.iter_mut() {
                *cell = SlotSymbol::from_roll(rng.next_below(TOTAL_WEIGHT));
            }
        }
        Self { rows }
    }

    pub fn line(&self, line: PayLine) -> [SlotSymbol; 3] {
        let g = &self.rows;
        match line {
            PayLine::Row(r) => g[usize::from(r.min(2))],
            PayLine::Diagonal => [g[0][0], g[1][1], g[2][2]],
            PayLine::AntiDiagonal => [g[0][2], g[1][1], g[2][0]],
        }
    }
}

/// Выигравшая линия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineWin {
    pub line: PayLine,
    pub symbol: SlotSymbol,
    pub payout: Tokens,
}

/// Исход спина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsOutcome {
    pub grid: SlotGrid,
    pub wins: Vec<LineWin>,
    /// Сумма по всем линиям; ноль – ставка просто не возвращается.
    pub credit: Tokens,
}

/// Проверить все пять линий: линия выигрывает, если три символа одинаковы.
pub fn evaluate_grid(grid: &SlotGrid, stake: Tokens) -> Vec<LineWin> {
    PAY_LINES
        .iter()
        .filter_map(|&line| {
            let [a, b, c] = grid.line(line);
            (a == b && b == c).then(|| LineWin {
                line,
                symbol: a,
                payout: stake.tenths(a.value()),
            })
        })
        .collect()
}

pub fn spin_slots<R: RandomSource>(rng: &mut R, stake: Tokens) -> SlotsOutcome {
    let grid = SlotGrid::spin(rng);
    settle_grid(grid, stake)
}

/// Рассчитать готовую сетку (тесты, реплей).
pub fn settle_grid(grid: SlotGrid, stake: Tokens) -> SlotsOutcome {
    let wins = evaluate_grid(&grid, stake);
    let credit = wins.iter().map(|w| w.payout).sum();

    debug!(lines = wins.len(), %credit, "reels stopped");

    SlotsOutcome { grid, wins, credit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_cover_the_whole_range() {
        let total: u32 = SlotSymbol::ALL.iter().map(|s| s.weight()).sum();
        assert_eq!(total, TOTAL_WEIGHT);
    }

    #[test]
    fn rarer_symbol_pays_more() {
        for pair in SlotSymbol::ALL.windows(2) {
            assert!(pair[0].weight() > pair[1].weight());
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn roll_boundaries_map_to_expected_symbols() {
        assert_eq!(SlotSymbol::from_roll(0), SlotSymbol::Cherry);
        assert_eq!(SlotSymbol::from_roll(29), SlotSymbol::Cherry);
        assert_eq!(SlotSymbol::from_roll(30), SlotSymbol::Lemon);
        assert_eq!(SlotSymbol::from_roll(97), SlotSymbol::Seven);
        assert_eq!(SlotSymbol::from_roll(98), SlotSymbol::Jackpot);
        assert_eq!(SlotSymbol::from_roll(99), SlotSymbol::Jackpot);
    }
}
