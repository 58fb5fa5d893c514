use crate::CellCount;

/// Fraction of the fair multiplier retained by the house on every step.
pub const HOUSE_EDGE: f64 = 0.05;

/// Payout multiplier after `revealed_safe` safe reveals on a board of
/// `total_cells` cells holding `mine_count` mines.
///
/// Before any reveal the multiplier is exactly 1.0. While safe cells remain
/// it is `(T/S) * (S/R) * (1 - HOUSE_EDGE)` with `S = T - M` and `R` the
/// safe cells still hidden after this reveal. The reveal that exposes the
/// last safe cell pays [`max_multiplier`], the progressive form being
/// undefined at `R = 0`.
///
/// Callers must pass `1 <= mine_count < total_cells` and
/// `revealed_safe <= total_cells - mine_count`.
pub fn multiplier(revealed_safe: CellCount, total_cells: CellCount, mine_count: CellCount) -> f64 {
    debug_assert!(mine_count >= 1 && mine_count < total_cells);
    debug_assert!(revealed_safe <= total_cells - mine_count);

    let safe = total_cells - mine_count;
    if revealed_safe == 0 {
        return 1.0;
    }
    if revealed_safe >= safe {
        return max_multiplier(total_cells, mine_count);
    }

    let fair = f64::from(total_cells) / f64::from(safe);
    let progress = f64::from(safe) / f64::from(safe - revealed_safe);
    fair * progress * (1.0 - HOUSE_EDGE)
}

/// Multiplier paid for a full clear: `C(total_cells, mine_count)`, the
/// reciprocal of the probability that `T - M` blind reveals all land on
/// safe cells, under the same house edge. Also the preview figure shown
/// before betting.
pub fn max_multiplier(total_cells: CellCount, mine_count: CellCount) -> f64 {
    debug_assert!(mine_count >= 1 && mine_count < total_cells);

    // C(n, k) over the smaller k; finite in f64 through 32x32 boards,
    // +inf past that at near-half mine loads
    let k = mine_count.min(total_cells - mine_count);
    let mut odds = 1.0f64;
    for i in 0..k {
        odds *= f64::from(total_cells - i) / f64::from(i + 1);
    }
    odds * (1.0 - HOUSE_EDGE)
}
