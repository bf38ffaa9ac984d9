//! Percentage arithmetic shared by both progress fields.

/// Sentinel stored in a percent field when its bar should be hidden.
pub const HIDDEN: f32 = -1.0;

/// Upper bound of every stored percentage.
pub const MAX_PERCENT: f32 = 100.0;

/// Compute `min(100, 100 * current / total)` using integer division.
///
/// Returns `None` when `total` is zero; callers leave the stored value
/// untouched in that case.
pub fn percent_of(current: u64, total: u64) -> Option<f32> {
    if total == 0 {
        return None;
    }

    // Widen so `current * 100` cannot overflow
    let percent = u128::from(current) * 100 / u128::from(total);
    Some((percent as f32).min(MAX_PERCENT))
}

/// Whether a stored percent should be drawn.
pub fn is_visible(percent: f32) -> bool {
    percent > HIDDEN
}
