//! Block-height arithmetic for vote periods and slash windows.

/// Whether `height` is the final block of a period of `period` blocks.
///
/// Periods are aligned to height zero, so the last block of each period is the one
/// whose successor is a multiple of `period`. A zero-length period never ends.
pub fn is_period_last_block(height: u64, period: u64) -> bool {
    period != 0 && height.checked_add(1).is_some_and(|next| next % period == 0)
}

/// Index of the period containing `height`.
pub fn period_index(height: u64, period: u64) -> u64 {
    if period == 0 {
        return 0;
    }
    height / period
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_block_of_period() {
        assert!(is_period_last_block(9, 10));
        assert!(is_period_last_block(19, 10));
        assert!(!is_period_last_block(10, 10));
        assert!(!is_period_last_block(0, 10));
    }

    #[test]
    fn last_representable_height_does_not_overflow() {
        assert!(!is_period_last_block(u64::MAX, 1));
        assert!(!is_period_last_block(u64::MAX, 10));
        assert!(is_period_last_block(u64::MAX - 1, 3));
    }

    #[test]
    fn every_block_ends_a_unit_period() {
        assert!((0..20).all(|h| is_period_last_block(h, 1)));
    }

    #[test]
    fn zero_period_never_ends() {
        assert!(!is_period_last_block(0, 0));
        assert_eq!(period_index(42, 0), 0);
    }

    #[test]
    fn index_counts_whole_periods() {
        assert_eq!(period_index(0, 10), 0);
        assert_eq!(period_index(9, 10), 0);
        assert_eq!(period_index(10, 10), 1);
    }
}
