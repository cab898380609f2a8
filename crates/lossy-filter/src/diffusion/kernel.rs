//! Error diffusion kernel definitions.
//!
//! Kernels here are written in *gather* form: instead of listing where the
//! current pixel's error is pushed, each tap names an already finalized cell
//! (relative to the current pixel) whose stored error is pulled in. This lets
//! the ring keep one error per pixel and compute the forecast on demand.

/// An error diffusion kernel in gather form.
///
/// # Error Propagation
///
/// The diffused value is `round(sum(weight * error) / divisor)`, rounding
/// half away from zero. Both kernels here propagate 100% of error (weights
/// sum to the divisor).
///
/// # Buffer Sizing
///
/// `max_dy` is how many rows above the current one the kernel reads, so the
/// ring needs `max_dy + 1` rows. `reach` is the largest `|dx|`, so each row
/// is padded by `reach` cells on both sides.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: column offset from the current pixel (negative = left)
    /// - `dy`: rows above the current row (0 = current row, left of the pixel)
    /// - `weight`: numerator, divisor is separate
    pub taps: &'static [(i32, usize, i32)],

    /// Total divisor for normalizing weights.
    pub divisor: i32,

    /// Maximum dy value in taps.
    pub max_dy: usize,

    /// Maximum |dx| value in taps.
    pub reach: usize,
}

impl Kernel {
    /// Half the divisor, added (or subtracted for negative sums) before
    /// dividing so that rounding is symmetric around zero.
    #[inline]
    pub const fn half_weight(&self) -> i32 {
        self.divisor / 2
    }
}

/// Sierra (full/Sierra-3) kernel, used by the average-filter optimizer.
///
/// Pulls error from 10 finalized neighbors over the current row and the
/// two rows above (32/32):
///
/// ```text
///        2   3   2
///    2   4   5   4   2
///    3   5   X
/// ```
pub const SIERRA: Kernel = Kernel {
    taps: &[
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 0, 3),
        (-1, 0, 5),
    ],
    divisor: 32,
    max_dy: 2,
    reach: 2,
};

/// Floyd-Steinberg kernel, used by the Paeth-filter optimizer.
///
/// Pulls error from 4 finalized neighbors (16/16):
///
/// ```text
///    1   5   3
///    7   X
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    taps: &[
        (-1, 0, 7), // left
        (-1, 1, 1), // above-left
        (0, 1, 5),  // above
        (1, 1, 3),  // above-right
    ],
    divisor: 16,
    max_dy: 1,
    reach: 1,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(kernel: &Kernel) -> i32 {
        kernel.taps.iter().map(|&(_, _, w)| w).sum()
    }

    #[test]
    fn test_sierra_propagation_100_percent() {
        assert_eq!(weight_sum(&SIERRA), 32, "Sierra weights should sum to 32");
        assert_eq!(SIERRA.divisor, 32);
        assert_eq!(SIERRA.half_weight(), 16);
    }

    #[test]
    fn test_floyd_steinberg_propagation_100_percent() {
        assert_eq!(
            weight_sum(&FLOYD_STEINBERG),
            16,
            "Floyd-Steinberg weights should sum to 16"
        );
        assert_eq!(FLOYD_STEINBERG.divisor, 16);
        assert_eq!(FLOYD_STEINBERG.half_weight(), 8);
    }

    #[test]
    fn test_declared_extents_match_taps() {
        for kernel in [SIERRA, FLOYD_STEINBERG] {
            let max_dy = kernel.taps.iter().map(|&(_, dy, _)| dy).max().unwrap();
            let reach = kernel
                .taps
                .iter()
                .map(|&(dx, _, _)| dx.unsigned_abs() as usize)
                .max()
                .unwrap();
            assert_eq!(max_dy, kernel.max_dy);
            assert_eq!(reach, kernel.reach);
        }
    }

    #[test]
    fn test_current_row_taps_only_look_left() {
        // Cells at or right of the current pixel are not finalized yet
        for kernel in [SIERRA, FLOYD_STEINBERG] {
            for &(dx, dy, _) in kernel.taps {
                if dy == 0 {
                    assert!(dx < 0, "current-row tap at dx={} is not finalized", dx);
                }
            }
        }
    }

    #[test]
    fn test_kernel_entry_count() {
        assert_eq!(SIERRA.taps.len(), 10, "Sierra should have 10 taps");
        assert_eq!(
            FLOYD_STEINBERG.taps.len(),
            4,
            "Floyd-Steinberg should have 4 taps"
        );
    }
}
