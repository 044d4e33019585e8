//! Contrast stretching.

/// Lower bound of the robust stretch, in percent.
pub const LOW_PERCENTILE: f64 = 2.0;
/// Upper bound of the robust stretch, in percent.
pub const HIGH_PERCENTILE: f64 = 98.0;

/// Value range a stretch maps onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchRange {
    pub low: f32,
    pub high: f32,
}

impl StretchRange {
    /// Map `value` to `[0, 1]`, clipping outside the range.
    ///
    /// A degenerate range maps everything to 0. Non-finite input stays NaN.
    pub fn normalize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return f32::NAN;
        }
        let span = self.high - self.low;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - self.low) / span).clamp(0.0, 1.0)
    }
}

/// Percentiles of the finite values, with linear interpolation between
/// closest ranks. `percents` are in `[0, 100]`.
///
/// Returns `None` if no value is finite.
pub fn percentiles<'a, I>(values: I, percents: &[f64]) -> Option<Vec<f32>>
where
    I: IntoIterator<Item = &'a f32>,
{
    let mut sorted: Vec<f32> = values.into_iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable_by(f32::total_cmp);

    let last = (sorted.len() - 1) as f64;
    Some(
        percents
            .iter()
            .map(|p| {
                let rank = (p.clamp(0.0, 100.0) / 100.0) * last;
                let lo = rank.floor() as usize;
                let hi = rank.ceil() as usize;
                let frac = rank - lo as f64;
                (sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac) as f32
            })
            .collect(),
    )
}

/// 2nd to 98th percentile range of the finite values.
pub fn robust_range<'a, I>(values: I) -> Option<StretchRange>
where
    I: IntoIterator<Item = &'a f32>,
{
    let p = percentiles(values, &[LOW_PERCENTILE, HIGH_PERCENTILE])?;
    Some(StretchRange {
        low: p[0],
        high: p[1],
    })
}

/// Smallest and largest finite values.
pub fn finite_min_max(values: &[f32]) -> Option<StretchRange> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some(StretchRange { low: v, high: v }),
            Some(r) => Some(StretchRange {
                low: r.low.min(v),
                high: r.high.max(v),
            }),
        })
}
