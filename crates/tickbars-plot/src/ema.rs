//! Exponential moving average.

use ta::Next;
use ta::indicators::ExponentialMovingAverage;

use crate::PlotError;

/// Computes the exponential moving average of `values` with the given span.
///
/// Uses `alpha = 2 / (span + 1)` and seeds with the first value, without
/// bias correction. The output has one value per input.
///
/// # Errors
///
/// Returns [`PlotError::InvalidSpan`] when `span` is zero.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>, PlotError> {
    let mut indicator =
        ExponentialMovingAverage::new(span).map_err(|_| PlotError::InvalidSpan(span))?;
    Ok(values.iter().map(|&v| indicator.next(v)).collect())
}
