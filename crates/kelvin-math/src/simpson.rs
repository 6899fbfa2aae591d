//! Composite Simpson's rule.
//!
//! Integrates a function sampled at evenly spaced abscissas. The rule needs
//! an even number of subintervals (an odd number of samples). When given an
//! even number of samples, the **last sample is dropped** before integrating,
//! which shortens the effective range by one subinterval. Callers that need
//! the full range must supply an odd count.
//!
//! # Formula
//!
//! With `N` panels over `2N + 1` samples and subinterval width `h`:
//!
//! ```text
//! I = h/3 * [f(0) + f(2N) + 4 * sum(f(2i - 1), i = 1..=N) + 2 * sum(f(2i), i = 1..N)]
//! ```
//!
//! # Reference
//!
//! Sauer, T. (2018). *Numerical Analysis* (3rd ed.), section 5.2.

use thiserror::Error;

/// Integration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntegrateError {
    /// Fewer than three samples remain after the drop-last policy.
    #[error("Simpson's rule needs at least 3 usable samples, got {usable} (from {count})")]
    TooFewSamples {
        /// Samples supplied by the caller.
        count: usize,
        /// Samples left after dropping the trailing one.
        usable: usize,
    },
}

/// Number of samples Simpson's rule will actually consume from `count`.
///
/// ```rust
/// use kelvin_math::simpson::usable_samples;
///
/// assert_eq!(usable_samples(7), 7);
/// assert_eq!(usable_samples(8), 7);
/// ```
#[inline]
pub fn usable_samples(count: usize) -> usize {
    if count % 2 == 0 {
        count.saturating_sub(1)
    } else {
        count
    }
}

/// Integrates evenly spaced samples with the composite Simpson's rule.
///
/// `subinterval_width` is the constant spacing between abscissas. Non-finite
/// samples are not filtered and propagate into the result.
///
/// # Example
///
/// ```rust
/// use kelvin_math::integrate;
///
/// // x^2 on [0, 2] is integrated exactly.
/// let h = 0.5;
/// let values: Vec<f64> = (0..5).map(|i| (i as f64 * h).powi(2)).collect();
/// let area = integrate(&values, h).unwrap();
/// assert!((area - 8.0 / 3.0).abs() < 1e-12);
/// ```
pub fn integrate(values: &[f64], subinterval_width: f64) -> Result<f64, IntegrateError> {
    let usable = usable_samples(values.len());
    if usable < 3 {
        return Err(IntegrateError::TooFewSamples {
            count: values.len(),
            usable,
        });
    }

    let panels = usable / 2;

    let mut result = values[0] + values[2 * panels];

    let odd: f64 = (1..=panels).map(|i| values[2 * i - 1]).sum();
    result += 4.0 * odd;

    let even: f64 = (1..panels).map(|i| values[2 * i]).sum();
    result += 2.0 * even;

    Ok(result * subinterval_width / 3.0)
}
