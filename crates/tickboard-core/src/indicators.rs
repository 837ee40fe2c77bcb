//! Trailing simple moving averages.

/// Window of the short moving average, in trading days.
pub const SHORT_WINDOW: usize = 50;
/// Window of the long moving average, in trading days.
pub const LONG_WINDOW: usize = 200;

/// Trailing simple moving average of `values`.
///
/// Position `i` holds the mean of `values[i + 1 - window..=i]`, or `None`
/// while fewer than `window` values are available. A zero window yields no
/// averages at all.
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let divisor = window as f64;
    let mut sum = values[..window].iter().sum::<f64>();
    result[window - 1] = Some(sum / divisor);

    for i in window..values.len() {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / divisor);
    }

    result
}
