//! Rolling-window and exponential smoothing primitives.
//!
//! Every function returns a vector aligned with its input, with `None` for
//! positions where the window is not yet full.

/// Simple rolling mean. Each value is the direct window sum divided by the
/// window, so results do not drift over long histories.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for end in window..=values.len() {
        let sum: f64 = values[end - window..end].iter().sum();
        out[end - 1] = Some(sum / window as f64);
    }
    out
}

/// Rolling sample standard deviation (n-1 denominator). Requires `window >= 2`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }

    for end in window..=values.len() {
        out[end - 1] = Some(sample_std(&values[end - window..end]));
    }
    out
}

/// Sample standard deviation of a full slice.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Smoothing factor for an exponential moving average of the given span
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Recursive (non-adjusted) EMA seeded with the first value.
///
/// `ema[0] = x[0]`, `ema[i] = alpha * x[i] + (1 - alpha) * ema[i-1]`.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return out;
    };
    let alpha = ema_alpha(span.max(1));

    let mut prev = first;
    out.push(prev);
    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// Element-wise difference of two partially defined series
pub fn subtract(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect()
}
