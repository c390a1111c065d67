//! Exponentially weighted moving average, adjusted form.
//!
//! alpha = 2/(span+1); each output is the weighted mean of the whole history
//! with weights (1-alpha)^i, newest first:
//!
//!   EWMA[t] = sum(w_i * x[t-i]) / sum(w_i),  w_i = (1-alpha)^i
//!
//! Defined from the first value onward, so there is no warmup.

/// Smoothing factor for a given span.
pub fn alpha_for_span(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Adjusted EWMA of `values` with the given `span`. A zero span returns the
/// input unchanged (alpha = 2 would not be a valid weight).
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return values.to_vec();
    }

    let decay = 1.0 - alpha_for_span(span);
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    values
        .iter()
        .map(|&x| {
            numerator = x + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}
