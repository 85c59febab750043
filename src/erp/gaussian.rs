//! Gaussian ERP, with a drift-kernel proposal (propose from a Gaussian
//! centred at the current value, using the prior's own `sigma`).

use rand_distr::{Distribution, Normal};

/// `ln N(x | mu, sigma)`.
pub(crate) fn logprob(x: f64, mu: f64, sigma: f64) -> f64 {
    -0.5 * (1.837_877_066_409_345_3 + 2.0 * sigma.ln() + (x - mu) * (x - mu) / (sigma * sigma))
}

pub(crate) fn sample(params: &[f64]) -> f64 {
    let (mu, sigma) = (params[0], params[1]);
    Normal::new(mu, sigma)
        .expect("gaussian erp requires sigma > 0")
        .sample(&mut rand::thread_rng())
}

pub(crate) fn propose(curr_val: f64, params: &[f64]) -> f64 {
    let sigma = params[1];
    Normal::new(curr_val, sigma)
        .expect("gaussian erp requires sigma > 0")
        .sample(&mut rand::thread_rng())
}

pub(crate) fn propose_logprob(curr_val: f64, prop_val: f64, params: &[f64]) -> f64 {
    logprob(prop_val, curr_val, params[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Analytical checks from the spec, §8.
    #[test]
    fn matches_literal_expected_values() {
        assert!((logprob(0.0, 0.0, 0.1) - (-0.245_791_352_6)).abs() < 1e-8);
        assert!((logprob(0.25, 0.0, 0.1) - (-0.270_791_352_6)).abs() < 1e-8);
        assert!((logprob(0.6, 0.0, 0.1) - (-0.725_791_352_6)).abs() < 1e-8);
    }
}
