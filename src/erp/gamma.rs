//! Gamma ERP. No custom proposal kernel — falls back to an independent
//! draw from the prior, like the source implementation.

use rand_distr::{Distribution, Gamma};

use super::numerics::log_gamma;

pub(crate) fn sample(params: &[f64]) -> f64 {
    let (shape, scale) = (params[0], params[1]);
    Gamma::new(shape, scale)
        .expect("gamma erp requires shape, scale > 0")
        .sample(&mut rand::thread_rng())
}

/// `(a-1)*ln(x) - x/b - lgamma(a) - a*ln(b)`.
pub(crate) fn logprob(val: f64, params: &[f64]) -> f64 {
    let (a, b) = (params[0], params[1]);
    (a - 1.0) * val.ln() - val / b - log_gamma(a) - a * b.ln()
}

pub(crate) fn propose(_curr_val: f64, params: &[f64]) -> f64 {
    sample(params)
}

pub(crate) fn propose_logprob(_curr_val: f64, prop_val: f64, params: &[f64]) -> f64 {
    logprob(prop_val, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrees_with_log_gamma_reference() {
        // dgamma(2, shape=2, scale=3, log=TRUE) = -2.1707441
        assert!((logprob(2.0, &[2.0, 3.0]) - (-2.170_744_1)).abs() < 1e-6);
    }
}
