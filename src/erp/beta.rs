//! Beta ERP, support `(0, 1)`. No custom proposal kernel.

use rand_distr::{Beta as BetaDist, Distribution};

use super::numerics::log_beta_fn;

pub(crate) fn sample(params: &[f64]) -> f64 {
    let (a, b) = (params[0], params[1]);
    BetaDist::new(a, b)
        .expect("beta erp requires a, b > 0")
        .sample(&mut rand::thread_rng())
}

/// `(a-1)*ln(x) + (b-1)*ln(1-x) - logbeta(a,b)`, `-inf` outside `(0, 1)`.
pub(crate) fn logprob(val: f64, params: &[f64]) -> f64 {
    let (a, b) = (params[0], params[1]);
    if val > 0.0 && val < 1.0 {
        (a - 1.0) * val.ln() + (b - 1.0) * (1.0 - val).ln() - log_beta_fn(a, b)
    } else {
        f64::NEG_INFINITY
    }
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
    fn out_of_support_is_negative_infinity() {
        assert_eq!(logprob(-0.1, &[2.0, 2.0]), f64::NEG_INFINITY);
        assert_eq!(logprob(1.1, &[2.0, 2.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn uniform_case_matches_uniform_density() {
        // Beta(1,1) is Uniform(0,1): logprob is 0 everywhere in support.
        assert!((logprob(0.3, &[1.0, 1.0])).abs() < 1e-10);
    }
}
