//! Binomial ERP. No custom proposal kernel.
//!
//! Sampling is delegated to `rand_distr`'s exact sampler rather than the
//! source's hand-rolled BTPE-style routine (not needed once a real
//! binomial sampler is a dependency away); the log-density uses the exact
//! `ln C(n,k) + k*ln(p) + (n-k)*ln(1-p)` form via [`super::numerics::log_gamma`]
//! rather than the source's asymptotic normal approximation.

use rand_distr::{Binomial, Distribution};

use super::numerics::log_gamma;

pub(crate) fn sample(params: &[f64]) -> i64 {
    let (p, n) = (params[0], params[1] as u64);
    Binomial::new(n, p.clamp(0.0, 1.0))
        .expect("binomial erp requires 0 <= p <= 1")
        .sample(&mut rand::thread_rng()) as i64
}

pub(crate) fn logprob(k: i64, params: &[f64]) -> f64 {
    let (p, n) = (params[0], params[1] as i64);
    if k < 0 || k > n {
        return f64::NEG_INFINITY;
    }
    let (k, n) = (k as f64, n as f64);
    let log_choose = log_gamma(n + 1.0) - log_gamma(k + 1.0) - log_gamma(n - k + 1.0);
    log_choose + k * p.ln() + (n - k) * (1.0 - p).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_negative_infinity() {
        assert_eq!(logprob(-1, &[0.5, 10.0]), f64::NEG_INFINITY);
        assert_eq!(logprob(11, &[0.5, 10.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn matches_binomial_pmf_at_the_mode() {
        // dbinom(5, 10, 0.5, log = TRUE) = -1.402034
        assert!((logprob(5, &[0.5, 10.0]) - (-1.402_034)).abs() < 1e-4);
    }
}
