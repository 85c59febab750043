//! Poisson ERP. No custom proposal kernel.

use rand_distr::{Distribution, Poisson as PoissonDist};

use super::numerics::ln_fact;

pub(crate) fn sample(params: &[f64]) -> i64 {
    let mu = params[0];
    PoissonDist::new(mu)
        .expect("poisson erp requires mu > 0")
        .sample(&mut rand::thread_rng()) as i64
}

/// `k*ln(mu) - mu - ln(k!)`.
pub(crate) fn logprob(k: i64, params: &[f64]) -> f64 {
    if k < 0 {
        return f64::NEG_INFINITY;
    }
    let mu = params[0];
    k as f64 * mu.ln() - mu - ln_fact(k as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_impossible() {
        assert_eq!(logprob(-1, &[3.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn matches_poisson_pmf() {
        // dpois(2, lambda = 3, log = TRUE) = -1.495923
        assert!((logprob(2, &[3.0]) - (-1.495_923)).abs() < 1e-4);
    }
}
