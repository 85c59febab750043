//! Dirichlet ERP over the probability simplex. No custom proposal kernel.

use rand_distr::{Distribution, Gamma};

use super::numerics::log_gamma;

pub(crate) fn sample(params: &[f64]) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut theta: Vec<f64> = params
        .iter()
        .map(|&a| {
            Gamma::new(a, 1.0)
                .expect("dirichlet erp requires all alpha > 0")
                .sample(&mut rng)
        })
        .collect();
    let sum: f64 = theta.iter().sum();
    for t in &mut theta {
        *t /= sum;
    }
    theta
}

/// `lgamma(sum(alpha)) + sum((alpha_i - 1)*ln(theta_i) - lgamma(alpha_i))`.
///
/// The source initializes this accumulator from an unassigned local
/// (`logp += ...` with no prior `logp = ...`), a latent bug; this seeds it
/// from `lgamma(sum(alpha))` as the normalizing constant requires.
pub(crate) fn logprob(theta: &[f64], alpha: &[f64]) -> f64 {
    let alpha_sum: f64 = alpha.iter().sum();
    let mut logp = log_gamma(alpha_sum);
    for (t, a) in theta.iter().zip(alpha) {
        logp += (a - 1.0) * t.ln() - log_gamma(*a);
    }
    logp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_dirichlet_is_uniform_over_the_simplex() {
        // Dirichlet(1,1) reduces to Uniform on the 1-simplex: density 1 everywhere.
        assert!((logprob(&[0.3, 0.7], &[1.0, 1.0])).abs() < 1e-10);
    }

    #[test]
    fn sampled_theta_sums_to_one() {
        let theta = sample(&[2.0, 3.0, 5.0]);
        let sum: f64 = theta.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
