//! Categorical ("multinomial" in the source's terminology) ERP over
//! `0..params.len()`, weighted by `params`.
//!
//! The proposal zeroes out the current category's mass and renormalises
//! over the rest, so a proposal never immediately repeats the current
//! category.

use rand::Rng;

pub(crate) fn sample(params: &[f64]) -> i64 {
    let total: f64 = params.iter().sum();
    let x = rand::thread_rng().gen::<f64>() * total;
    let mut accum = 1e-6;
    let mut result = 0usize;
    while result < params.len() && x > accum {
        accum += params[result];
        result += 1;
    }
    result as i64 - 1
}

/// `ln(theta_k / sum(theta))`, `-inf` if `k` is out of range.
pub(crate) fn logprob(k: i64, params: &[f64]) -> f64 {
    if k < 0 || k as usize >= params.len() {
        return f64::NEG_INFINITY;
    }
    let total: f64 = params.iter().sum();
    (params[k as usize] / total).ln()
}

/// Proposes a different category: the current one's mass is zeroed before
/// sampling.
pub(crate) fn propose(curr_val: i64, params: &[f64]) -> i64 {
    let mut zeroed = params.to_vec();
    if let Some(slot) = zeroed.get_mut(curr_val as usize) {
        *slot = 0.0;
    }
    sample(&zeroed)
}

pub(crate) fn propose_logprob(curr_val: i64, prop_val: i64, params: &[f64]) -> f64 {
    let mut zeroed = params.to_vec();
    if let Some(slot) = zeroed.get_mut(curr_val as usize) {
        *slot = 0.0;
    }
    logprob(prop_val, &zeroed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Analytical check from the spec, §8.
    #[test]
    fn logprob_matches_normalized_weight() {
        let theta = [1.0, 3.0, 6.0];
        for k in 0..3i64 {
            let expected = (theta[k as usize] / theta.iter().sum::<f64>()).ln();
            assert!((logprob(k, &theta) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn out_of_support_is_negative_infinity() {
        assert_eq!(logprob(-1, &[1.0, 2.0]), f64::NEG_INFINITY);
        assert_eq!(logprob(2, &[1.0, 2.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn propose_never_keeps_current_category_when_alternatives_exist() {
        for _ in 0..100 {
            let proposed = propose(0, &[1.0, 1.0]);
            assert_eq!(proposed, 1);
        }
    }
}
