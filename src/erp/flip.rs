//! Bernoulli ERP.

use rand::Rng;

pub(crate) fn sample(params: &[f64]) -> bool {
    let p = params[0];
    rand::thread_rng().gen_bool(p.clamp(0.0, 1.0))
}

pub(crate) fn logprob(val: bool, params: &[f64]) -> f64 {
    let p = params[0];
    (if val { p } else { 1.0 - p }).ln()
}

/// Deterministically flips the bit; there is only one other value, so the
/// proposal log-density in both directions is `0.0`.
pub(crate) fn propose(curr_val: bool, _params: &[f64]) -> bool {
    !curr_val
}

pub(crate) fn propose_logprob(_curr_val: bool, _prop_val: bool, _params: &[f64]) -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logprob_matches_bernoulli_pmf() {
        assert!((logprob(true, &[0.7]) - 0.7_f64.ln()).abs() < 1e-12);
        assert!((logprob(false, &[0.7]) - 0.3_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn propose_is_self_inverse() {
        assert_eq!(propose(propose(true, &[0.5]), &[0.5]), true);
        assert_eq!(propose_logprob(true, false, &[0.5]), 0.0);
    }
}
