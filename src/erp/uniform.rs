//! Continuous uniform ERP on `[lo, hi]`. No custom proposal kernel.

use rand::Rng;

pub(crate) fn sample(params: &[f64]) -> f64 {
    let (lo, hi) = (params[0], params[1]);
    rand::thread_rng().gen_range(lo..=hi)
}

pub(crate) fn logprob(val: f64, params: &[f64]) -> f64 {
    let (lo, hi) = (params[0], params[1]);
    if val < lo || val > hi {
        f64::NEG_INFINITY
    } else {
        -(hi - lo).ln()
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
    fn out_of_range_is_negative_infinity() {
        assert_eq!(logprob(-0.1, &[0.0, 1.0]), f64::NEG_INFINITY);
        assert_eq!(logprob(1.1, &[0.0, 1.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn density_is_reciprocal_of_range() {
        assert!((logprob(2.5, &[0.0, 4.0]) - (-4.0_f64.ln())).abs() < 1e-12);
    }
}
