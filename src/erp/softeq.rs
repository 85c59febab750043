//! `soft_eq`: turns approximate equality into a Gaussian log-factor,
//! for use with [`crate::factor`].

use super::gaussian;

/// Scores how close `a` is to `b` as a `Gaussian(b, tolerance)` log-density
/// evaluated at `a`, suitable for passing straight to [`crate::factor`].
pub fn soft_eq(a: f64, b: f64, tolerance: f64) -> f64 {
    gaussian::logprob(a, b, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_the_mode() {
        assert!(soft_eq(1.0, 1.0, 0.1) > soft_eq(1.2, 1.0, 0.1));
    }
}
