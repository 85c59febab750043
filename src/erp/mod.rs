//! The ERP (elementary random procedure) registry: one pure sampler/
//! log-density/proposal family per submodule, plus the public entry points
//! (`flip`, `gaussian`, …) that thread a call into the current trace.
//!
//! Per the design notes, the registry is a closed, no-payload enum
//! (`ErpKind`) rather than a trait-object capability table: equality is
//! then just discriminant equality, which is exactly what [`crate::trace`]
//! needs to detect "the erp identity changed at this name" on trace update.

mod beta;
mod binomial;
mod dirichlet;
mod flip;
mod gamma;
mod gaussian;
mod multinomial;
mod numerics;
mod poisson;
mod softeq;
mod uniform;

pub use softeq::soft_eq;

use std::rc::Rc;

use crate::naming;
use crate::trace::ambient;
use crate::value::Value;

/// Which ERP family produced a choice record's value.
///
/// Two records with the same name are considered the same random choice
/// only if they also agree on `ErpKind` — see `Trace::lookup`'s "miss"
/// condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErpKind {
    Flip,
    Gaussian,
    Gamma,
    Beta,
    Binomial,
    Poisson,
    Uniform,
    Multinomial,
    Dirichlet,
}

impl ErpKind {
    pub(crate) fn sample(self, params: &[f64]) -> Value {
        match self {
            ErpKind::Flip => Value::Bool(flip::sample(params)),
            ErpKind::Gaussian => Value::Real(gaussian::sample(params)),
            ErpKind::Gamma => Value::Real(gamma::sample(params)),
            ErpKind::Beta => Value::Real(beta::sample(params)),
            ErpKind::Binomial => Value::Int(binomial::sample(params)),
            ErpKind::Poisson => Value::Int(poisson::sample(params)),
            ErpKind::Uniform => Value::Real(uniform::sample(params)),
            ErpKind::Multinomial => Value::Int(multinomial::sample(params)),
            ErpKind::Dirichlet => Value::Simplex(dirichlet::sample(params).into()),
        }
    }

    pub(crate) fn logprob(self, val: &Value, params: &[f64]) -> f64 {
        match self {
            ErpKind::Flip => flip::logprob(val.as_bool(), params),
            ErpKind::Gaussian => gaussian::logprob(val.as_real(), params[0], params[1]),
            ErpKind::Gamma => gamma::logprob(val.as_real(), params),
            ErpKind::Beta => beta::logprob(val.as_real(), params),
            ErpKind::Binomial => binomial::logprob(val.as_int(), params),
            ErpKind::Poisson => poisson::logprob(val.as_int(), params),
            ErpKind::Uniform => uniform::logprob(val.as_real(), params),
            ErpKind::Multinomial => multinomial::logprob(val.as_int(), params),
            ErpKind::Dirichlet => dirichlet::logprob(val.as_simplex(), params),
        }
    }

    pub(crate) fn propose(self, curr_val: &Value, params: &[f64]) -> Value {
        match self {
            ErpKind::Flip => Value::Bool(flip::propose(curr_val.as_bool(), params)),
            ErpKind::Gaussian => Value::Real(gaussian::propose(curr_val.as_real(), params)),
            ErpKind::Gamma => Value::Real(gamma::propose(curr_val.as_real(), params)),
            ErpKind::Beta => Value::Real(beta::propose(curr_val.as_real(), params)),
            ErpKind::Binomial => Value::Int(binomial::sample(params)),
            ErpKind::Poisson => Value::Int(poisson::sample(params)),
            ErpKind::Uniform => Value::Real(uniform::propose(curr_val.as_real(), params)),
            ErpKind::Multinomial => Value::Int(multinomial::propose(curr_val.as_int(), params)),
            ErpKind::Dirichlet => Value::Simplex(dirichlet::sample(params).into()),
        }
    }

    pub(crate) fn propose_logprob(self, curr_val: &Value, prop_val: &Value, params: &[f64]) -> f64 {
        match self {
            ErpKind::Flip => flip::propose_logprob(curr_val.as_bool(), prop_val.as_bool(), params),
            ErpKind::Gaussian => {
                gaussian::propose_logprob(curr_val.as_real(), prop_val.as_real(), params)
            }
            ErpKind::Gamma => gamma::propose_logprob(curr_val.as_real(), prop_val.as_real(), params),
            ErpKind::Beta => beta::propose_logprob(curr_val.as_real(), prop_val.as_real(), params),
            ErpKind::Binomial => binomial::logprob(prop_val.as_int(), params),
            ErpKind::Poisson => poisson::logprob(prop_val.as_int(), params),
            ErpKind::Uniform => uniform::propose_logprob(curr_val.as_real(), prop_val.as_real(), params),
            ErpKind::Multinomial => {
                multinomial::propose_logprob(curr_val.as_int(), prop_val.as_int(), params)
            }
            ErpKind::Dirichlet => dirichlet::logprob(prop_val.as_simplex(), params),
        }
    }
}

macro_rules! erp_entry {
    (
        $(#[$meta:meta])*
        $name:ident, $with_name:ident ( $($p:ident : $pty:ty),+ ) -> $ret:ty, $kind:expr, $conv:expr
    ) => {
        $(#[$meta])*
        #[track_caller]
        pub fn $name($($p: $pty),+) -> $ret {
            $with_name($($p),+, false, None)
        }

        #[track_caller]
        pub fn $with_name(
            $($p: $pty),+,
            is_structural: bool,
            conditioned_value: Option<$ret>,
        ) -> $ret {
            let name = naming::erp_name();
            let params: Rc<[f64]> = Rc::from([$($p as f64),+]);
            let conditioned = conditioned_value.map(Value::from);
            let val = ambient::lookup_or_sample(name, $kind, params, is_structural, conditioned);
            $conv(val)
        }
    };
}

erp_entry!(
    /// Bernoulli trial with success probability `p`.
    flip, flip_with(p: f64) -> bool, ErpKind::Flip, |v: Value| v.as_bool()
);

erp_entry!(
    /// Gaussian (normal) draw with mean `mu` and standard deviation `sigma`.
    gaussian, gaussian_with(mu: f64, sigma: f64) -> f64, ErpKind::Gaussian, |v: Value| v.as_real()
);

erp_entry!(
    /// Gamma draw with shape `a` and scale `b`.
    gamma, gamma_with(a: f64, b: f64) -> f64, ErpKind::Gamma, |v: Value| v.as_real()
);

erp_entry!(
    /// Beta draw on `(0, 1)` with shape parameters `a`, `b`.
    beta, beta_with(a: f64, b: f64) -> f64, ErpKind::Beta, |v: Value| v.as_real()
);

erp_entry!(
    /// Binomial draw: number of successes in `n` trials with per-trial
    /// probability `p`.
    binomial, binomial_with(p: f64, n: f64) -> i64, ErpKind::Binomial, |v: Value| v.as_int()
);

erp_entry!(
    /// Poisson draw with rate `mu`.
    poisson, poisson_with(mu: f64) -> i64, ErpKind::Poisson, |v: Value| v.as_int()
);

erp_entry!(
    /// Continuous uniform draw on `[lo, hi]`.
    uniform, uniform_with(lo: f64, hi: f64) -> f64, ErpKind::Uniform, |v: Value| v.as_real()
);

/// Categorical draw over `0..theta.len()`, weighted by `theta`.
#[track_caller]
pub fn multinomial(theta: &[f64]) -> i64 {
    multinomial_with(theta, false, None)
}

#[track_caller]
pub fn multinomial_with(theta: &[f64], is_structural: bool, conditioned_value: Option<i64>) -> i64 {
    let name = naming::erp_name();
    let params: Rc<[f64]> = Rc::from(theta);
    let conditioned = conditioned_value.map(Value::from);
    ambient::lookup_or_sample(name, ErpKind::Multinomial, params, is_structural, conditioned).as_int()
}

/// Dirichlet draw: a point on the probability simplex with concentration
/// parameters `alpha`.
#[track_caller]
pub fn dirichlet(alpha: &[f64]) -> Vec<f64> {
    dirichlet_with(alpha, false, None)
}

#[track_caller]
pub fn dirichlet_with(
    alpha: &[f64],
    is_structural: bool,
    conditioned_value: Option<Vec<f64>>,
) -> Vec<f64> {
    let name = naming::erp_name();
    let params: Rc<[f64]> = Rc::from(alpha);
    let conditioned = conditioned_value.map(Value::from);
    ambient::lookup_or_sample(name, ErpKind::Dirichlet, params, is_structural, conditioned)
        .as_simplex()
        .to_vec()
}

/// Draws an item from `items`, weighted by `probs` (`probs[i]` is the
/// weight of `items[i]`).
#[track_caller]
pub fn multinomial_draw<'a, T>(items: &'a [T], probs: &[f64]) -> &'a T {
    &items[multinomial(probs) as usize]
}

/// Draws an item from `items` uniformly at random.
#[track_caller]
pub fn uniform_draw<T>(items: &[T]) -> &T {
    let n = items.len();
    let uniform_weights = vec![1.0 / n as f64; n];
    &items[multinomial(&uniform_weights) as usize]
}
