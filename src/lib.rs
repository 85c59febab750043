//! A lightweight embedded probabilistic programming engine.
//!
//! Write an ordinary Rust closure that calls [`flip`], [`gaussian`], and the
//! other ERP families below; wrap hard constraints in [`condition`] and
//! soft ones in [`factor`]; hand the closure to [`trace_mh`] or [`larj_mh`]
//! to get back a stream of samples from the induced posterior over its
//! return value.
//!
//! ## Example
//!
//! ```rust
//! use probabilistic_trace::{condition, flip};
//!
//! let samples = probabilistic_trace::trace_mh(
//!     || {
//!         let a = flip(0.5);
//!         let b = flip(0.5);
//!         condition(a || b);
//!         a && b
//!     },
//!     2_000,
//!     1,
//!     false,
//! )
//! .unwrap();
//!
//! let mean = samples.iter().filter(|s| s.value).count() as f64 / samples.len() as f64;
//! assert!((mean - 1.0 / 3.0).abs() < 0.1);
//! ```
//!
//! ## Writing your own probabilistic function
//!
//! Every ERP call (`flip`, `gaussian`, …) must be reachable only from
//! inside the closure passed to a driver function (or nested inside
//! another probabilistic function called from there) — ERPs read the
//! ambient trace installed by [`trace::Trace::update`], and degrade to a
//! bare, untraced sample when none is installed. A recursive probabilistic
//! function, or a hand-written loop containing ERP calls, should wrap its
//! recursive call or loop body in [`scope`] (or use
//! [`prfor`]/[`prwhile`]/[`prmap`]) so each invocation gets an identity
//! distinct from its siblings.

pub mod driver;
pub mod erp;
pub mod error;
pub mod estimate;
pub mod kernel;
pub mod trace;

mod control;
mod memoize;
mod naming;
mod value;

pub use control::{prfor, prmap, prwhile};
pub use driver::{larj_mh, mcmc, rejection_sample, trace_mh, Sample};
pub use erp::{
    beta, beta_with, binomial, binomial_with, dirichlet, dirichlet_with, flip, flip_with, gamma,
    gamma_with, gaussian, gaussian_with, multinomial, multinomial_draw, multinomial_with, poisson,
    poisson_with, soft_eq, uniform, uniform_draw, uniform_with,
};
pub use error::{Result, TraceError};
pub use estimate::{distrib, expectation, map_estimate};
pub use kernel::{Kernel, KernelStats, LarjKernel, RandomWalkKernel};
pub use memoize::mem;
pub use naming::scope;
pub use value::Value;

/// Imposes a hard constraint on the ambient trace. A trace in which any
/// `condition` call received `false` is rejected by the calling kernel with
/// probability 1; see [`trace::TraceCore::conditions_satisfied`].
///
/// A no-op if called outside any trace update.
pub fn condition(b: bool) {
    trace::ambient::condition_on(b);
}

/// Adds `r` to the ambient trace's joint log-density without creating a
/// random-choice record.
///
/// A no-op if called outside any trace update.
pub fn factor(r: f64) {
    trace::ambient::add_factor(r);
}
