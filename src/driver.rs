//! The MCMC driver: rejection-initialises a trace, then iterates a kernel,
//! emitting a lag-thinned sample stream.

use crate::error::Result;
use crate::kernel::{Kernel, LarjKernel, RandomWalkKernel};
use crate::trace::Trace;

/// One emitted sample: the computation's return value and the trace's
/// joint log-density at the moment it was taken.
#[derive(Clone, Debug)]
pub struct Sample<T> {
    pub value: T,
    pub logprob: f64,
}

/// Runs `kernel` for `numsamps * lag` steps over a trace of `computation`,
/// started by rejection initialisation, emitting one [`Sample`] every `lag`
/// steps.
pub fn mcmc<T, K>(
    computation: impl Fn() -> T + 'static,
    mut kernel: K,
    numsamps: u32,
    lag: u32,
    verbose: bool,
    max_rejection_attempts: u32,
) -> Result<Vec<Sample<T>>>
where
    T: Clone,
    K: Kernel<T>,
{
    let lag = lag.max(1);
    let mut curr = Trace::rejection_init(computation, max_rejection_attempts)?;
    tracing::debug!(numsamps, lag, "starting mcmc chain");

    let mut samples = Vec::with_capacity(numsamps as usize);
    let total_iters = u64::from(numsamps) * u64::from(lag);
    for i in 1..=total_iters {
        curr = kernel.step(&curr);
        if i % u64::from(lag) == 0 {
            let sample = Sample {
                value: curr.return_value().clone(),
                logprob: curr.logprob(),
            };
            if verbose {
                tracing::info!(
                    sample = samples.len() + 1,
                    logprob = sample.logprob,
                    acceptance = kernel.stats().acceptance_rate(),
                    "mcmc sample"
                );
            }
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Single-variable Metropolis–Hastings over both structural and
/// non-structural variables.
pub fn trace_mh<T>(
    computation: impl Fn() -> T + 'static,
    numsamps: u32,
    lag: u32,
    verbose: bool,
) -> Result<Vec<Sample<T>>>
where
    T: Clone + 'static,
{
    mcmc(
        computation,
        RandomWalkKernel::new(true, true),
        numsamps,
        lag,
        verbose,
        DEFAULT_MAX_REJECTION_ATTEMPTS,
    )
}

/// Locally-annealed reversible-jump MCMC, with a non-structural diffusion
/// kernel between jumps.
pub fn larj_mh<T>(
    computation: impl Fn() -> T + 'static,
    numsamps: u32,
    anneal_steps: u32,
    jump_freq: Option<f64>,
    lag: u32,
    verbose: bool,
) -> Result<Vec<Sample<T>>>
where
    T: Clone + 'static,
{
    let kernel = LarjKernel::new(RandomWalkKernel::diffusion(), anneal_steps, jump_freq);
    mcmc(
        computation,
        kernel,
        numsamps,
        lag,
        verbose,
        DEFAULT_MAX_REJECTION_ATTEMPTS,
    )
}

/// Runs `computation` once via rejection initialisation and returns its
/// return value — a degenerate "chain" with no kernel stepping at all.
pub fn rejection_sample<T>(computation: impl Fn() -> T + 'static) -> Result<T>
where
    T: Clone + 'static,
{
    let trace = Trace::rejection_init(computation, DEFAULT_MAX_REJECTION_ATTEMPTS)?;
    Ok(trace.return_value().clone())
}

const DEFAULT_MAX_REJECTION_ATTEMPTS: u32 = 10_000;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erp;

    #[test]
    fn unconditioned_flip_mean_matches_its_probability() {
        let samples = trace_mh(|| erp::flip(0.7), 2_000, 1, false).unwrap();
        let mean = samples.iter().filter(|s| s.value).count() as f64 / samples.len() as f64;
        assert!((mean - 0.7).abs() < 0.07, "mean was {mean}");
    }

    #[test]
    fn rejection_sample_only_ever_returns_a_conditions_satisfying_run() {
        let value = rejection_sample(|| {
            let a = erp::flip(0.5);
            let b = erp::flip(0.5);
            crate::condition(a || b);
            a && b
        })
        .unwrap();
        // Can't assert on `value` alone (it's the return value, not the
        // condition), but this should not error out on a trivially
        // satisfiable condition.
        let _ = value;
    }
}
