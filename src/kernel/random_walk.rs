//! Single-variable Metropolis–Hastings over one trace.

use rand::Rng;

use crate::erp::uniform_draw;
use crate::trace::Trace;

use super::target::ProposalTarget;
use super::{Kernel, KernelStats};

/// Picks one free variable uniformly at random each step and proposes a
/// change to it alone; same-dimension reversible-jump MH specialised to a
/// single coordinate.
pub struct RandomWalkKernel {
    structural: bool,
    nonstructural: bool,
    stats: KernelStats,
}

impl RandomWalkKernel {
    /// `structural`/`nonstructural` select which variable classes this
    /// kernel is allowed to touch; at least one must be true for the kernel
    /// to ever propose anything.
    pub fn new(structural: bool, nonstructural: bool) -> Self {
        RandomWalkKernel {
            structural,
            nonstructural,
            stats: KernelStats::default(),
        }
    }

    /// The conventional single-site kernel: only non-structural variables.
    /// This is the diffusion kernel LARJ anneals with.
    pub fn diffusion() -> Self {
        RandomWalkKernel::new(false, true)
    }

    /// Runs one step against any [`ProposalTarget`], not just a plain
    /// [`Trace`] — used directly by the LARJ annealing loop against
    /// [`super::larj::LerpTrace`].
    pub(crate) fn step_target<Tgt, T>(&mut self, curr: &Tgt) -> Tgt
    where
        Tgt: ProposalTarget<T>,
    {
        let free = curr.free_var_names(self.structural, self.nonstructural);
        if free.is_empty() {
            return curr.rerun();
        }

        let name = uniform_draw(&free).clone();
        let structure_is_fixed = !curr.is_structural(&name);

        let (next, mut fwd_lp, mut rvs_lp) = curr.propose_change(&name, structure_is_fixed);
        fwd_lp -= (free.len() as f64).ln();
        let reverse_free = next.free_var_names(self.structural, self.nonstructural);
        rvs_lp -= (reverse_free.len() as f64).ln();

        let accept_lp =
            next.logprob() - curr.logprob() + rvs_lp - fwd_lp - next.newlogprob() + next.oldlogprob();
        let accepted =
            next.conditions_satisfied() && rand::thread_rng().gen::<f64>().ln() < accept_lp;

        self.stats.record(accepted);
        if accepted {
            next
        } else {
            curr.clone()
        }
    }
}

impl<T: Clone> Kernel<T> for RandomWalkKernel {
    fn step(&mut self, curr: &Trace<T>) -> Trace<T> {
        self.step_target(curr)
    }

    fn stats(&self) -> KernelStats {
        self.stats
    }
}
