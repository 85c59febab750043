//! Locally-Annealed Reversible Jump: a trans-dimensional move that bridges
//! two structurally different executions via a short random-walk path along
//! a linear interpolation of their target densities.

use std::rc::Rc;

use rand::Rng;

use crate::erp::{uniform_draw, ErpKind};
use crate::trace::Trace;
use crate::value::Value;

use super::target::ProposalTarget;
use super::{Kernel, KernelStats, RandomWalkKernel};

/// A composite of two traces plus a mixing coefficient `alpha`, used only
/// as the state the annealing random walk runs over. Not a standalone
/// trace: it exposes just the operations [`super::target::ProposalTarget`]
/// needs.
pub struct LerpTrace<T> {
    pub(crate) trace1: Trace<T>,
    pub(crate) trace2: Trace<T>,
    pub(crate) alpha: f64,
}

impl<T: Clone> Clone for LerpTrace<T> {
    fn clone(&self) -> Self {
        LerpTrace {
            trace1: self.trace1.clone(),
            trace2: self.trace2.clone(),
            alpha: self.alpha,
        }
    }
}

impl<T: Clone> LerpTrace<T> {
    fn new(trace1: Trace<T>, trace2: Trace<T>, alpha: f64) -> Self {
        LerpTrace {
            trace1,
            trace2,
            alpha,
        }
    }

    /// Looks up `name`'s erp, params, and current value from whichever side
    /// has it (both sides should agree when both have it).
    fn resolve(&self, name: &str) -> (ErpKind, Rc<[f64]>, Value) {
        let record = self
            .trace1
            .core
            .get(name)
            .or_else(|| self.trace2.core.get(name))
            .expect("lerp free_var_names only yields names present on at least one side");
        (record.erp, Rc::clone(&record.params), record.val.clone())
    }
}

fn apply_proposal<T: Clone>(
    trace: &Trace<T>,
    name: &str,
    erp: ErpKind,
    prop_val: &Value,
    structure_is_fixed: bool,
) -> Trace<T> {
    if trace.core.get(name).is_none() {
        return trace.clone();
    }
    let mut next = trace.clone();
    next.core.overwrite_value(name, prop_val.clone(), erp);
    next.update(structure_is_fixed);
    next
}

impl<T: Clone> ProposalTarget<T> for LerpTrace<T> {
    fn free_var_names(&self, structural: bool, nonstructural: bool) -> Vec<String> {
        let mut names = self.trace1.free_var_names(structural, nonstructural);
        for name in self.trace2.free_var_names(structural, nonstructural) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn propose_change(&self, name: &str, structure_is_fixed: bool) -> (Self, f64, f64) {
        let (erp, params, curr_val) = self.resolve(name);
        let prop_val = erp.propose(&curr_val, &params);
        let fwd_lp = erp.propose_logprob(&curr_val, &prop_val, &params);
        let rvs_lp = erp.propose_logprob(&prop_val, &curr_val, &params);

        let trace1 = apply_proposal(&self.trace1, name, erp, &prop_val, structure_is_fixed);
        let trace2 = apply_proposal(&self.trace2, name, erp, &prop_val, structure_is_fixed);
        (LerpTrace::new(trace1, trace2, self.alpha), fwd_lp, rvs_lp)
    }

    fn logprob(&self) -> f64 {
        (1.0 - self.alpha) * self.trace1.logprob() + self.alpha * self.trace2.logprob()
    }

    fn newlogprob(&self) -> f64 {
        (1.0 - self.alpha) * self.trace1.newlogprob() + self.alpha * self.trace2.newlogprob()
    }

    fn oldlogprob(&self) -> f64 {
        (1.0 - self.alpha) * self.trace1.oldlogprob() + self.alpha * self.trace2.oldlogprob()
    }

    fn conditions_satisfied(&self) -> bool {
        self.trace1.conditions_satisfied() && self.trace2.conditions_satisfied()
    }

    fn is_structural(&self, name: &str) -> bool {
        self.trace1
            .core
            .get(name)
            .or_else(|| self.trace2.core.get(name))
            .expect("lerp free_var_names only yields names present on at least one side")
            .structural
    }

    fn rerun(&self) -> Self {
        self.clone()
    }
}

/// Bridges between structurally different executions: with probability
/// `jump_freq` (or, if unset, the proportion of free variables that are
/// structural) proposes a new value for one structural variable and
/// anneals the resulting wake of created/destroyed non-structural
/// variables in by short-circuiting through `anneal_steps` random-walk
/// steps along the linear interpolation between the two structures;
/// otherwise delegates one step to the inner diffusion kernel.
pub struct LarjKernel {
    diffusion: RandomWalkKernel,
    anneal_steps: u32,
    jump_freq: Option<f64>,
    stats: KernelStats,
}

impl LarjKernel {
    pub fn new(diffusion: RandomWalkKernel, anneal_steps: u32, jump_freq: Option<f64>) -> Self {
        LarjKernel {
            diffusion,
            anneal_steps,
            jump_freq,
            stats: KernelStats::default(),
        }
    }

    pub fn diffusion_stats(&self) -> KernelStats {
        self.diffusion.stats()
    }

    fn jump_step<T: Clone>(&mut self, curr: &Trace<T>, struct_vars: &[String]) -> Trace<T> {
        let mut old_struct = curr.clone();
        let mut new_struct = curr.clone();

        let name = uniform_draw(struct_vars).clone();
        let record = old_struct
            .core
            .get(&name)
            .expect("struct_vars came from this trace's own free_var_names");
        let erp = record.erp;
        let params = Rc::clone(&record.params);
        let orig_val = record.val.clone();
        let prop_val = erp.propose(&orig_val, &params);
        let mut fwd_lp = erp.propose_logprob(&orig_val, &prop_val, &params);

        let old_num = old_struct.structural_count();
        new_struct.core.overwrite_value(&name, prop_val.clone(), erp);
        new_struct.update(false);
        let new_num = new_struct.structural_count();
        fwd_lp += new_struct.newlogprob() - (old_num as f64).ln();

        let mut annealing_lp_ratio = 0.0;
        let anneal_eligible = (old_struct.nonstructural_count() > 0
            || new_struct.nonstructural_count() > 0)
            && self.anneal_steps > 0;
        if anneal_eligible {
            let mut lerp = LerpTrace::new(old_struct.clone(), new_struct.clone(), 0.0);
            for i in 0..self.anneal_steps {
                lerp.alpha = if self.anneal_steps <= 1 {
                    0.0
                } else {
                    i as f64 / (self.anneal_steps - 1) as f64
                };
                annealing_lp_ratio += lerp.logprob();
                lerp = self.diffusion.step_target(&lerp);
                annealing_lp_ratio -= lerp.logprob();
            }
            old_struct = lerp.trace1;
            new_struct = lerp.trace2;
        }

        let rvs_lp = erp.propose_logprob(&prop_val, &orig_val, &params) + old_struct.lp_diff(&new_struct)
            - (new_num as f64).ln();
        let accept_lp =
            new_struct.logprob() - curr.logprob() + rvs_lp - fwd_lp + annealing_lp_ratio;
        let accepted = new_struct.conditions_satisfied()
            && rand::thread_rng().gen::<f64>().ln() < accept_lp;

        self.stats.record(accepted);
        if accepted {
            new_struct
        } else {
            curr.clone()
        }
    }
}

impl<T: Clone> Kernel<T> for LarjKernel {
    fn step(&mut self, curr: &Trace<T>) -> Trace<T> {
        let struct_vars = curr.free_var_names(true, false);
        let nonstruct_vars = curr.free_var_names(false, true);
        if struct_vars.is_empty() && nonstruct_vars.is_empty() {
            let mut rerun = curr.clone();
            rerun.update(true);
            return rerun;
        }

        let p = self.jump_freq.unwrap_or_else(|| {
            struct_vars.len() as f64 / (struct_vars.len() + nonstruct_vars.len()) as f64
        });
        let will_jump = !struct_vars.is_empty() && rand::thread_rng().gen::<f64>() < p;

        if will_jump {
            self.jump_step(curr, &struct_vars)
        } else {
            self.diffusion.step_target(curr)
        }
    }

    fn stats(&self) -> KernelStats {
        self.stats
    }
}
