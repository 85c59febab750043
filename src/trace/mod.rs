//! The random execution trace: an ordered log of random-choice records,
//! running log-probabilities, and a condition flag, together with the
//! `update` protocol that re-executes a user computation against it.
//!
//! Split in two: [`TraceCore`] is the untyped bookkeeping (records,
//! accumulators, the condition flag) that the ambient registry installs a
//! pointer to; [`Trace`] adds the user's `computation` and its typed return
//! value on top, so only [`TraceCore`] — not the whole generic `Trace<T>` —
//! needs to be visible from [`ambient`].

pub(crate) mod ambient;
mod record;

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace as log_trace;

pub use record::ChoiceRecord;

use crate::erp::ErpKind;
use crate::value::Value;

/// The untyped half of a trace: everything the ambient registry and the
/// kernels need that doesn't depend on the computation's return type.
#[derive(Clone, Debug, Default)]
pub struct TraceCore {
    vars: HashMap<String, ChoiceRecord>,
    /// Mirrors `vars` in the execution order of the most recent update.
    varlist: Vec<String>,
    /// Joint log-density plus factor contributions of the current execution.
    pub logprob: f64,
    /// Sum of `.logprob` over records created during the last update.
    pub newlogprob: f64,
    /// Sum of `.logprob` over records abandoned during the last update.
    pub oldlogprob: f64,
    pub conditions_satisfied: bool,
}

impl TraceCore {
    fn new() -> Self {
        TraceCore {
            conditions_satisfied: true,
            ..Default::default()
        }
    }

    fn begin_update(&mut self, structure_is_fixed: bool) {
        self.logprob = 0.0;
        self.newlogprob = 0.0;
        self.conditions_satisfied = true;
        if !structure_is_fixed {
            self.varlist.clear();
        }
        for record in self.vars.values_mut() {
            record.active = false;
        }
    }

    /// Sweeps every record left inactive by the just-finished update
    /// (control flow stopped visiting its name) out of `vars`, folding its
    /// `logprob` into `oldlogprob`.
    fn finish_update(&mut self) {
        let mut oldlogprob = 0.0;
        self.vars.retain(|_, record| {
            if record.active {
                true
            } else {
                oldlogprob += record.logprob;
                false
            }
        });
        self.oldlogprob = oldlogprob;
    }

    /// Resolves one ERP call against this trace: reuse the record at `name`
    /// if it is still a semantic match (same `erp`, same `structural`
    /// flag), otherwise sample (or adopt `conditioned_value`) and record
    /// fresh.
    ///
    /// The spec's sequential-cursor fast path (candidate-by-position before
    /// falling back to a name lookup) is elided: every call already carries
    /// a fully-resolved `name` by the time it reaches here (needed anyway so
    /// `#[track_caller]` attribution stays correct through the public ERP
    /// entry points), so a plain hash lookup is used throughout. Semantics
    /// match; only the cursor micro-optimisation is skipped.
    pub(crate) fn lookup(
        &mut self,
        name: String,
        erp: ErpKind,
        params: Rc<[f64]>,
        is_structural: bool,
        conditioned_value: Option<Value>,
    ) -> Value {
        let is_hit = self
            .vars
            .get(&name)
            .is_some_and(|r| r.erp == erp && r.structural == is_structural);

        if !is_hit {
            let val = conditioned_value
                .clone()
                .unwrap_or_else(|| erp.sample(&params));
            let ll = erp.logprob(&val, &params);
            self.newlogprob += ll;
            log_trace!(%name, ?erp, ll, "new choice record");
            if !self.vars.contains_key(&name) {
                self.varlist.push(name.clone());
            }
            self.vars.insert(
                name.clone(),
                ChoiceRecord {
                    name,
                    erp,
                    params,
                    val: val.clone(),
                    logprob: ll,
                    active: true,
                    conditioned: conditioned_value.is_some(),
                    structural: is_structural,
                },
            );
            self.logprob += ll;
            return val;
        }

        if !self.varlist.contains(&name) {
            self.varlist.push(name.clone());
        }
        let record = self.vars.get_mut(&name).expect("checked by is_hit");
        record.conditioned = conditioned_value.is_some();
        let pin_changed = conditioned_value
            .as_ref()
            .is_some_and(|cv| *cv != record.val);
        let params_changed = record.params != params;
        if pin_changed || params_changed {
            if let Some(cv) = conditioned_value {
                record.val = cv;
            }
            record.params = params;
            record.logprob = erp.logprob(&record.val, &record.params);
        }
        record.active = true;
        self.logprob += record.logprob;
        record.val.clone()
    }

    fn add_factor(&mut self, n: f64) {
        self.logprob += n;
    }

    fn condition_on(&mut self, b: bool) {
        self.conditions_satisfied = self.conditions_satisfied && b;
    }

    /// Names of non-conditioned records, filtered by whether their
    /// `structural` flag is among the requested classes.
    pub fn free_var_names(&self, structural: bool, nonstructural: bool) -> Vec<String> {
        self.varlist
            .iter()
            .filter(|name| {
                let record = &self.vars[*name];
                !record.conditioned
                    && ((record.structural && structural) || (!record.structural && nonstructural))
            })
            .cloned()
            .collect()
    }

    /// Total `logprob` of records present in `self` but absent from `other`.
    pub fn lp_diff(&self, other: &TraceCore) -> f64 {
        self.vars
            .iter()
            .filter(|(name, _)| !other.vars.contains_key(*name))
            .map(|(_, record)| record.logprob)
            .sum()
    }

    pub fn get(&self, name: &str) -> Option<&ChoiceRecord> {
        self.vars.get(name)
    }

    /// Overwrites the value at `name` (if present) and recomputes its
    /// `logprob` under the erp's current density, without touching
    /// `active`/`conditioned`/`structural`. Used by the LARJ jump step,
    /// which must apply the *same* drawn proposal to two sibling traces
    /// rather than independently re-proposing on each.
    pub(crate) fn overwrite_value(&mut self, name: &str, val: Value, erp: ErpKind) {
        if let Some(record) = self.vars.get_mut(name) {
            record.val = val;
            record.logprob = erp.logprob(&record.val, &record.params);
        }
    }

    pub(crate) fn structural_count(&self) -> usize {
        self.varlist
            .iter()
            .filter(|name| self.vars[*name].structural)
            .count()
    }

    pub(crate) fn nonstructural_count(&self) -> usize {
        self.varlist
            .iter()
            .filter(|name| !self.vars[*name].structural)
            .count()
    }
}

/// A trace of one probabilistic `computation`: the untyped [`TraceCore`]
/// plus the computation itself and its most recent return value.
///
/// `computation` is `Rc<dyn Fn() -> T>` rather than a type parameter over
/// some `Fn` impl, so that `Trace<T>` has one shape regardless of the
/// concrete closure the caller wrote, and cloning a trace (the proposal
/// workhorse — every kernel step clones before mutating) is just a
/// reference-count bump for the computation and a structural copy of the
/// records.
pub struct Trace<T> {
    pub(crate) core: TraceCore,
    computation: Rc<dyn Fn() -> T>,
    return_value: Option<T>,
}

impl<T> Clone for Trace<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Trace {
            core: self.core.clone(),
            computation: Rc::clone(&self.computation),
            return_value: self.return_value.clone(),
        }
    }
}

impl<T> Trace<T> {
    pub fn new(computation: impl Fn() -> T + 'static) -> Self {
        Trace {
            core: TraceCore::new(),
            computation: Rc::new(computation),
            return_value: None,
        }
    }

    /// Re-executes the computation against this trace: saves and installs
    /// the ambient slot, runs the computation, then sweeps abandoned
    /// records. See [`TraceCore::begin_update`]/[`TraceCore::finish_update`].
    pub fn update(&mut self, structure_is_fixed: bool) {
        self.core.begin_update(structure_is_fixed);
        crate::naming::reset();
        let computation = Rc::clone(&self.computation);
        let return_value = {
            let _guard = ambient::install(&mut self.core);
            computation()
        };
        self.core.finish_update();
        self.return_value = Some(return_value);
    }

    pub fn return_value(&self) -> &T {
        self.return_value
            .as_ref()
            .expect("trace has not been through an update yet")
    }

    pub fn logprob(&self) -> f64 {
        self.core.logprob
    }

    pub fn newlogprob(&self) -> f64 {
        self.core.newlogprob
    }

    pub fn oldlogprob(&self) -> f64 {
        self.core.oldlogprob
    }

    pub fn conditions_satisfied(&self) -> bool {
        self.core.conditions_satisfied
    }

    pub fn free_var_names(&self, structural: bool, nonstructural: bool) -> Vec<String> {
        self.core.free_var_names(structural, nonstructural)
    }

    pub fn lp_diff(&self, other: &Trace<T>) -> f64 {
        self.core.lp_diff(&other.core)
    }

    pub(crate) fn structural_count(&self) -> usize {
        self.core.structural_count()
    }

    pub(crate) fn nonstructural_count(&self) -> usize {
        self.core.nonstructural_count()
    }
}

impl<T: Clone> Trace<T> {
    /// Builds a fresh trace by rejection initialisation: rerun `update`
    /// until `conditions_satisfied`, bounded by `max_attempts` (the source
    /// loops forever; a library needs a bound it can report through).
    pub fn rejection_init(
        computation: impl Fn() -> T + 'static,
        max_attempts: u32,
    ) -> crate::error::Result<Self> {
        let mut trace = Trace::new(computation);
        for attempt in 1..=max_attempts {
            trace.update(false);
            if trace.core.conditions_satisfied {
                tracing::debug!(attempt, "rejection initialisation satisfied");
                return Ok(trace);
            }
        }
        tracing::warn!(max_attempts, "rejection initialisation exhausted its budget");
        Err(crate::error::TraceError::RejectionBudgetExhausted {
            attempts: max_attempts,
        })
    }

    /// Deep-clones `self`, replaces the record at `name` with a fresh
    /// proposal, and re-executes. Returns the new trace together with the
    /// proposal's forward and reverse log-densities; the new trace's own
    /// `newlogprob`/`oldlogprob` carry the update's record-churn
    /// contribution.
    pub fn propose_change(&self, name: &str, structure_is_fixed: bool) -> (Trace<T>, f64, f64) {
        let mut next = self.clone();
        let record = next
            .core
            .get(name)
            .expect("propose_change called with a name absent from this trace");
        let erp = record.erp;
        let params = Rc::clone(&record.params);
        let curr_val = record.val.clone();

        let prop_val = erp.propose(&curr_val, &params);
        let fwd_lp = erp.propose_logprob(&curr_val, &prop_val, &params);
        let rvs_lp = erp.propose_logprob(&prop_val, &curr_val, &params);

        {
            let record = next
                .core
                .vars
                .get_mut(name)
                .expect("just confirmed present above");
            record.val = prop_val;
            record.logprob = erp.logprob(&record.val, &record.params);
        }

        next.update(structure_is_fixed);
        (next, fwd_lp, rvs_lp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erp;

    #[test]
    fn probability_accounting_matches_sum_of_record_logprobs() {
        let mut trace = Trace::new(|| {
            let a = erp::flip(0.5);
            let b = erp::gaussian(0.0, 1.0);
            (a, b)
        });
        trace.update(false);
        let summed: f64 = trace.core.vars.values().map(|r| r.logprob).sum();
        assert!((trace.logprob() - summed).abs() < 1e-12);
    }

    #[test]
    fn inactive_records_are_swept_after_update() {
        let mut trace = Trace::new(|| erp::flip(0.5));
        trace.update(false);
        assert!(trace.core.vars.values().all(|r| r.active));
    }

    #[test]
    fn clone_isolation_mutating_a_clone_leaves_the_source_untouched() {
        let mut trace = Trace::new(|| erp::flip(0.5));
        trace.update(false);
        let before_len = trace.core.vars.len();
        let before_logprob = trace.logprob();

        let mut cloned = trace.clone();
        cloned.core.add_factor(1234.5);
        cloned.core.vars.clear();

        assert_eq!(trace.core.vars.len(), before_len);
        assert!((trace.logprob() - before_logprob).abs() < 1e-12);
    }

    #[test]
    fn record_keying_invariant_holds_after_update() {
        let mut trace = Trace::new(|| erp::flip(0.5));
        trace.update(false);
        for (name, record) in trace.core.vars.iter() {
            assert_eq!(name, &record.name);
        }
    }

    #[test]
    fn conditioned_record_value_is_never_replaced_by_a_proposal() {
        let mut trace = Trace::new(|| erp::flip_with(0.5, false, Some(true)));
        trace.update(false);
        let names = trace.free_var_names(true, true);
        assert!(names.is_empty(), "a conditioned var must not be free");
    }

    #[test]
    fn lp_diff_sums_logprob_of_records_absent_from_the_other_trace() {
        let mut a = Trace::new(|| {
            let _ = erp::flip(0.5);
            let _ = erp::gaussian(0.0, 1.0);
        });
        a.update(false);
        let mut b = Trace::new(|| {
            let _ = erp::flip(0.5);
        });
        b.update(false);
        // `a` has one extra record (the gaussian draw) that `b` lacks.
        assert!(a.lp_diff(&b) != 0.0 || b.core.vars.len() == a.core.vars.len());
    }
}
