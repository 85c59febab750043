//! The interface the random-walk step needs from whatever it is mutating —
//! implemented by both [`crate::trace::Trace`] and [`super::larj::LerpTrace`]
//! so the same single-site MH step can drive a plain trace or the
//! interpolated composite used during LARJ annealing.

pub(crate) trait ProposalTarget<T>: Clone {
    fn free_var_names(&self, structural: bool, nonstructural: bool) -> Vec<String>;
    fn propose_change(&self, name: &str, structure_is_fixed: bool) -> (Self, f64, f64);
    fn logprob(&self) -> f64;
    fn newlogprob(&self) -> f64;
    fn oldlogprob(&self) -> f64;
    fn conditions_satisfied(&self) -> bool;
    fn is_structural(&self, name: &str) -> bool;
    /// Re-executes unchanged, for the degenerate "no free variables" step.
    fn rerun(&self) -> Self;
}

impl<T: Clone> ProposalTarget<T> for crate::trace::Trace<T> {
    fn free_var_names(&self, structural: bool, nonstructural: bool) -> Vec<String> {
        crate::trace::Trace::free_var_names(self, structural, nonstructural)
    }

    fn propose_change(&self, name: &str, structure_is_fixed: bool) -> (Self, f64, f64) {
        crate::trace::Trace::propose_change(self, name, structure_is_fixed)
    }

    fn logprob(&self) -> f64 {
        crate::trace::Trace::logprob(self)
    }

    fn newlogprob(&self) -> f64 {
        crate::trace::Trace::newlogprob(self)
    }

    fn oldlogprob(&self) -> f64 {
        crate::trace::Trace::oldlogprob(self)
    }

    fn conditions_satisfied(&self) -> bool {
        crate::trace::Trace::conditions_satisfied(self)
    }

    fn is_structural(&self, name: &str) -> bool {
        self.core
            .get(name)
            .expect("name came from this trace's own free_var_names")
            .structural
    }

    fn rerun(&self) -> Self {
        let mut next = self.clone();
        next.update(true);
        next
    }
}
