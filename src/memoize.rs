//! `mem`: memoises a function of one argument tuple so repeated calls with
//! equal arguments short-circuit to a cached return value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Wraps `f` so that equal-argument calls return the cached value instead
/// of recomputing. Any ERP calls inside `f` are therefore only resolved
/// against the trace on the first call per distinct argument — later calls
/// with the same argument never re-enter `f`'s body, so the *first* call's
/// dynamic naming context is the one the trace ever sees for that
/// argument, deterministically, across re-executions.
pub fn mem<A, R>(f: impl Fn(A) -> R + 'static) -> impl Fn(A) -> R
where
    A: Eq + Hash + Clone,
    R: Clone,
{
    let cache: Rc<RefCell<HashMap<A, R>>> = Rc::new(RefCell::new(HashMap::new()));
    move |args: A| {
        if let Some(cached) = cache.borrow().get(&args) {
            return cached.clone();
        }
        let result = f(args.clone());
        cache.borrow_mut().insert(args, result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::trace_mh;
    use crate::erp;
    use std::cell::Cell;

    #[test]
    fn repeated_calls_with_the_same_argument_do_not_recompute() {
        let calls = Rc::new(Cell::new(0));
        let calls_inner = Rc::clone(&calls);
        let f = mem(move |x: i64| {
            calls_inner.set(calls_inner.get() + 1);
            x * 2
        });
        assert_eq!(f(1), 2);
        assert_eq!(f(1), 2);
        assert_eq!(f(2), 4);
        assert_eq!(f(1), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn memoised_flip_scenario_matches_expected_mean() {
        // f = mem(x -> flip(0.8)); return f(1) && f(2) && f(1) && f(2)
        let samples = trace_mh(
            || {
                let f = mem(|_x: i64| erp::flip(0.8));
                f(1) && f(2) && f(1) && f(2)
            },
            3_000,
            1,
            false,
        )
        .unwrap();
        let mean = samples.iter().filter(|s| s.value).count() as f64 / samples.len() as f64;
        assert!((mean - 0.64).abs() < 0.07, "mean was {mean}");
    }
}
