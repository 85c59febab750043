//! Loop annotations: `for`/`while`/`map` wrappers that push one
//! [`crate::naming::scope`] per iteration, so iterated ERP calls get a
//! per-iteration-distinct identity without the caller writing `scope`
//! explicitly at every loop site.

use crate::naming::scope;

/// Runs `body` once per item of `iter`, each inside its own naming scope.
#[track_caller]
pub fn prfor<I, F>(iter: I, mut body: F)
where
    I: IntoIterator,
    F: FnMut(I::Item),
{
    for item in iter {
        scope(|| body(item));
    }
}

/// Runs `body` while `cond` holds, each iteration inside its own naming
/// scope (including the final, condition-failing check of `cond` itself is
/// not scoped — only the body is).
#[track_caller]
pub fn prwhile<C, B>(mut cond: C, mut body: B)
where
    C: FnMut() -> bool,
    B: FnMut(),
{
    while cond() {
        scope(&mut body);
    }
}

/// Maps `f` over `iter`, each application inside its own naming scope,
/// collecting results in order.
#[track_caller]
pub fn prmap<I, F, R>(iter: I, mut f: F) -> Vec<R>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> R,
{
    iter.into_iter().map(|item| scope(|| f(item))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::trace_mh;
    use crate::erp;

    #[test]
    fn prfor_gives_each_iteration_a_distinct_erp_identity() {
        let mut trace = crate::trace::Trace::new(|| {
            let mut results = Vec::new();
            prfor(0..3, |_| results.push(erp::flip(0.5)));
            results
        });
        trace.update(false);
        // Three distinct records, not one reused across iterations.
        assert_eq!(trace.free_var_names(true, true).len(), 3);
    }

    #[test]
    fn direct_conditioning_of_value_scenario_matches_expected_mean() {
        // First 5 of 10 iterations pin flip(0.5) to true; the rest are free.
        // Expected mean over the returned vector: 0.75.
        let samples = trace_mh(
            || {
                prmap(0..10, |i| {
                    if i < 5 {
                        erp::flip_with(0.5, false, Some(true))
                    } else {
                        erp::flip(0.5)
                    }
                })
            },
            500,
            1,
            false,
        )
        .unwrap();
        let mean: f64 = samples
            .iter()
            .map(|s| {
                let trues = s.value.iter().filter(|&&v| v).count();
                trues as f64 / s.value.len() as f64
            })
            .sum::<f64>()
            / samples.len() as f64;
        assert!((mean - 0.75).abs() < 0.07, "mean was {mean}");
    }
}
