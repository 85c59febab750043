//! The naming oracle: derives a stable, replay-reproducing identity for
//! every random choice a probabilistic computation makes.
//!
//! The source engine this is modeled on walks the Python interpreter's call
//! stack to build this identity. There is no portable, safe equivalent in
//! Rust, so this crate takes the alternative the design space allows for:
//! an explicit path of annotated scopes. [`scope`] pushes one path segment
//! for the duration of a closure, keyed by its call site and an occurrence
//! counter scoped to the current path prefix; [`crate::prfor`],
//! [`crate::prwhile`] and [`crate::prmap`] are `scope` applied once per
//! iteration. A recursive probabilistic function must wrap its own
//! recursive call in `scope` to get a distinct identity per depth — this is
//! the documented replacement for the source's implicit per-stack-frame
//! identity.
//!
//! Every ERP call appends one further implicit segment for its own call
//! site, so two calls to the same ERP on the same line still get distinct
//! names without requiring a `scope` wrapper.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::panic::Location;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct CallSite {
    file: &'static str,
    line: u32,
    column: u32,
}

impl CallSite {
    #[track_caller]
    fn here() -> Self {
        let loc = Location::caller();
        CallSite {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }

    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "{}:{}:{}", self.file, self.line, self.column);
    }
}

struct PathSegment {
    prefix_len: usize,
    occurrence: u64,
}

#[derive(Default)]
struct NamingState {
    /// Concatenated `site#occurrence|` path built up by active `scope`s.
    path: String,
    /// One entry per active `scope`, recording where `path` was truncated
    /// back to on pop.
    stack: Vec<PathSegment>,
    /// Occurrence counts keyed by `path-prefix + call site`, reset at the
    /// start of every `Trace::update`.
    counters: HashMap<String, u64>,
}

impl NamingState {
    fn next_occurrence(&mut self, site: CallSite) -> u64 {
        let mut key = self.path.clone();
        site.write_to(&mut key);
        let counter = self.counters.entry(key).or_insert(0);
        let occurrence = *counter;
        *counter += 1;
        occurrence
    }

    fn push(&mut self, site: CallSite) {
        let occurrence = self.next_occurrence(site);
        let prefix_len = self.path.len();
        site.write_to(&mut self.path);
        let _ = write!(self.path, "#{}|", occurrence);
        self.stack.push(PathSegment {
            prefix_len,
            occurrence,
        });
    }

    fn pop(&mut self) {
        if let Some(segment) = self.stack.pop() {
            self.path.truncate(segment.prefix_len);
        }
    }

    fn leaf_name(&mut self, site: CallSite) -> String {
        let occurrence = self.next_occurrence(site);
        let mut name = self.path.clone();
        site.write_to(&mut name);
        let _ = write!(name, "#{}", occurrence);
        name
    }

    fn reset(&mut self) {
        debug_assert!(self.stack.is_empty(), "naming scopes must be balanced");
        self.path.clear();
        self.stack.clear();
        self.counters.clear();
    }
}

thread_local! {
    static NAMING: RefCell<NamingState> = RefCell::new(NamingState::default());
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        NAMING.with(|n| n.borrow_mut().pop());
    }
}

/// Runs `f` with one more segment pushed onto the current naming path,
/// identified by `scope`'s own call site.
///
/// Wrap a recursive probabilistic call, or a loop body making ERP calls
/// inside it (if you're not already using [`crate::prfor`]/[`crate::prwhile`]/
/// [`crate::prmap`]), so that each invocation gets an identity distinct from
/// its siblings.
#[track_caller]
pub fn scope<R>(f: impl FnOnce() -> R) -> R {
    let site = CallSite::here();
    NAMING.with(|n| n.borrow_mut().push(site));
    let _guard = ScopeGuard;
    f()
}

/// Computes the name for an ERP call made at the caller's location, given
/// the current naming path.
#[track_caller]
pub(crate) fn erp_name() -> String {
    let site = CallSite::here();
    NAMING.with(|n| n.borrow_mut().leaf_name(site))
}

/// Clears the naming path and occurrence counters. Called once at the start
/// of every `Trace::update`.
pub(crate) fn reset() {
    NAMING.with(|n| n.borrow_mut().reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_leaf_calls_on_one_line_get_distinct_names() {
        reset();
        let a = erp_name();
        let b = erp_name();
        assert_ne!(a, b);
    }

    #[test]
    fn same_control_flow_path_replays_to_the_same_name() {
        reset();
        let first = scope(erp_name);
        reset();
        let second = scope(erp_name);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_scopes_give_distinct_names() {
        reset();
        let a = scope(erp_name);
        let b = scope(erp_name);
        assert_ne!(a, b);
    }

    #[test]
    fn recursion_depth_via_scope_is_distinguishable() {
        reset();
        fn recurse(depth: u32, names: &mut Vec<String>) {
            names.push(erp_name());
            if depth > 0 {
                scope(|| recurse(depth - 1, names));
            }
        }
        let mut names = Vec::new();
        recurse(3, &mut names);
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
