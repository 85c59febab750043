//! The ambient-trace registry: a thread-local slot holding a raw pointer to
//! "the trace currently being filled". ERP calls and `condition`/`factor`
//! read this slot and degrade gracefully when it is empty.
//!
//! Modeled as a thread-local cell holding an optional pointer rather than a
//! generic `RefCell<Option<&mut Trace<T>>>`, so that this module does not
//! need to be generic over the user's return type `T` — only
//! [`super::TraceCore`] (the untyped bookkeeping half of a trace) needs to
//! be visible here. Installation is scoped: [`install`] returns a guard that
//! restores whatever was previously installed when dropped, including on
//! unwind, so a panicking user computation cannot leave a dangling or stale
//! ambient pointer behind.

use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::erp::ErpKind;
use crate::value::Value;

use super::TraceCore;

thread_local! {
    static AMBIENT: Cell<Option<NonNull<TraceCore>>> = const { Cell::new(None) };
}

pub(crate) struct AmbientGuard {
    previous: Option<NonNull<TraceCore>>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        AMBIENT.with(|cell| cell.set(self.previous));
    }
}

/// Installs `core` as the ambient trace until the returned guard drops.
/// Nested installs (an inner query started mid-`update` of an outer one)
/// save and restore correctly, last-in-first-out.
pub(crate) fn install(core: &mut TraceCore) -> AmbientGuard {
    let ptr = NonNull::from(core);
    let previous = AMBIENT.with(|cell| cell.replace(Some(ptr)));
    AmbientGuard { previous }
}

/// Looks up (or samples, if no trace is installed) the value for one ERP
/// call.
// SAFETY: `ptr` was installed by `install` from a `&mut TraceCore` borrowed
// for the lifetime of its guard; `update` holds that guard across the one
// user-computation call that can re-enter this module, and the engine is
// single-threaded, so at most one live `&mut TraceCore` access happens at a
// time and it never outlives the borrow it came from.
pub(crate) fn lookup_or_sample(
    name: String,
    erp: ErpKind,
    params: Rc<[f64]>,
    is_structural: bool,
    conditioned_value: Option<Value>,
) -> Value {
    match AMBIENT.with(|cell| cell.get()) {
        Some(mut ptr) => unsafe {
            ptr.as_mut()
                .lookup(name, erp, params, is_structural, conditioned_value)
        },
        None => conditioned_value.unwrap_or_else(|| erp.sample(&params)),
    }
}

/// `factor(n)`: adds `n` to the ambient trace's `logprob`, a no-op if none
/// is installed.
pub(crate) fn add_factor(n: f64) {
    if let Some(mut ptr) = AMBIENT.with(|cell| cell.get()) {
        unsafe { ptr.as_mut().add_factor(n) };
    }
}

/// `condition(b)`: conjoins `b` into the ambient trace's
/// `conditions_satisfied`, a no-op if none is installed.
pub(crate) fn condition_on(b: bool) {
    if let Some(mut ptr) = AMBIENT.with(|cell| cell.get()) {
        unsafe { ptr.as_mut().condition_on(b) };
    }
}
