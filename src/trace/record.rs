//! A single random choice, as stored in a trace.

use std::rc::Rc;

use crate::erp::ErpKind;
use crate::value::Value;

/// The bookkeeping a trace keeps for one named random choice.
///
/// `active` tracks whether the current run of the computation actually
/// touched this name; after an update, inactive records are garbage (the
/// control flow stopped visiting that call site) and are dropped rather
/// than carried forward.
#[derive(Clone, Debug)]
pub struct ChoiceRecord {
    pub name: String,
    pub erp: ErpKind,
    pub params: Rc<[f64]>,
    pub val: Value,
    pub logprob: f64,
    pub active: bool,
    pub conditioned: bool,
    pub structural: bool,
}
