use std::rc::Rc;

/// The sampled value of a choice record.
///
/// ERPs are typed per family (boolean for [`crate::erp::flip`], real for the
/// continuous families, integer for the discrete ones, a probability
/// simplex for [`crate::erp::dirichlet`]), but a [`crate::trace::Trace`]
/// stores them homogeneously, so callers downcast at the `flip`/`gaussian`/…
/// entry points rather than the trace internals needing to be generic over
/// ERP value type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Real(f64),
    Int(i64),
    Simplex(Rc<[f64]>),
}

impl Value {
    pub(crate) fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => unreachable!("erp kind guarantees record value matches its family"),
        }
    }

    pub(crate) fn as_real(&self) -> f64 {
        match self {
            Value::Real(r) => *r,
            _ => unreachable!("erp kind guarantees record value matches its family"),
        }
    }

    pub(crate) fn as_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            _ => unreachable!("erp kind guarantees record value matches its family"),
        }
    }

    pub(crate) fn as_simplex(&self) -> &[f64] {
        match self {
            Value::Simplex(s) => s,
            _ => unreachable!("erp kind guarantees record value matches its family"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Simplex(v.into())
    }
}
