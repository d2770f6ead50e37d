//! Collects the literal and numerical records a decoder emits during one run.

use crate::error::{EvalError, RecordKind};
use crate::value::{LiteralValue, NumericalValue};

#[derive(Debug, Clone, Default)]
pub struct ResultSink {
    literals: Vec<LiteralValue>,
    numericals: Vec<NumericalValue>,
}

impl ResultSink {
    pub fn new() -> Self {
        ResultSink::default()
    }

    /// Append a literal record. The only check is a non-empty `property`.
    pub fn record_literal(
        &mut self,
        value: bool,
        value_if_false: impl Into<String>,
        value_if_true: impl Into<String>,
        property: impl Into<String>,
    ) -> Result<(), EvalError> {
        self.push_literal(LiteralValue {
            value,
            value_if_false: value_if_false.into(),
            value_if_true: value_if_true.into(),
            property: property.into(),
        })
    }

    /// Append a numerical record. `min <= value <= max` is left to the caller.
    pub fn record_numerical(
        &mut self,
        value: f64,
        min: f64,
        max: f64,
        units: impl Into<String>,
        property: impl Into<String>,
    ) -> Result<(), EvalError> {
        self.push_numerical(NumericalValue {
            value,
            min,
            max,
            units: units.into(),
            property: property.into(),
        })
    }

    pub fn push_literal(&mut self, record: LiteralValue) -> Result<(), EvalError> {
        if record.property.is_empty() {
            return Err(EvalError::EmptyProperty(RecordKind::Literal));
        }
        self.literals.push(record);
        Ok(())
    }

    pub fn push_numerical(&mut self, record: NumericalValue) -> Result<(), EvalError> {
        if record.property.is_empty() {
            return Err(EvalError::EmptyProperty(RecordKind::Numerical));
        }
        self.numericals.push(record);
        Ok(())
    }

    pub fn literals(&self) -> &[LiteralValue] {
        &self.literals
    }

    pub fn numericals(&self) -> &[NumericalValue] {
        &self.numericals
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.numericals.is_empty()
    }

    pub fn clear(&mut self) {
        self.literals.clear();
        self.numericals.clear();
    }
}
