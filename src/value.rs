//! Decoded result records produced by parameter scripts.

/// A two-state decoded value with a label for each state (e.g. MIL off/on).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralValue {
    pub value: bool,
    pub value_if_false: String,
    pub value_if_true: String,
    /// Output field of the parameter this record fills.
    pub property: String,
}

impl LiteralValue {
    /// The label matching `value`.
    pub fn label(&self) -> &str {
        if self.value {
            &self.value_if_true
        } else {
            &self.value_if_false
        }
    }
}

/// A numeric decoded value with its nominal range and units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericalValue {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub units: String,
    /// Output field of the parameter this record fills.
    pub property: String,
}

impl NumericalValue {
    /// Whether `min <= value <= max`. Not enforced anywhere: an out-of-range
    /// value may be exactly the defect a caller wants to see.
    pub fn in_range(&self) -> bool {
        self.min <= self.value && self.value <= self.max
    }
}

/// Results of one decoder run, tagged with where the data came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterData {
    pub param_name: String,
    pub source_name: String,
    /// Uppercase hex of the response header, empty when the protocol has none.
    pub source_address: String,
    pub literals: Vec<LiteralValue>,
    pub numericals: Vec<NumericalValue>,
}

impl ParameterData {
    pub fn literal(&self, property: &str) -> Option<&LiteralValue> {
        self.literals.iter().find(|l| l.property == property)
    }

    pub fn numerical(&self, property: &str) -> Option<&NumericalValue> {
        self.numericals.iter().find(|n| n.property == property)
    }
}
