use thiserror::Error;

// ---------------------------------------------------------------------------
// Feature contract – the single source of truth for model column names
// ---------------------------------------------------------------------------

/// Exact column identifiers the regression model was fit against.
/// A mismatch here silently degrades predictions (or errors, depending on
/// how the training framework aligned columns), so every record and every
/// loaded artifact is checked against these strings.
pub const AMINE_FLOW: &str = "Amina Flow";
pub const AIR_FLOW: &str = "Flotation Column 01 Air Flow";
pub const IRON_CONCENTRATE: &str = "% Iron Concentrate";

/// Canonical feature order used by [`FeatureRecord`] and the slider table.
pub const FEATURE_NAMES: [&str; 3] = [AMINE_FLOW, AIR_FLOW, IRON_CONCENTRATE];

/// One slider's configuration, tied to its model column.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    /// Model column identifier (must be one of [`FEATURE_NAMES`]).
    pub field: &'static str,
    /// Human-readable slider label.
    pub label: &'static str,
    /// Explanatory caption shown under the slider.
    pub caption: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// The three process parameters, in [`FEATURE_NAMES`] order.
///
/// The iron-concentrate default in the original tool was 0, outside its own
/// declared range; here it is the range midpoint so the slider starts valid.
pub const FEATURES: [FeatureSpec; 3] = [
    FeatureSpec {
        field: AMINE_FLOW,
        label: "Amine flow rate (m³/s)",
        caption: "Amine flow controls the selectivity and efficiency of the \
                  separation between silica and iron.",
        min: 241.70,
        max: 739.30,
        default: 488.43,
        step: 1.0,
    },
    FeatureSpec {
        field: AIR_FLOW,
        label: "Column 1 air flow (m³/s)",
        caption: "Air flow governs bubble formation, count and size; the \
                  bubbles carry the silica particles to the froth.",
        min: 175.85,
        max: 372.44,
        default: 280.13,
        step: 1.0,
    },
    FeatureSpec {
        field: IRON_CONCENTRATE,
        label: "Iron concentrate (%)",
        caption: "The iron percentage in the concentrate is inversely related \
                  to silica quality.",
        min: 62.51,
        max: 68.01,
        default: 65.26,
        step: 1.0,
    },
];

// ---------------------------------------------------------------------------
// FeatureRecord – one immutable row of named inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("unknown feature '{0}' (expected one of {FEATURE_NAMES:?})")]
    UnknownField(String),
    #[error("feature '{0}' set twice")]
    DuplicateField(String),
    #[error("missing feature '{0}'")]
    MissingField(&'static str),
    #[error("feature '{field}' is not a finite number ({value})")]
    NotFinite { field: &'static str, value: f64 },
}

/// Exactly the three named numeric inputs for one inference call.
/// Built fresh per prediction, immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [f64; 3],
}

impl FeatureRecord {
    pub fn builder() -> FeatureRecordBuilder {
        FeatureRecordBuilder::default()
    }

    /// Bypass the builder's finiteness check, for exercising NaN handling.
    #[cfg(test)]
    pub(crate) fn from_raw(values: [f64; 3]) -> Self {
        FeatureRecord { values }
    }

    /// Value by canonical feature index (position in [`FEATURE_NAMES`]).
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Look up a value by its exact column name.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values[i])
    }

    /// The column names this record carries (always all three, in order).
    pub fn names(&self) -> &'static [&'static str; 3] {
        &FEATURE_NAMES
    }
}

/// Fail-fast construction: every field must be present exactly once, known,
/// and finite before the record reaches the predictor.
#[derive(Debug, Default)]
pub struct FeatureRecordBuilder {
    slots: [Option<f64>; 3],
}

impl FeatureRecordBuilder {
    pub fn set(mut self, name: &str, value: f64) -> Result<Self, FeatureError> {
        let idx = FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .ok_or_else(|| FeatureError::UnknownField(name.to_string()))?;
        if self.slots[idx].is_some() {
            return Err(FeatureError::DuplicateField(name.to_string()));
        }
        self.slots[idx] = Some(value);
        Ok(self)
    }

    pub fn build(self) -> Result<FeatureRecord, FeatureError> {
        let mut values = [0.0; 3];
        for (i, slot) in self.slots.iter().enumerate() {
            let v = slot.ok_or(FeatureError::MissingField(FEATURE_NAMES[i]))?;
            if !v.is_finite() {
                return Err(FeatureError::NotFinite {
                    field: FEATURE_NAMES[i],
                    value: v,
                });
            }
            values[i] = v;
        }
        Ok(FeatureRecord { values })
    }
}
