//! Field types, values and immutable field descriptors
//!
//! Descriptors are produced once, through [`FieldBuilder`], and never change
//! afterwards. Everything a validator or a documentation generator needs to
//! know about a parameter lives on its descriptor.

use crate::phase::{Phase, PhaseSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value of the engine's integer parameters (32-bit signed)
pub const INT_MAX: i64 = 2_147_483_647;

/// Largest value of the engine's float parameters (32-bit float)
pub const FLOAT_MAX: f64 = f32::MAX as f64;

/// Semantic type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    String,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::String => "string",
        };
        f.write_str(name)
    }
}

/// A populated parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::String(_) => FieldType::String,
        }
    }

    /// Convert into `ty`, widening integers into floats.
    ///
    /// Returns `None` for any other type change.
    pub fn coerce_to(self, ty: FieldType) -> Option<FieldValue> {
        match (self, ty) {
            (FieldValue::Integer(v), FieldType::Float) => Some(FieldValue::Float(v as f64)),
            (value, ty) if value.field_type() == ty => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Boolean(v) => write!(f, "{}", v),
            FieldValue::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(f64::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

/// Legal value space of a parameter. Numeric bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Range {
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    /// Allowed string values, compared ASCII case-insensitively
    OneOf { values: Vec<&'static str> },
}

impl Range {
    /// Whether `value` lies inside this range. A value of a kind the range
    /// does not describe is never contained.
    pub fn contains(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Range::Integer { min, max }, FieldValue::Integer(v)) => min <= v && v <= max,
            (Range::Float { min, max }, FieldValue::Float(v)) => *min <= *v && *v <= *max,
            (Range::Float { min, max }, FieldValue::Integer(v)) => {
                let v = *v as f64;
                *min <= v && v <= *max
            }
            (Range::OneOf { values }, FieldValue::String(v)) => {
                values.iter().any(|allowed| allowed.eq_ignore_ascii_case(v))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Integer { min, max } => write!(f, "[{}, {}]", min, max),
            Range::Float { min, max } => write!(f, "[{}, {}]", min, max),
            Range::OneOf { values } => write!(f, "{{{}}}", values.join(", ")),
        }
    }
}

/// Metadata of one named parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    name: &'static str,
    description: &'static str,
    #[serde(rename = "type")]
    field_type: FieldType,
    default: Option<FieldValue>,
    range: Option<Range>,
    phases: PhaseSet,
    required: bool,
}

impl FieldDescriptor {
    pub fn builder(name: &'static str, field_type: FieldType) -> FieldBuilder {
        FieldBuilder {
            descriptor: FieldDescriptor {
                name,
                description: "",
                field_type,
                default: None,
                range: None,
                phases: PhaseSet::EMPTY,
                required: true,
            },
        }
    }

    pub fn integer(name: &'static str) -> FieldBuilder {
        Self::builder(name, FieldType::Integer)
    }

    pub fn float(name: &'static str) -> FieldBuilder {
        Self::builder(name, FieldType::Float)
    }

    pub fn boolean(name: &'static str) -> FieldBuilder {
        Self::builder(name, FieldType::Boolean)
    }

    pub fn string(name: &'static str) -> FieldBuilder {
        Self::builder(name, FieldType::String)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn default_value(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }

    pub fn phases(&self) -> PhaseSet {
        self.phases
    }

    /// Whether a missing value is an error in an applicable phase.
    ///
    /// A required field that carries a default is never missing, since
    /// defaults are merged before the check runs.
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn applies_to(&self, phase: Phase) -> bool {
        self.phases.contains(phase)
    }

    /// Whether `value` satisfies the declared type and range.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        let Some(value) = value.clone().coerce_to(self.field_type) else {
            return false;
        };
        self.range.as_ref().map_or(true, |range| range.contains(&value))
    }
}

/// Fluent declaration of a [`FieldDescriptor`]
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    descriptor: FieldDescriptor,
}

impl FieldBuilder {
    pub fn description(mut self, description: &'static str) -> Self {
        self.descriptor.description = description;
        self
    }

    /// Declare the default. Integer literals given to a float field are
    /// widened.
    pub fn set_default(mut self, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        let ty = self.descriptor.field_type;
        self.descriptor.default = Some(value.clone().coerce_to(ty).unwrap_or(value));
        self
    }

    /// Inclusive numeric range. Float fields store it as a float range.
    pub fn set_range(mut self, min: impl Into<FieldValue>, max: impl Into<FieldValue>) -> Self {
        let range = match (min.into(), max.into()) {
            (FieldValue::Integer(min), FieldValue::Integer(max))
                if self.descriptor.field_type == FieldType::Integer =>
            {
                Some(Range::Integer { min, max })
            }
            (min, max) => match (
                min.coerce_to(FieldType::Float).and_then(|v| v.as_f64()),
                max.coerce_to(FieldType::Float).and_then(|v| v.as_f64()),
            ) {
                (Some(min), Some(max)) => Some(Range::Float { min, max }),
                _ => None,
            },
        };
        self.descriptor.range = range;
        self
    }

    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.descriptor.range = Some(Range::OneOf {
            values: values.to_vec(),
        });
        self
    }

    /// Mark the field as optional: leaving it unset is legal even without a
    /// default.
    pub fn allow_empty_without_default(mut self) -> Self {
        self.descriptor.required = false;
        self
    }

    pub fn for_phase(mut self, phase: Phase) -> Self {
        self.descriptor.phases = self.descriptor.phases.with(phase);
        self
    }

    pub fn for_build(self) -> Self {
        self.for_phase(Phase::Build)
    }

    pub fn for_search(self) -> Self {
        self.for_phase(Phase::Search)
    }

    pub fn for_range_search(self) -> Self {
        self.for_phase(Phase::RangeSearch)
    }

    pub fn for_deserialize(self) -> Self {
        self.for_phase(Phase::Deserialize)
    }

    pub fn for_build_and_search(self) -> Self {
        self.for_build().for_search().for_range_search()
    }

    pub fn build(self) -> FieldDescriptor {
        self.descriptor
    }
}
