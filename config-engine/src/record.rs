//! Per-operation configuration record
//!
//! A record is created fresh for each operation request, populated from the
//! caller's input, prepared for exactly one phase and then handed read-only
//! to the engine.

use crate::error::{ConfigError, Result};
use crate::field::{FieldDescriptor, FieldValue, Range};
use crate::phase::Phase;
use crate::schema::Schema;
use std::collections::BTreeMap;

/// How a set value came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    /// Supplied by the caller
    Explicit,
    /// Declared default merged in for the active phase
    Default,
    /// Filled in by a phase adjuster
    Computed,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value: FieldValue,
    origin: ValueOrigin,
}

#[derive(Debug, Clone)]
pub struct ConfigRecord {
    schema: &'static Schema,
    values: BTreeMap<&'static str, Slot>,
}

impl ConfigRecord {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Populate `name` with a caller-supplied value.
    ///
    /// Only the type is checked here; ranges are checked when the record is
    /// prepared for a phase.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.store(name, value.into(), ValueOrigin::Explicit)
    }

    /// Fill `name` with a value computed by a phase adjuster.
    pub fn set_computed(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.store(name, value.into(), ValueOrigin::Computed)
    }

    fn store(&mut self, name: &str, value: FieldValue, origin: ValueOrigin) -> Result<()> {
        let field = self.descriptor(name)?;
        let found = value.field_type();
        let value = value
            .coerce_to(field.field_type())
            .ok_or_else(|| ConfigError::TypeMismatch {
                field: field.name().to_string(),
                expected: field.field_type(),
                found,
            })?;
        self.values.insert(field.name(), Slot { value, origin });
        Ok(())
    }

    fn descriptor(&self, name: &str) -> Result<&'static FieldDescriptor> {
        self.schema
            .get(name)
            .ok_or_else(|| ConfigError::UnknownField(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name).map(|slot| &slot.value)
    }

    pub fn origin(&self, name: &str) -> Option<ValueOrigin> {
        self.values.get(name).map(|slot| slot.origin)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Set values with their names, in name order.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(name, slot)| (*name, &slot.value))
    }

    /// Merge declared defaults into unset fields that apply to `phase`.
    ///
    /// Returns how many fields were filled.
    pub fn apply_defaults(&mut self, phase: Phase) -> usize {
        let mut filled = 0;
        for field in self.schema.fields_for(phase) {
            if self.values.contains_key(field.name()) {
                continue;
            }
            if let Some(default) = field.default_value() {
                self.values.insert(
                    field.name(),
                    Slot {
                        value: default.clone(),
                        origin: ValueOrigin::Default,
                    },
                );
                filled += 1;
            }
        }
        filled
    }

    /// Check presence and range of every field that applies to `phase`.
    ///
    /// Fields outside the phase are ignored even when set.
    pub fn check(&self, phase: Phase) -> Result<()> {
        for field in self.schema.fields_for(phase) {
            match self.values.get(field.name()) {
                None if field.is_required() => {
                    return Err(ConfigError::MissingRequired {
                        field: field.name().to_string(),
                        phase,
                    });
                }
                None => {}
                Some(slot) => {
                    if let Some(range) = field.range() {
                        if !range.contains(&slot.value) {
                            return Err(ConfigError::OutOfRange(out_of_range_message(
                                field.name(),
                                &slot.value,
                                range,
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn out_of_range_message(name: &str, value: &FieldValue, range: &Range) -> String {
    match range {
        Range::OneOf { .. } => format!("param '{}' ({}) should be one of {}", name, value, range),
        _ => format!("param '{}' ({}) should be in range {}", name, value, range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldType};
    use lazy_static::lazy_static;

    lazy_static! {
        static ref SCHEMA: Schema = Schema::new(
            "test",
            vec![
                FieldDescriptor::integer("beamwidth")
                    .set_default(8)
                    .set_range(1, 128)
                    .for_search()
                    .build(),
                FieldDescriptor::float("budget_gb")
                    .set_range(0, 1024)
                    .for_build()
                    .build(),
                FieldDescriptor::integer("threads")
                    .allow_empty_without_default()
                    .for_build()
                    .build(),
                FieldDescriptor::boolean("warm_up")
                    .set_default(false)
                    .for_deserialize()
                    .build(),
            ],
        );
    }

    #[test]
    fn test_set_rejects_unknown_field() {
        let mut record = ConfigRecord::new(&SCHEMA);
        let err = record.set("nope", 1).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField(name) if name == "nope"));
    }

    #[test]
    fn test_set_rejects_type_mismatch() {
        let mut record = ConfigRecord::new(&SCHEMA);
        let err = record.set("beamwidth", "wide").unwrap_err();
        match err {
            ConfigError::TypeMismatch { field, expected, found } => {
                assert_eq!(field, "beamwidth");
                assert_eq!(expected, FieldType::Integer);
                assert_eq!(found, FieldType::String);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!record.is_set("beamwidth"));
    }

    #[test]
    fn test_set_widens_integer_into_float() {
        let mut record = ConfigRecord::new(&SCHEMA);
        record.set("budget_gb", 4).unwrap();
        assert_eq!(record.get_f64("budget_gb"), Some(4.0));
        assert_eq!(record.origin("budget_gb"), Some(ValueOrigin::Explicit));
    }

    #[test]
    fn test_apply_defaults_only_for_phase() {
        let mut record = ConfigRecord::new(&SCHEMA);
        assert_eq!(record.apply_defaults(Phase::Search), 1);
        assert_eq!(record.get_i64("beamwidth"), Some(8));
        assert_eq!(record.origin("beamwidth"), Some(ValueOrigin::Default));
        assert!(!record.is_set("warm_up"));
    }

    #[test]
    fn test_apply_defaults_keeps_explicit_values() {
        let mut record = ConfigRecord::new(&SCHEMA);
        record.set("beamwidth", 4).unwrap();
        assert_eq!(record.apply_defaults(Phase::Search), 0);
        assert_eq!(record.get_i64("beamwidth"), Some(4));
        assert_eq!(record.origin("beamwidth"), Some(ValueOrigin::Explicit));
    }

    #[test]
    fn test_check_missing_required() {
        let record = ConfigRecord::new(&SCHEMA);
        let err = record.check(Phase::Build).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired { ref field, phase: Phase::Build } if field == "budget_gb"
        ));
    }

    #[test]
    fn test_check_allows_empty_optional() {
        let mut record = ConfigRecord::new(&SCHEMA);
        record.set("budget_gb", 1.5).unwrap();
        assert!(record.check(Phase::Build).is_ok());
        assert!(!record.is_set("threads"));
    }

    #[test]
    fn test_check_out_of_range_message() {
        let mut record = ConfigRecord::new(&SCHEMA);
        record.set("beamwidth", 0).unwrap();
        let err = record.check(Phase::Search).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(
            err.to_string(),
            "Configuration value out of range: param 'beamwidth' (0) should be in range [1, 128]"
        );
    }

    #[test]
    fn test_check_ignores_fields_of_other_phases() {
        let mut record = ConfigRecord::new(&SCHEMA);
        record.set("beamwidth", 1000).unwrap();
        record.set("budget_gb", 1).unwrap();
        assert!(record.check(Phase::Build).is_ok());
        assert!(record.check(Phase::Search).is_err());
    }

    #[test]
    fn test_set_computed_marks_origin() {
        let mut record = ConfigRecord::new(&SCHEMA);
        record.set_computed("beamwidth", 16).unwrap();
        assert_eq!(record.origin("beamwidth"), Some(ValueOrigin::Computed));
        let values: Vec<_> = record.values().collect();
        assert_eq!(values, vec![("beamwidth", &FieldValue::Integer(16))]);
    }
}
