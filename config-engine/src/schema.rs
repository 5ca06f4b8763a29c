//! Flat, inspectable descriptor tables
//!
//! An index family's schema is the base field set composed with the
//! family's own fields. When both declare the same name, the family's
//! declaration wins and keeps the base field's position.

use crate::error::Result;
use crate::field::{FieldDescriptor, FieldValue};
use crate::phase::Phase;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    index: HashMap<&'static str, usize>,
}

impl Schema {
    pub fn new(name: &'static str, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        let mut schema = Schema {
            name,
            fields: Vec::new(),
            index: HashMap::new(),
        };
        for field in fields {
            schema.insert(field);
        }
        schema
    }

    /// Merge `base` and `family` into one table.
    pub fn compose(
        name: &'static str,
        base: impl IntoIterator<Item = FieldDescriptor>,
        family: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Self {
        Schema::new(name, base.into_iter().chain(family))
    }

    fn insert(&mut self, field: FieldDescriptor) {
        match self.index.get(field.name()) {
            Some(&slot) => {
                if let Some(existing) = self.fields.get_mut(slot) {
                    *existing = field;
                }
            }
            None => {
                self.index.insert(field.name(), self.fields.len());
                self.fields.push(field);
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).and_then(|&slot| self.fields.get(slot))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Every descriptor, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Descriptors that are read during `phase`.
    pub fn fields_for(&self, phase: Phase) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.applies_to(phase))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `name` is declared and relevant to `phase`.
    pub fn is_applicable(&self, name: &str, phase: Phase) -> bool {
        self.get(name).is_some_and(|f| f.applies_to(phase))
    }

    /// Whether `value` is a legal value for `name`. Unknown names accept
    /// nothing.
    pub fn accepts(&self, name: &str, value: &FieldValue) -> bool {
        self.get(name).is_some_and(|f| f.accepts(value))
    }

    /// Schema metadata as JSON, for documentation or input-form generation.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn sample() -> Schema {
        Schema::compose(
            "sample",
            vec![
                FieldDescriptor::string("metric_type")
                    .allow_empty_without_default()
                    .for_build()
                    .build(),
                FieldDescriptor::integer("k").set_default(10).for_search().build(),
            ],
            vec![
                FieldDescriptor::integer("beamwidth")
                    .set_default(8)
                    .set_range(1, 128)
                    .for_search()
                    .build(),
                FieldDescriptor::string("metric_type")
                    .set_default("L2")
                    .one_of(&["L2", "IP"])
                    .for_build()
                    .for_search()
                    .build(),
            ],
        )
    }

    #[test]
    fn test_compose_overrides_in_place() {
        let schema = sample();
        assert_eq!(schema.len(), 3);

        let names: Vec<_> = schema.fields().map(|f| f.name()).collect();
        assert_eq!(names, vec!["metric_type", "k", "beamwidth"]);

        let metric = schema.get("metric_type").unwrap();
        assert_eq!(metric.default_value(), Some(&FieldValue::from("L2")));
        assert!(metric.applies_to(Phase::Search));
    }

    #[test]
    fn test_is_applicable() {
        let schema = sample();
        assert!(schema.is_applicable("beamwidth", Phase::Search));
        assert!(!schema.is_applicable("beamwidth", Phase::Build));
        assert!(!schema.is_applicable("missing", Phase::Search));
    }

    #[test]
    fn test_accepts() {
        let schema = sample();
        assert!(schema.accepts("beamwidth", &FieldValue::Integer(128)));
        assert!(!schema.accepts("beamwidth", &FieldValue::Integer(129)));
        assert!(schema.accepts("metric_type", &FieldValue::from("ip")));
        assert!(!schema.accepts("metric_type", &FieldValue::from("JACCARD")));
        assert!(!schema.accepts("missing", &FieldValue::Integer(1)));
    }

    #[test]
    fn test_fields_for_phase() {
        let schema = sample();
        let build: Vec<_> = schema.fields_for(Phase::Build).map(|f| f.name()).collect();
        assert_eq!(build, vec!["metric_type"]);
    }

    #[test]
    fn test_to_json_lists_descriptors() {
        let json = sample().to_json().unwrap();
        assert_eq!(json["name"], "sample");
        let beamwidth = &json["fields"][2];
        assert_eq!(beamwidth["name"], "beamwidth");
        assert_eq!(beamwidth["type"], serde_json::to_value(FieldType::Integer).unwrap());
        assert_eq!(beamwidth["default"], 8);
        assert_eq!(beamwidth["range"]["kind"], "integer");
        assert_eq!(beamwidth["range"]["max"], 128);
        assert_eq!(beamwidth["phases"], serde_json::json!(["search"]));
    }
}
