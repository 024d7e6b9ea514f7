use super::FieldValue;
use crate::{constants::MISSING_VALUE, core::header::HeaderDescriptor};
use std::collections::{HashMap, HashSet};

/// Per-sample FORMAT values of one record.
///
/// The set of FORMAT ids active in the record is owned by the `Variant`, so
/// rendering takes it as an argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Genotype {
    pub sample: String,
    format: HashMap<String, FieldValue>,
}

impl Genotype {
    pub fn new(sample: &str) -> Self {
        Self {
            sample: sample.to_string(),
            format: HashMap::new(),
        }
    }

    /// Stores `value` if `field` is a declared FORMAT id. Undeclared ids are
    /// dropped and `false` is returned.
    pub(super) fn set_format(
        &mut self,
        header: &HeaderDescriptor,
        active: &mut HashSet<String>,
        field: &str,
        value: FieldValue,
    ) -> bool {
        if header.format_decl(field).is_none() {
            return false;
        }
        self.format.insert(field.to_string(), value);
        active.insert(field.to_string());
        true
    }

    pub fn format(&self, field: &str) -> Option<&FieldValue> {
        self.format.get(field)
    }

    pub fn gt_string(&self, header: &HeaderDescriptor, active: &HashSet<String>) -> String {
        header
            .formats
            .iter()
            .filter(|decl| active.contains(&decl.id))
            .map(|decl| match self.format.get(&decl.id) {
                Some(value) => value.to_string(),
                None => MISSING_VALUE.to_string(),
            })
            .collect::<Vec<_>>()
            .join(":")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::ValueType;

    fn header() -> HeaderDescriptor {
        let mut header = HeaderDescriptor::new();
        header.add_format("SU", "1", ValueType::Integer, "Support");
        header.add_format("AF", "1", ValueType::Float, "Allele fraction");
        header
    }

    #[test]
    fn undeclared_format_fields_are_dropped() {
        let header = header();
        let mut active = HashSet::new();
        let mut gt = Genotype::new("S1");
        assert!(gt.set_format(&header, &mut active, "GT", FieldValue::from("0/1")));
        assert!(!gt.set_format(&header, &mut active, "XX", FieldValue::from("7")));
        assert!(gt.format("XX").is_none());
        assert!(!active.contains("XX"));
        assert_eq!(gt.format("GT"), Some(&FieldValue::from("0/1")));
    }

    #[test]
    fn gt_string_uses_declaration_order_and_fills_missing() {
        let header = header();
        let mut active = HashSet::new();
        let mut s1 = Genotype::new("S1");
        let mut s2 = Genotype::new("S2");
        s1.set_format(&header, &mut active, "AF", FieldValue::Float(0.5));
        s1.set_format(&header, &mut active, "GT", FieldValue::from("0/1"));
        s2.set_format(&header, &mut active, "SU", FieldValue::Integer(4));
        assert_eq!(s1.gt_string(&header, &active), "0/1:.:0.50");
        assert_eq!(s2.gt_string(&header, &active), ".:4:.");
    }
}
