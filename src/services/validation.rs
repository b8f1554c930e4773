/*
 * Responsibility
 * - field 単位の validation error を集める
 * - JSON では {"title": ["can't be blank"]}、HTML では "Title can't be blank" として出す
 */
use std::collections::BTreeMap;

use serde::Serialize;

pub const BLANK: &str = "can't be blank";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Whitespace-only counts as blank.
    pub fn require_present(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, BLANK);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn on(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |m| {
                    if *field == "base" {
                        m.clone()
                    } else {
                        format!("{} {}", humanize(field), m)
                    }
                })
            })
            .collect()
    }
}

// "created_at" -> "Created at"
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_reported_per_field() {
        let mut errors = ValidationErrors::new();
        errors.require_present("title", "   ");
        errors.require_present("content", "body");

        assert!(!errors.is_empty());
        assert_eq!(errors.on("title"), [BLANK.to_string()]);
        assert!(errors.on("content").is_empty());
    }

    #[test]
    fn full_messages_are_humanized() {
        let mut errors = ValidationErrors::new();
        errors.add("title", BLANK);
        errors.add("created_at", "is invalid");
        errors.add("base", "Post could not be deleted");

        assert_eq!(
            errors.full_messages(),
            vec![
                "Post could not be deleted".to_string(),
                "Created at is invalid".to_string(),
                "Title can't be blank".to_string(),
            ]
        );
    }

    #[test]
    fn serializes_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("title", BLANK);

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"title": ["can't be blank"]}));
    }
}
