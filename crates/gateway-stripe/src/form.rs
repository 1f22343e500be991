//! # Form Encoding
//!
//! Stripe takes `application/x-www-form-urlencoded` bodies with bracketed
//! keys for nested data (`line_items[0][price_data][currency]=usd`).
//! [`FormBuilder`] assembles such bodies, adding optional fields only when
//! they are present.

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBuilder {
    params: Vec<(String, String)>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar field.
    pub fn field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Add a field only when `value` is `Some` and non-empty.
    pub fn optional(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Flatten an arbitrary JSON value under `prefix`.
    ///
    /// Objects become `prefix[key]`, arrays `prefix[i]`, `null` is skipped.
    pub fn json(mut self, prefix: &str, value: &Value) -> Self {
        flatten_into(&mut self.params, prefix.to_string(), value);
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn build(self) -> Vec<(String, String)> {
        self.params
    }
}

fn flatten_into(out: &mut Vec<(String, String)>, prefix: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(out, format!("{}[{}]", prefix, i), item);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten_into(out, format!("{}[{}]", prefix, key), item);
            }
        }
    }
}
