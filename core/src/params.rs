//! Caller-supplied parameter collections.
//!
//! # Design
//! All three collections keep insertion order, because the order is visible
//! in the final URL and body. Query and route values are stringified with
//! `Display` when inserted, so the builder only ever interpolates strings.
//! Body values are converted to `serde_json::Value` on insertion; anything
//! that serializes to `null` becomes [`Field::Omitted`].

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BuildError;

/// A body field that is either sent or left out of the payload entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Present(T),
    Omitted,
}

impl<T> Field<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Field::Omitted)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Omitted,
        }
    }
}

/// Ordered query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `?k1=v1&k2=v2` with no escaping, or an empty string for no entries.
    pub fn to_query_string(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self.entries.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("?{}", pairs.join("&"))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Positional values for `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: Vec<String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Display) -> &mut Self {
        self.values.push(value.to_string());
        self
    }

    pub fn with(mut self, value: impl Display) -> Self {
        self.push(value);
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }
}

impl<V: Display> FromIterator<V> for RouteParams {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Ordered JSON body fields with explicit omission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyParams {
    entries: Vec<(String, Field<Value>)>,
    // First conversion failure, reported when the body is serialized.
    invalid: Option<String>,
}

impl BodyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build params from any value that serializes to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, BuildError> {
        let value = serde_json::to_value(value).map_err(|e| BuildError::Serialization(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(BuildError::BodyNotAnObject);
        };
        let mut params = BodyParams::new();
        for (key, value) in map {
            params.set(key, present_unless_null(value));
        }
        Ok(params)
    }

    /// Insert `value` under `key`. Values serializing to `null` are omitted.
    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => self.set(key, present_unless_null(value)),
            Err(e) => {
                if self.invalid.is_none() {
                    self.invalid = Some(format!("field {key:?}: {e}"));
                }
                self.set(key, Field::Omitted);
            }
        }
        self
    }

    pub fn with<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Mark `key` as explicitly left out of the payload.
    pub fn omit(&mut self, key: impl Into<String>) -> &mut Self {
        self.set(key.into(), Field::Omitted);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field<Value>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Present entries as a JSON object, in insertion order.
    pub fn to_json_object(&self) -> Result<Map<String, Value>, BuildError> {
        if let Some(reason) = &self.invalid {
            return Err(BuildError::Serialization(reason.clone()));
        }
        Ok(self
            .entries
            .iter()
            .filter_map(|(key, field)| match field {
                Field::Present(value) => Some((key.clone(), value.clone())),
                Field::Omitted => None,
            })
            .collect())
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        let object = self.to_json_object()?;
        serde_json::to_string(&object).map_err(|e| BuildError::Serialization(e.to_string()))
    }

    fn set(&mut self, key: String, field: Field<Value>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = field,
            None => self.entries.push((key, field)),
        }
    }
}

fn present_unless_null(value: Value) -> Field<Value> {
    if value.is_null() {
        Field::Omitted
    } else {
        Field::Present(value)
    }
}
