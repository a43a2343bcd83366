//! Header storage for [`ParsedRequest`](crate::ParsedRequest).
//!
//! Names keep the case they were supplied with, while every lookup, merge and
//! removal goes through a lowercase index, so `dnt`, `DNT` and `Dnt` all
//! address the same entry. Entries iterate in insertion order.
//!
//! Values are raw strings. Nothing is validated here; names and values are
//! checked only when the request is converted into an [`http::Request`].

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, Vec<String>>,
    // lowercase name -> name as stored in `entries`
    index: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_ascii_lowercase())
    }

    /// Values stored under `name`, or an empty slice.
    pub fn get(&self, name: &str) -> &[String] {
        self.canonical(name)
            .and_then(|canonical| self.entries.get(canonical))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Values under `name` joined with `", "`, or an empty string.
    pub fn line(&self, name: &str) -> String {
        self.get(name).join(", ")
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, String)> {
        self.iter().map(|(name, values)| (name, values.join(", ")))
    }

    /// Replace every value under `name`. The entry takes the case of `name`
    /// and moves to the end.
    pub fn insert(&mut self, name: &str, values: Vec<String>) {
        self.remove(name);
        self.index.insert(name.to_ascii_lowercase(), name.to_owned());
        self.entries.insert(name.to_owned(), values);
    }

    /// Append `value` under the existing entry for `name`, or create one.
    pub fn append(&mut self, name: &str, value: String) {
        match self.canonical(name).map(str::to_owned) {
            Some(canonical) => self.entries.entry(canonical).or_default().push(value),
            None => self.insert(name, vec![value]),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let canonical = self.index.remove(&name.to_ascii_lowercase())?;
        self.entries.shift_remove(&canonical)
    }

    fn canonical(&self, name: &str) -> Option<&str> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
