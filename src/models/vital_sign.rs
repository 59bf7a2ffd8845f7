use serde::{Deserialize, Serialize};

/// Raw vital readings as entered, in entry order.
///
/// Values stay as text: partial and malformed entries are expected and are
/// skipped by the validator rather than rejected here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VitalReadings {
    entries: Vec<(String, String)>,
}

impl VitalReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A repeated key overwrites the earlier value in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Numeric insert, skipped when the value is absent.
    pub fn set_number(&mut self, key: impl Into<String>, value: Option<f64>) {
        if let Some(v) = value {
            self.set(key, v.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
