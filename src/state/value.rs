use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar stored under a state key.
///
/// Serialized untagged so the JSON form is the bare value; `null` is the
/// absent marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl StateValue {
    /// Truthiness as the provider side evaluates it (`x || default`).
    pub fn is_truthy(&self) -> bool {
        match self {
            StateValue::Absent => false,
            StateValue::Bool(b) => *b,
            StateValue::Number(n) => *n != 0.0 && !n.is_nan(),
            StateValue::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric reading of the value. Absent reads as zero; text that does not
    /// parse yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StateValue::Absent => Some(0.0),
            StateValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            StateValue::Number(n) => Some(*n),
            StateValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Non-negative integral reading, used for selection indices.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            StateValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
            StateValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, StateValue::Absent)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Absent => Ok(()),
            StateValue::Bool(b) => write!(f, "{}", b),
            StateValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            StateValue::Number(n) => write!(f, "{}", n),
            StateValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Number(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Number(value as f64)
    }
}

impl From<usize> for StateValue {
    fn from(value: usize) -> Self {
        StateValue::Number(value as f64)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

impl<T: Into<StateValue>> From<Option<T>> for StateValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(StateValue::Absent)
    }
}

/// Flat key/value state shared between a region and its provider.
///
/// Every mutating helper returns a new map; the receiver is left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateMap(BTreeMap<String, StateValue>);

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.0.get(key)
    }

    /// Value under `key`, with a missing key reading as absent.
    pub fn value(&self, key: &str) -> StateValue {
        self.0.get(key).cloned().unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of this map with `key` overwritten.
    pub fn with(&self, key: impl Into<String>, value: impl Into<StateValue>) -> StateMap {
        let mut next = self.0.clone();
        next.insert(key.into(), value.into());
        StateMap(next)
    }

    /// Copy of this map with every entry of `patch` written over it.
    /// Keys not present in `patch` keep their current value.
    pub fn merged(&self, patch: &StateMap) -> StateMap {
        let mut next = self.0.clone();
        for (key, value) in &patch.0 {
            next.insert(key.clone(), value.clone());
        }
        StateMap(next)
    }
}

impl<K, V> FromIterator<(K, V)> for StateMap
where
    K: Into<String>,
    V: Into<StateValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StateMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for StateMap
where
    K: Into<String>,
    V: Into<StateValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
