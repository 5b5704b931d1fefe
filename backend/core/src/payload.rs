//! Structured data attached to a log record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single value inside a [`Payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<PayloadValue>),
    Map(BTreeMap<String, PayloadValue>),
}

impl From<bool> for PayloadValue {
    fn from(v: bool) -> Self {
        PayloadValue::Bool(v)
    }
}

macro_rules! int_into_payload {
    ($($t:ty),*) => {
        $(impl From<$t> for PayloadValue {
            fn from(v: $t) -> Self {
                PayloadValue::Int(i64::from(v))
            }
        })*
    };
}

int_into_payload!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for PayloadValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(PayloadValue::UInt(v), PayloadValue::Int)
    }
}

impl From<f64> for PayloadValue {
    fn from(v: f64) -> Self {
        PayloadValue::Float(v)
    }
}

impl From<f32> for PayloadValue {
    fn from(v: f32) -> Self {
        PayloadValue::Float(f64::from(v))
    }
}

impl From<&str> for PayloadValue {
    fn from(v: &str) -> Self {
        PayloadValue::Str(v.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(v: String) -> Self {
        PayloadValue::Str(v)
    }
}

impl<T: Into<PayloadValue>> From<Vec<T>> for PayloadValue {
    fn from(v: Vec<T>) -> Self {
        PayloadValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(PayloadValue::Null, Into::into)
    }
}

impl From<Payload> for PayloadValue {
    fn from(v: Payload) -> Self {
        PayloadValue::Map(v.0)
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => PayloadValue::Null,
            Value::Bool(b) => PayloadValue::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => PayloadValue::Int(i),
                (None, Some(u)) => PayloadValue::UInt(u),
                (None, None) => PayloadValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => PayloadValue::Str(s),
            Value::Array(items) => PayloadValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                PayloadValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Ordered key-value data rendered after the record body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, PayloadValue>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PayloadValue)> {
        self.0.iter()
    }

    /// Compact JSON rendering, keys in sorted order.
    pub fn render(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<PayloadValue>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
