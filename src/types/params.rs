//! Request parameter sets.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::auth::ApiKey;
use crate::error::ThingSpeakError;

/// Name of the parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, sent as `true`/`false`
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

macro_rules! int_param_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::Int(value as i64)
                }
            }
        )*
    };
}

int_param_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_param_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    match i64::try_from(value) {
                        Ok(value) => Self::Int(value),
                        Err(_) => Self::Str(value.to_string()),
                    }
                }
            }
        )*
    };
}

// Values past i64::MAX are sent as their decimal text.
wide_param_value!(u64, usize);

/// Query or form parameters for a single request.
///
/// Keys are unique and kept in sorted order, so the encoded request is
/// deterministic. The `api_key` entry is only present if the caller put it
/// there; clients add their own key to a copy at request time.
#[derive(Clone, Default, PartialEq)]
pub struct Parameters {
    entries: BTreeMap<String, ParamValue>,
}

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Look up a parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// Check whether a parameter is set.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.entries.remove(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return a copy with `api_key` set to `key`, unless the caller already set one.
    ///
    /// An `api_key` supplied by the caller is kept even if it differs from `key`.
    pub fn with_api_key(&self, key: &ApiKey) -> Parameters {
        let mut params = self.clone();
        if !params.contains(API_KEY_PARAM) {
            params.insert(API_KEY_PARAM, key.expose_secret());
        }
        params
    }

    /// Encode as `name=value` pairs in key order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Encode as an `application/x-www-form-urlencoded` string.
    pub fn to_form(&self) -> Result<String, ThingSpeakError> {
        serde_urlencoded::to_string(self.to_pairs())
            .map_err(|e| ThingSpeakError::InvalidParameters(e.to_string()))
    }

    /// Flatten a typed request (e.g. [`FeedRequest`](crate::rest::FeedRequest))
    /// into a parameter set. Unset options are left out.
    pub fn from_request<T: Serialize + ?Sized>(request: &T) -> Result<Self, ThingSpeakError> {
        let encoded = serde_urlencoded::to_string(request)
            .map_err(|e| ThingSpeakError::InvalidParameters(e.to_string()))?;
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&encoded)
            .map_err(|e| ThingSpeakError::InvalidParameters(e.to_string()))?;
        Ok(pairs.into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.entries {
            if k == API_KEY_PARAM {
                map.entry(k, &"[REDACTED]");
            } else {
                map.entry(k, &v.to_string());
            }
        }
        map.finish()
    }
}
