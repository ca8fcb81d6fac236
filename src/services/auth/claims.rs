//! Verified token claims.
//!
//! Claims are kept as the full decoded JSON object so handlers can read any
//! provider-specific claim. `sub` is redacted in Debug output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn sub(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    pub fn iss(&self) -> Option<&str> {
        self.0.get("iss").and_then(Value::as_str)
    }

    /// Expiry as Unix seconds. Fractional values are truncated.
    pub fn exp(&self) -> Option<i64> {
        self.0
            .get("exp")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
    }

    /// `aud` may be a single string or an array of strings.
    pub fn has_audience(&self, audience: &str) -> bool {
        match self.0.get("aud") {
            Some(Value::String(s)) => s == audience,
            Some(Value::Array(arr)) => arr.iter().any(|v| v.as_str() == Some(audience)),
            _ => false,
        }
    }

    /// The `permissions` claim, or `None` when absent or not an array.
    pub fn permissions(&self) -> Option<impl Iterator<Item = &str>> {
        self.0
            .get("permissions")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(Value::as_str))
    }
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Claims");
        for (k, v) in &self.0 {
            if k == "sub" {
                s.field(k, &"[REDACTED]");
            } else {
                s.field(k, v);
            }
        }
        s.finish()
    }
}
