use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claim holding the subject identity used to resolve group memberships.
pub const EMAIL_CLAIM: &str = "email";

/// Claim holding the resolved group identifiers.
pub const GROUPS_CLAIM: &str = "groups";

/// The claims of an identity token, kept in insertion order.
///
/// Claim names are unique. Inserting a name that is already present replaces
/// its value and keeps its position. Equality compares the claims as a map, so
/// two sets holding the same claims in a different order are equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(IndexMap<String, Value>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets a claim, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The subject identity carried in the `email` claim.
    ///
    /// Returns `None` when the claim is missing, is not a string, or is blank.
    pub fn email(&self) -> Option<&str> {
        self.0
            .get(EMAIL_CLAIM)
            .and_then(Value::as_str)
            .filter(|email| !email.trim().is_empty())
    }

    /// The `groups` claim, if present and made of strings only.
    pub fn groups(&self) -> Option<Vec<&str>> {
        let Value::Array(items) = self.0.get(GROUPS_CLAIM)? else {
            return None;
        };

        items.iter().map(Value::as_str).collect()
    }

    /// A copy of this set with the `groups` claim set to `groups`.
    pub fn with_groups(&self, groups: Vec<String>) -> Self {
        let mut claims = self.clone();
        claims.insert(GROUPS_CLAIM, groups);
        claims
    }

    /// Checks every claim against the value shapes a signed token may carry:
    /// strings, numbers, booleans and lists of strings.
    pub fn validate(&self) -> Result<(), UnsupportedClaim> {
        for (name, value) in &self.0 {
            let kind = match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => continue,
                Value::Array(items) if items.iter().all(Value::is_string) => continue,
                Value::Array(_) => "a list with non-string items",
                Value::Object(_) => "a nested object",
                Value::Null => "null",
            };

            return Err(UnsupportedClaim {
                name: name.clone(),
                kind,
            });
        }

        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for ClaimSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
    }
}

/// A claim whose value cannot be carried by a signed token.
#[derive(Debug, thiserror::Error)]
#[error("claim '{name}' has an unsupported value: {kind}")]
pub struct UnsupportedClaim {
    pub name: String,
    pub kind: &'static str,
}
