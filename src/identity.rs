//! Query Identity Resolution
//!
//! Derives a stable, comparable identity for a paginated query invocation:
//!
//! QueryIdentity = query_name || ":" || canonical_json(args)
//!
//! Arguments are a closed value type whose maps are always key-sorted, so two
//! structurally equal argument sets resolve to the same identity no matter the
//! order their keys were inserted in. Canonical JSON is collision-free, so
//! structurally different arguments always resolve to different identities.

use crate::error::IdentityError;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

/// Number of digest bytes rendered by [`QueryIdentity::digest`].
const DIGEST_BYTES: usize = 8;

/// Name of a paginated query definition; stable across argument changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryName(String);

impl QueryName {
    pub fn new(name: impl Into<String>) -> Self {
        QueryName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QueryName {
    fn from(name: &str) -> Self {
        QueryName(name.to_string())
    }
}

impl From<String> for QueryName {
    fn from(name: String) -> Self {
        QueryName(name)
    }
}

impl Borrow<str> for QueryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic identity of a (query name, arguments) pair.
///
/// Only produced by [`resolve`] and [`resolve_serializable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QueryIdentity(String);

impl QueryIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short BLAKE3 hex digest of the identity, for log fields and tables.
    pub fn digest(&self) -> String {
        let mut hasher = Hasher::new();
        hasher.update(b"identity:");
        hasher.update(self.0.as_bytes());
        hex::encode(&hasher.finalize().as_bytes()[..DIGEST_BYTES])
    }
}

impl fmt::Display for QueryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QueryIdentity> for String {
    fn from(identity: QueryIdentity) -> Self {
        identity.0
    }
}

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(values: Vec<ArgValue>) -> Self {
        ArgValue::List(values)
    }
}

impl From<BTreeMap<String, ArgValue>> for ArgValue {
    fn from(map: BTreeMap<String, ArgValue>) -> Self {
        ArgValue::Map(map)
    }
}

impl From<QueryArgs> for ArgValue {
    fn from(args: QueryArgs) -> Self {
        ArgValue::Map(args.0)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ArgValue::Null)
    }
}

impl TryFrom<serde_json::Value> for ArgValue {
    type Error = IdentityError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ArgValue::Int(i)
                } else if n.is_u64() {
                    // Would silently lose precision as f64
                    return Err(IdentityError::Serialization(format!(
                        "integer {} is outside the i64 range",
                        n
                    )));
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() => ArgValue::Float(f),
                        _ => {
                            return Err(IdentityError::Serialization(format!(
                                "number {} is not a finite float",
                                n
                            )))
                        }
                    }
                }
            }
            Value::String(s) => ArgValue::String(s),
            Value::Array(items) => ArgValue::List(
                items
                    .into_iter()
                    .map(ArgValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => ArgValue::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, ArgValue::try_from(v)?)))
                    .collect::<Result<_, IdentityError>>()?,
            ),
        })
    }
}

/// Arguments of a paginated query: a key-sorted map of argument values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryArgs(BTreeMap<String, ArgValue>);

impl QueryArgs {
    pub fn new() -> Self {
        QueryArgs(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Option<ArgValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArgValue)> {
        self.0.iter()
    }

    /// Convert a JSON value into arguments. The value must be an object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, IdentityError> {
        match ArgValue::try_from(value)? {
            ArgValue::Map(map) => Ok(QueryArgs(map)),
            other => Err(IdentityError::Serialization(format!(
                "arguments must serialize to a map, got {}",
                kind_name(&other)
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for QueryArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryArgs(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn kind_name(value: &ArgValue) -> &'static str {
    match value {
        ArgValue::Null => "null",
        ArgValue::Bool(_) => "bool",
        ArgValue::Int(_) => "integer",
        ArgValue::Float(_) => "float",
        ArgValue::String(_) => "string",
        ArgValue::List(_) => "list",
        ArgValue::Map(_) => "map",
    }
}

/// Resolve the identity of a query invocation.
///
/// Fails only when an argument cannot be serialized deterministically
/// (a non-finite float).
pub fn resolve(query_name: &QueryName, args: &QueryArgs) -> Result<QueryIdentity, IdentityError> {
    let mut out = String::with_capacity(query_name.as_str().len() + 2 + args.len() * 16);
    out.push_str(query_name.as_str());
    out.push(':');
    write_map(&args.0, &mut out)?;
    Ok(QueryIdentity(out))
}

/// Resolve the identity of a query invocation from any serializable value.
///
/// The value must serialize to a map at top level.
pub fn resolve_serializable<A: Serialize + ?Sized>(
    query_name: &QueryName,
    args: &A,
) -> Result<QueryIdentity, IdentityError> {
    let value =
        serde_json::to_value(args).map_err(|e| IdentityError::Serialization(e.to_string()))?;
    let args = QueryArgs::from_json(value)?;
    resolve(query_name, &args)
}

fn write_value(value: &ArgValue, out: &mut String) -> Result<(), IdentityError> {
    match value {
        ArgValue::Null => out.push_str("null"),
        ArgValue::Bool(true) => out.push_str("true"),
        ArgValue::Bool(false) => out.push_str("false"),
        ArgValue::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        ArgValue::Float(f) => {
            if !f.is_finite() {
                return Err(IdentityError::Serialization(format!(
                    "float {} is not finite",
                    f
                )));
            }
            // -0.0 == 0.0, so both must render the same
            let f = if *f == 0.0 { 0.0 } else { *f };
            out.push_str(&to_json(&f)?);
        }
        ArgValue::String(s) => out.push_str(&to_json(s)?),
        ArgValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        ArgValue::Map(map) => write_map(map, out)?,
    }
    Ok(())
}

// BTreeMap iteration is key-sorted, which is what makes the output canonical.
fn write_map(map: &BTreeMap<String, ArgValue>, out: &mut String) -> Result<(), IdentityError> {
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&to_json(key)?);
        out.push(':');
        write_value(value, out)?;
    }
    out.push('}');
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, IdentityError> {
    serde_json::to_string(value).map_err(|e| IdentityError::Serialization(e.to_string()))
}
