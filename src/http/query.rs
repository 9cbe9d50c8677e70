//! Query parameters and their canonical encoding
//!
//! Parameters are held in a sorted map so the encoded form, and therefore the
//! cache key derived from it, does not depend on insertion order.

use std::collections::BTreeMap;

use serde_json::Value;
use url::form_urlencoded;

pub type Query = BTreeMap<String, Value>;

/// Build a [`Query`] from key/value pairs
pub fn query_from<I, K, V>(pairs: I) -> Query
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Flatten a query into form pairs.
///
/// `null` is skipped, booleans become `1`/`0`, arrays expand to `key[0]`,
/// `key[1]`, ... and objects to `key[field]`, recursively.
pub fn encode_pairs(query: &Query) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in query {
        flatten(key, value, &mut pairs);
    }
    pairs
}

/// `application/x-www-form-urlencoded` form of the query, without a leading `?`
pub fn encode_query_string(query: &Query) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in encode_pairs(query) {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

fn flatten(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{key}[{index}]"), item, out);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten(&format!("{key}[{field}]"), item, out);
            }
        }
    }
}
