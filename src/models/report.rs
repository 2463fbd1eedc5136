use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured analysis of one ticker + filing type, as the backend returned it.
///
/// Nothing in a success body is validated. Missing or `null` fields decode to
/// empty values, values of the wrong type are kept and shown as text, and
/// unrecognised fields are carried along in `extra` so an export reproduces
/// the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default, deserialize_with = "text")]
    pub ticker: String,
    #[serde(default, deserialize_with = "text")]
    pub filing_type: String,
    #[serde(default, deserialize_with = "text")]
    pub executive_summary: String,
    /// Usually strings; the model behind the backend sometimes nests
    /// objects or numbers in here.
    #[serde(default, deserialize_with = "list")]
    pub risk_factors: Vec<Value>,
    /// `Some(Value::Null)` when the backend sent an explicit `null`.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub sentiment: Option<Value>,
    /// Metric name to display value. Usually strings, but bare numbers occur.
    #[serde(default, rename = "financialKPIs", deserialize_with = "map")]
    pub financial_kpis: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Report {
    /// Display text for a KPI, or `None` when missing, null or blank.
    pub fn kpi(&self, key: &str) -> Option<String> {
        self.financial_kpis.get(key).and_then(display_text)
    }

    /// Risk factors as display lines, skipping null and blank entries.
    pub fn risk_lines(&self) -> Vec<String> {
        self.risk_factors.iter().filter_map(display_text).collect()
    }

    pub fn sentiment_text(&self) -> Option<String> {
        self.sentiment.as_ref().and_then(display_text)
    }
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        single => vec![single],
    })
}

fn map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
