//! Self-reported metrics and habit logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric type tag.
///
/// Tags the engine does not score are kept verbatim in `Other` so a snapshot with
/// new metric kinds still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetricType {
    DeepWorkHours,
    OutputShipped,
    SleepAverage,
    FitnessSessions,
    Other(String),
}

impl MetricType {
    pub fn as_str(&self) -> &str {
        match self {
            MetricType::DeepWorkHours => "DEEP_WORK_HOURS",
            MetricType::OutputShipped => "OUTPUT_SHIPPED",
            MetricType::SleepAverage => "SLEEP_AVERAGE",
            MetricType::FitnessSessions => "FITNESS_SESSIONS",
            MetricType::Other(tag) => tag,
        }
    }
}

impl From<String> for MetricType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "DEEP_WORK_HOURS" => MetricType::DeepWorkHours,
            "OUTPUT_SHIPPED" => MetricType::OutputShipped,
            "SLEEP_AVERAGE" => MetricType::SleepAverage,
            "FITNESS_SESSIONS" => MetricType::FitnessSessions,
            _ => MetricType::Other(tag),
        }
    }
}

impl From<&str> for MetricType {
    fn from(tag: &str) -> Self {
        MetricType::from(tag.to_string())
    }
}

impl From<MetricType> for String {
    fn from(t: MetricType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub value: f64,
    pub date: DateTime<Utc>,
}

impl Metric {
    pub fn new(
        id: impl Into<String>,
        metric_type: impl Into<MetricType>,
        value: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            metric_type: metric_type.into(),
            value,
            date,
        }
    }
}

/// A habit check-in. Accepted by the alert pass but not scored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, alias = "notes", deserialize_with = "null_as_empty")]
    pub note: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
