//! Parse a metrics log CSV into engine metrics.
//!
//! Expected header (column order free, `id` optional):
//! date,type,value[,id]
//!
//! Dates are RFC 3339 or plain `YYYY-MM-DD` (midnight UTC). Rows that do not parse
//! are skipped with a warning rather than failing the whole file.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use founder_core::time::start_of_day;
use founder_core::Metric;
use std::io::Read;
use std::path::Path;

pub fn parse_metrics_csv(path: impl AsRef<Path>) -> Result<Vec<Metric>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_metrics_csv(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_metrics_csv(reader: impl Read) -> Result<Vec<Metric>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("read csv header")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    let (Some(date_col), Some(type_col), Some(value_col)) =
        (column("date"), column("type"), column("value"))
    else {
        bail!("metrics csv needs date,type,value columns (found: {:?})", headers);
    };
    let id_col = column("id");

    let mut metrics = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(line, %error, "skipping unreadable metrics row");
                continue;
            }
        };

        let date_str = record.get(date_col).unwrap_or("");
        let type_str = record.get(type_col).unwrap_or("");
        if date_str.is_empty() || type_str.is_empty() {
            tracing::warn!(line, "skipping metrics row with empty date or type");
            continue;
        }

        let Some(date) = parse_date(date_str) else {
            tracing::warn!(line, date = date_str, "skipping metrics row with bad date");
            continue;
        };

        let value: f64 = match record.get(value_col).unwrap_or("").parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(line, "skipping metrics row with bad value");
                continue;
            }
        };

        let id = id_col
            .and_then(|c| record.get(c))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("csv-{line}"));

        metrics.push(Metric::new(id, type_str.to_ascii_uppercase(), value, date));
    }

    tracing::debug!(count = metrics.len(), "metrics csv parsed");
    Ok(metrics)
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(start_of_day)
}
