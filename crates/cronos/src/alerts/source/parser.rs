use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct ItemRow {
    pub(crate) id: String,
    pub(crate) category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) label: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) employee: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) reference_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) validity_days: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) kind: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ItemRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader.deserialize::<ItemRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// ISO dates, RFC 3339 timestamps, and the `dd/mm/yyyy` form used by
/// Brazilian spreadsheets.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim().trim_start_matches('\u{feff}');
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}
