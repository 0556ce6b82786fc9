use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Header line plus one-based numbering.
const FIRST_DATA_ROW: usize = 2;

#[derive(Debug)]
pub(crate) struct ResidentRow {
    pub(crate) row: usize,
    pub(crate) id: String,
    pub(crate) label: Option<String>,
    pub(crate) area: String,
}

#[derive(Debug)]
pub(crate) struct SpaceRow {
    pub(crate) row: usize,
    pub(crate) number: String,
    pub(crate) size: String,
    pub(crate) zone: String,
    pub(crate) available: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResidentCsv {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    label: Option<String>,
    area: String,
}

#[derive(Debug, Deserialize)]
struct SpaceCsv {
    number: String,
    size: String,
    zone: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    available: Option<String>,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

pub(crate) fn parse_residents<R: Read>(source: R) -> Result<Vec<ResidentRow>, csv::Error> {
    let mut csv_reader = reader(source);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<ResidentCsv>().enumerate() {
        let parsed = record?;
        rows.push(ResidentRow {
            row: index + FIRST_DATA_ROW,
            id: parsed.id,
            label: parsed.label,
            area: parsed.area,
        });
    }

    Ok(rows)
}

pub(crate) fn parse_spaces<R: Read>(source: R) -> Result<Vec<SpaceRow>, csv::Error> {
    let mut csv_reader = reader(source);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<SpaceCsv>().enumerate() {
        let parsed = record?;
        rows.push(SpaceRow {
            row: index + FIRST_DATA_ROW,
            number: parsed.number,
            size: parsed.size,
            zone: parsed.zone,
            available: parsed.available,
        });
    }

    Ok(rows)
}

/// Availability column; `None` when the value is not a recognizable flag.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
