//! Rule rows: the declarative expectation set a catalog is validated against.
//!
//! Rule sets are CSV files with the header
//! `Entity,EntityRequired,Property,Type,PropertyRequired`. Reading is
//! lenient about whitespace and boolean spelling; writing always emits
//! `True`/`False` so generated files stay compatible with existing ones.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Header names, in file order.
pub const HEADER: [&str; 5] = [
    "Entity",
    "EntityRequired",
    "Property",
    "Type",
    "PropertyRequired",
];

/// One expectation about a property of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Fully qualified type name.
    #[serde(rename = "Entity")]
    pub entity: String,

    #[serde(
        rename = "EntityRequired",
        deserialize_with = "de_flag",
        serialize_with = "ser_flag"
    )]
    pub entity_required: bool,

    #[serde(rename = "Property")]
    pub property: String,

    /// Fully qualified type name the property must have.
    #[serde(rename = "Type")]
    pub expected_type: String,

    #[serde(
        rename = "PropertyRequired",
        deserialize_with = "de_flag",
        serialize_with = "ser_flag"
    )]
    pub property_required: bool,
}

impl Rule {
    pub fn new(
        entity: impl Into<String>,
        entity_required: bool,
        property: impl Into<String>,
        expected_type: impl Into<String>,
        property_required: bool,
    ) -> Self {
        Self {
            entity: entity.into(),
            entity_required,
            property: property.into(),
            expected_type: expected_type.into(),
            property_required,
        }
    }
}

/// Errors returned by [`read_rules`] and [`write_rules`].
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule file has no header row")]
    MissingHeader,

    #[error("rule file header is missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("invalid rule on line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("invalid rule file: {0}")]
    Csv(#[from] csv::Error),
}

/// Parse a rule set from CSV text.
///
/// Columns are matched by header name. Blank lines are skipped; an
/// empty rule set (header only) is valid.
pub fn read_rules(text: &str) -> Result<Vec<Rule>, RuleError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(RuleError::MissingHeader);
    }
    if let Some(missing) = HEADER.iter().find(|h| !headers.iter().any(|c| c == **h)) {
        return Err(RuleError::MissingColumn(*missing));
    }

    reader
        .deserialize::<Rule>()
        .map(|row| {
            row.map_err(|source| RuleError::Record {
                line: source.position().map_or(0, |p| p.line()),
                source,
            })
        })
        .collect()
}

/// Serialise a rule set as CSV text, header first.
pub fn write_rules(rules: &[Rule]) -> Result<String, RuleError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rules.is_empty() {
        // serde only writes the header alongside the first record.
        writer.write_record(HEADER)?;
    }
    for rule in rules {
        writer.serialize(rule)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RuleError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a boolean (True/False), got {raw:?}"))
    })
}

fn ser_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

// --- tests -------------------------------------------------------------------
