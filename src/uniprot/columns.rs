use super::client::Transport;
use super::error::Error;
use serde::Deserialize;
use std::sync::OnceLock;

const COLUMNS_TOML: &str = include_str!("../../resources/uniprot.columns.toml");

static CATALOG: OnceLock<ColumnCatalog> = OnceLock::new();

pub const DBXREF_URL: &str = "https://www.uniprot.org/docs/dbxref.txt";

/// Named groups of UniProt tab-format columns plus the default selection.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnCatalog {
    pub default: Vec<String>,
    #[serde(rename = "group")]
    pub groups: Vec<ColumnGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnGroup {
    pub name: String,
    pub columns: Vec<String>,
}

impl ColumnCatalog {
    /// Every catalogued column, in group order, without duplicates.
    pub fn all(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.columns.iter())
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// A catalogued column or any `database(<abbrev>)` cross-reference.
    pub fn is_known(&self, column: &str) -> bool {
        is_database_column(column) || self.groups.iter().any(|g| g.columns.iter().any(|c| c == column))
    }

    /// Joins `columns` into the comma-separated form the mapping service expects.
    pub fn selection(&self, columns: &[String]) -> Result<String, Error> {
        if let Some(unknown) = columns.iter().find(|c| !self.is_known(c)) {
            return Err(Error::UnknownColumn(unknown.clone()));
        }
        Ok(columns.join(","))
    }
}

pub fn catalog() -> &'static ColumnCatalog {
    CATALOG.get_or_init(|| {
        toml::from_str(COLUMNS_TOML)
            .expect("Failed to parse embedded UniProt column catalog. This is a library bug.")
    })
}

pub fn default_columns() -> String {
    catalog().default.join(",")
}

fn is_database_column(column: &str) -> bool {
    column
        .strip_prefix("database(")
        .and_then(|rest| rest.strip_suffix(')'))
        .is_some_and(|abbrev| !abbrev.is_empty())
}

/// Extracts `database(<abbrev>)` columns from UniProt's `dbxref.txt`.
///
/// EMBL is always listed first since the document does not carry it.
pub fn parse_database_abbreviations(text: &str) -> Vec<String> {
    std::iter::once("database(EMBL)".to_string())
        .chain(text.lines().filter(|l| l.contains("Abbrev:")).filter_map(|line| {
            line.trim()
                .split_once(": ")
                .map(|(_, abbrev)| format!("database({})", abbrev.trim()))
        }))
        .collect()
}

/// Downloads the cross-reference list once; callers keep the result.
pub fn fetch_database_abbreviations<T: Transport>(transport: &T) -> Result<Vec<String>, Error> {
    let response = transport.get(DBXREF_URL)?;
    if !response.is_success() {
        return Err(Error::Status {
            url: DBXREF_URL.to_string(),
            status: response.status,
        });
    }
    Ok(parse_database_abbreviations(&response.body))
}
