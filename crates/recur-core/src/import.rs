//! Transaction file import (JSON and CSV)
//!
//! Accepts the canonical field names (`id`, `owner_id`, `label`, `amount`,
//! `posted_at`) as well as the names used by the upstream upsert API
//! (`trans_id`, `user_id`, `name`, `amount`, `date`).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Field names: canonical first, then the upsert API alias
const ID_FIELDS: &[&str] = &["id", "trans_id"];
const OWNER_FIELDS: &[&str] = &["owner_id", "user_id"];
const LABEL_FIELDS: &[&str] = &["label", "name"];
const AMOUNT_FIELDS: &[&str] = &["amount"];
const DATE_FIELDS: &[&str] = &["posted_at", "date"];

/// Supported transaction file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Options applied while converting raw records into transactions
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Store amounts as absolute values (for exports where expenses are negative)
    pub absolute_amounts: bool,
}

/// String-valued fields of one input record
#[derive(Debug, Default)]
struct RawRecord {
    id: Option<String>,
    owner_id: Option<String>,
    label: Option<String>,
    amount: Option<String>,
    posted_at: Option<String>,
}

impl RawRecord {
    fn into_transaction(self, record: usize, options: ImportOptions) -> Result<Transaction> {
        let required = |value: Option<String>, field: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Import(format!("record {}: missing {}", record, field)))
        };

        let id = required(self.id, "id")?;
        let owner_id = required(self.owner_id, "owner_id")?;
        let amount_str = required(self.amount, "amount")?;
        let date_str = required(self.posted_at, "posted_at")?;

        let mut amount = parse_amount(&amount_str)
            .map_err(|e| Error::Import(format!("record {}: {}", record, e)))?;
        if options.absolute_amounts {
            amount = amount.abs();
        }
        let posted_at = parse_date(&date_str)
            .map_err(|e| Error::Import(format!("record {}: {}", record, e)))?;

        Ok(Transaction {
            id,
            owner_id,
            label: self.label.unwrap_or_default(),
            amount,
            posted_at,
        })
    }
}

/// Parse a JSON array of transaction objects
pub fn parse_json<R: Read>(reader: R, options: ImportOptions) -> Result<Vec<Transaction>> {
    let value: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = value else {
        return Err(Error::Import(
            "expected a JSON array of transactions".into(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let record = i + 1;
            let Value::Object(map) = item else {
                return Err(Error::Import(format!(
                    "record {}: expected an object",
                    record
                )));
            };

            let field = |names: &[&str]| -> Result<Option<String>> {
                let Some(value) = names.iter().find_map(|name| map.get(*name)) else {
                    return Ok(None);
                };
                match value {
                    Value::Null => Ok(None),
                    Value::String(s) => Ok(Some(s.clone())),
                    Value::Number(n) => Ok(Some(n.to_string())),
                    other => Err(Error::Import(format!(
                        "record {}: unexpected value {}",
                        record, other
                    ))),
                }
            };

            RawRecord {
                id: field(ID_FIELDS)?,
                owner_id: field(OWNER_FIELDS)?,
                label: field(LABEL_FIELDS)?,
                amount: field(AMOUNT_FIELDS)?,
                posted_at: field(DATE_FIELDS)?,
            }
            .into_transaction(record, options)
        })
        .collect()
}

/// Parse a headered CSV export
///
/// Columns are located by header name, so column order does not matter and
/// extra columns are ignored.
pub fn parse_csv<R: Read>(reader: R, options: ImportOptions) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |names: &[&str]| {
        names.iter().find_map(|name| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
        })
    };

    let id_col = column(ID_FIELDS);
    let owner_col = column(OWNER_FIELDS);
    let label_col = column(LABEL_FIELDS);
    let amount_col = column(AMOUNT_FIELDS);
    let date_col = column(DATE_FIELDS);

    if id_col.is_none() || owner_col.is_none() || amount_col.is_none() || date_col.is_none() {
        return Err(Error::Import(format!(
            "CSV header must name id, owner_id, amount and posted_at columns, got: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }
    debug!("CSV columns: {:?}", headers);

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        let get = |col: Option<usize>| col.and_then(|c| row.get(c)).map(str::to_string);

        let raw = RawRecord {
            id: get(id_col),
            owner_id: get(owner_col),
            label: get(label_col),
            amount: get(amount_col),
            posted_at: get(date_col),
        };
        transactions.push(raw.into_transaction(i + 1, options)?);
    }

    Ok(transactions)
}

/// Keep one transaction per id, the last one read wins
///
/// Mirrors upsert-by-id semantics: a later record replaces an earlier one
/// with the same id but stays at the earlier record's position.
pub fn dedup_by_id(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Transaction> = Vec::with_capacity(transactions.len());
    let mut replaced = 0;

    for tx in transactions {
        match positions.get(&tx.id) {
            Some(&pos) => {
                debug!("Replacing duplicate transaction {}", tx.id);
                unique[pos] = tx;
                replaced += 1;
            }
            None => {
                positions.insert(tx.id.clone(), unique.len());
                unique.push(tx);
            }
        }
    }

    if replaced > 0 {
        warn!("Replaced {} duplicate transaction id(s)", replaced);
    }
    unique
}

/// Load, parse, and deduplicate a transaction file
pub fn load_transactions(
    path: &Path,
    format: Option<InputFormat>,
    options: ImportOptions,
) -> Result<Vec<Transaction>> {
    let format = format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "cannot detect format of {} (use json or csv)",
                path.display()
            ))
        })?;

    let reader = BufReader::new(File::open(path)?);
    let transactions = match format {
        InputFormat::Json => parse_json(reader, options)?,
        InputFormat::Csv => parse_csv(reader, options)?,
    };
    let transactions = dedup_by_id(transactions);

    info!(
        "Loaded {} transactions from {} ({})",
        transactions.len(),
        path.display(),
        format.as_str()
    );
    Ok(transactions)
}

/// Parse a date in any of the accepted formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // Timestamps such as 2018-09-18T00:00:00.000Z
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts.date());
        }
    }

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%y", // 01/15/24
        "%m/%d/%Y", // 01/15/2024
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
