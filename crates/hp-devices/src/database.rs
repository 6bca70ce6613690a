//! Device database loading and fuzzy search.
//!
//! The database is a flat CSV export with one row per heat pump. Column
//! naming varies between exports, so headers are matched case-insensitively
//! against a small set of known candidates and missing columns degrade to
//! `None` fields rather than load failures.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{DeviceError, DeviceResult};

/// One device row, reduced to the attributes the model needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub model: String,
    pub manufacturer: String,
    pub refrigerant: String,
    /// Nominal thermal duty [kW], usually the B0/W35 rating.
    pub p_th_nominal_kw: Option<f64>,
    /// Rated COP at the nominal point.
    pub cop_nominal: Option<f64>,
}

/// In-memory device database.
#[derive(Debug, Clone)]
pub struct DeviceDatabase {
    records: Vec<DeviceRecord>,
}

impl DeviceDatabase {
    /// Load a database from a CSV file.
    pub fn load(path: &Path) -> DeviceResult<Self> {
        let content = fs::read_to_string(path)?;
        let db = Self::parse(&content)?;
        info!(devices = db.records.len(), path = %path.display(), "device database loaded");
        Ok(db)
    }

    /// Parse CSV content. Exposed for tests.
    pub fn parse(content: &str) -> DeviceResult<Self> {
        let mut lines = content.lines().enumerate();
        let header = lines
            .next()
            .map(|(_, line)| split_csv_row(line))
            .filter(|cols| !cols.is_empty())
            .ok_or(DeviceError::MissingHeader)?;

        let col_model = find_column(&header, &["model"]);
        let col_manufacturer = find_column(&header, &["manufacturer"]);
        let col_refrigerant = find_column(&header, &["refrigerant"]);
        let col_p_th = find_column(&header, &["p_th", "p_th [w]", "p_th [kw]", "p_th_nom"]);
        let col_cop = find_column(&header, &["cop", "cop_nom"]);

        let mut records = Vec::new();
        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cols = split_csv_row(line);
            let field = |idx: Option<usize>| -> Option<&str> {
                idx.and_then(|i| cols.get(i)).map(String::as_str)
            };

            let model = field(col_model).unwrap_or("Unknown").trim().to_string();
            if model.is_empty() {
                return Err(DeviceError::Parse {
                    line: line_no + 1,
                    message: "empty model name".to_string(),
                });
            }
            records.push(DeviceRecord {
                model,
                manufacturer: field(col_manufacturer)
                    .unwrap_or("Unknown")
                    .trim()
                    .to_string(),
                refrigerant: field(col_refrigerant).unwrap_or("R410A").trim().to_string(),
                p_th_nominal_kw: field(col_p_th).and_then(parse_duty_kw),
                cop_nominal: field(col_cop).and_then(|v| v.trim().parse::<f64>().ok()),
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    /// Fuzzy search: case-insensitive substring match over model and
    /// manufacturer, in database order.
    pub fn search(&self, term: &str) -> Vec<&DeviceRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|rec| {
                rec.model.to_lowercase().contains(&needle)
                    || rec.manufacturer.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Look up a single device by fuzzy name.
    ///
    /// Multiple matches pick the first and warn; zero matches is an error the
    /// caller recovers from with default parameters.
    pub fn lookup(&self, name: &str) -> DeviceResult<&DeviceRecord> {
        let matches = self.search(name);
        match matches.len() {
            0 => Err(DeviceError::NotFound {
                name: name.to_string(),
            }),
            1 => Ok(matches[0]),
            n => {
                warn!(term = name, matches = n, "ambiguous device name, using first match");
                Ok(matches[0])
            }
        }
    }
}

/// Split one CSV row, honoring double-quoted fields.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

fn find_column(header: &[String], candidates: &[&str]) -> Option<usize> {
    header.iter().position(|name| {
        let name = name.trim().to_lowercase();
        candidates.iter().any(|cand| name == *cand)
    })
}

/// Parse a thermal duty cell. Database exports are inconsistent about units;
/// values above 100 are taken as W and converted to kW.
fn parse_duty_kw(value: &str) -> Option<f64> {
    let v = value.trim().parse::<f64>().ok()?;
    let v = hp_core::numeric::ensure_finite(v, "nominal duty").ok()?;
    if v <= 0.0 {
        return None;
    }
    Some(if v > 100.0 { v / 1000.0 } else { v })
}
