//! Loaders for the three seed dataset formats read at startup.
//!
//! * two-column whitespace rows `(position, pressure)` for signatures,
//! * labeled atmospheric sounding blocks,
//! * header-bearing CSV flight replay tables.
//!
//! Every parser takes the source text (or a reader) plus the path it came
//! from, so errors can name the file and line without touching the disk in tests.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::atmosphere::{AtmosphereProfile, SoundingCategory};
use crate::data::near_field::Signature;
use crate::error::LoadError;

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_number(token: &str, path: &Path, line: usize) -> Result<f64, LoadError> {
    token.parse::<f64>().map_err(|_| LoadError::NotNumeric {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

/// Parse a `(position, pressure)` signature. Blank lines are skipped; extra
/// columns are ignored.
pub fn parse_signature(text: &str, path: &Path) -> Result<Signature, LoadError> {
    let mut position = Vec::new();
    let mut pressure = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() < 2 {
            return Err(LoadError::ShortRow {
                path: path.to_path_buf(),
                line: line_no,
                expected: 2,
                found: tokens.len(),
            });
        }
        position.push(parse_number(tokens[0], path, line_no)?);
        pressure.push(parse_number(tokens[1], path, line_no)?);
    }
    Ok(Signature { position, pressure })
}

pub fn load_signature(path: &Path) -> Result<Signature, LoadError> {
    let sig = parse_signature(&read_text(path)?, path)?;
    log::info!("loaded signature {} ({} points)", path.display(), sig.len());
    Ok(sig)
}

/// Parse a labeled sounding file.
///
/// A line whose first token is not numeric is a label; its category is the
/// first token naming a known [`SoundingCategory`]. The numeric lines that
/// follow are `(altitude, value)` pairs. Blocks under unknown labels, and
/// numeric lines before any label, are skipped.
pub fn parse_atmosphere(text: &str, path: &Path) -> Result<AtmosphereProfile, LoadError> {
    let mut profile = AtmosphereProfile::default();
    let mut current: Option<SoundingCategory> = None;
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            continue;
        };
        if first.parse::<f64>().is_err() {
            current = tokens.iter().find_map(|t| SoundingCategory::from_label(t));
            if current.is_none() {
                log::debug!("{}:{}: skipping unknown block `{}`", path.display(), line_no, line.trim());
            }
            continue;
        }
        let Some(category) = current else {
            continue;
        };
        if tokens.len() < 2 {
            return Err(LoadError::ShortRow {
                path: path.to_path_buf(),
                line: line_no,
                expected: 2,
                found: tokens.len(),
            });
        }
        let altitude = parse_number(tokens[0], path, line_no)?;
        let value = parse_number(tokens[1], path, line_no)?;
        if category == SoundingCategory::Temperature {
            profile.altitude.push(altitude);
        }
        profile.values_mut(category).push(value);
    }
    Ok(profile)
}

pub fn load_atmosphere(path: &Path) -> Result<AtmosphereProfile, LoadError> {
    let profile = parse_atmosphere(&read_text(path)?, path)?;
    log::info!(
        "loaded sounding {} ({} levels)",
        path.display(),
        profile.altitude.len()
    );
    Ok(profile)
}

/// One row of the flight replay table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FlightRecord {
    pub time: f64,
    #[serde(rename = "Mach")]
    pub mach: f64,
    #[serde(rename = "AngleOfAttack")]
    pub angle_of_attack: f64,
    #[serde(rename = "Altitude")]
    pub altitude: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// Immutable pre-recorded flight, rows sorted by ascending time.
#[derive(Debug, Clone)]
pub struct FlightDataset {
    source: PathBuf,
    rows: Vec<FlightRecord>,
    times: Vec<f64>,
}

impl FlightDataset {
    /// Parse a replay CSV with header `time,Mach,AngleOfAttack,Altitude,Latitude,Longitude`.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let csv_error = |line: u64, source: csv::Error| LoadError::Csv {
            path: path.to_path_buf(),
            line,
            source,
        };
        let headers = rdr
            .headers()
            .map_err(|e| csv_error(e.position().map(|p| p.line()).unwrap_or(1), e))?
            .clone();
        let mut rows: Vec<FlightRecord> = Vec::new();
        for result in rdr.records() {
            let raw = result.map_err(|e| csv_error(e.position().map(|p| p.line()).unwrap_or(0), e))?;
            // physical line, so comments and blank lines are counted
            let line = raw.position().map(|p| p.line()).unwrap_or(0);
            let record: FlightRecord = raw
                .deserialize(Some(&headers))
                .map_err(|e| csv_error(line, e))?;
            if !record.time.is_finite() {
                return Err(LoadError::NonFiniteTime {
                    path: path.to_path_buf(),
                    line,
                    time: record.time,
                });
            }
            if let Some(prev) = rows.last() {
                if record.time < prev.time {
                    return Err(LoadError::UnsortedTime {
                        path: path.to_path_buf(),
                        line,
                        time: record.time,
                    });
                }
            }
            rows.push(record);
        }
        if rows.len() < 2 {
            return Err(LoadError::TooFewRows {
                path: path.to_path_buf(),
                required: 2,
                found: rows.len(),
            });
        }
        let times = rows.iter().map(|r| r.time).collect();
        Ok(Self {
            source: path.to_path_buf(),
            rows,
            times,
        })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ds = Self::from_reader(std::io::BufReader::new(file), path)?;
        log::info!(
            "loaded flight replay {} ({} rows, {:.1} s)",
            path.display(),
            ds.len(),
            ds.duration()
        );
        Ok(ds)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FlightRecord] {
        &self.rows
    }

    /// The time column.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn duration(&self) -> f64 {
        match (self.times.first(), self.times.last()) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }
}

/// Everything read from disk before the engine starts.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub near_field: Signature,
    pub ground: Option<Signature>,
    pub atmosphere: AtmosphereProfile,
    pub replay: Option<FlightDataset>,
}

impl SeedData {
    /// Load the seed files named in `paths`. The replay table is only read
    /// when `load_replay` is set. Any malformed file aborts startup.
    pub fn load(paths: &crate::config::DataPaths, load_replay: bool) -> Result<Self, LoadError> {
        let near_field = load_signature(&paths.near_field)?;
        let ground = match &paths.ground {
            Some(p) => Some(load_signature(p)?),
            None => None,
        };
        let atmosphere = load_atmosphere(&paths.atmosphere)?;
        let replay = match (&paths.flight_replay, load_replay) {
            (Some(p), true) => Some(FlightDataset::load(p)?),
            _ => None,
        };
        Ok(Self {
            near_field,
            ground,
            atmosphere,
            replay,
        })
    }
}
