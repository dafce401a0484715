use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

const EMBEDDED_READINGS: &str = include_str!("../../data/beach_readings.yaml");

/// One water-quality sample: a site label and its measured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub site: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSet {
    pub readings: Vec<Reading>,
}

impl ReadingSet {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read readings from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let set: ReadingSet = serde_yaml::from_str(content)?;
        if let Some(bad) = set.readings.iter().find(|r| !r.value.is_finite()) {
            return Err(Error::Validation(format!(
                "Reading for {} is not a finite number",
                bad.site
            )));
        }
        Ok(set)
    }

    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_READINGS)
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let set = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::embedded()?,
        };
        info!("Loaded {} water-quality readings", set.readings.len());
        Ok(set)
    }
}

/// The first reading holding the largest value
pub fn highest(readings: &[Reading]) -> Option<&Reading> {
    readings.iter().fold(None, |best: Option<&Reading>, reading| match best {
        Some(current) if current.value >= reading.value => Some(current),
        _ => Some(reading),
    })
}

/// Geometric mean of all values.
///
/// `None` for an empty set or any negative value; a zero value makes the
/// mean zero. Computed in log space so long series do not overflow.
pub fn geometric_mean(readings: &[Reading]) -> Option<f64> {
    if readings.is_empty() || readings.iter().any(|r| r.value < 0.0) {
        return None;
    }
    if readings.iter().any(|r| r.value == 0.0) {
        return Some(0.0);
    }

    let log_sum: f64 = readings.iter().map(|r| r.value.ln()).sum();
    Some((log_sum / readings.len() as f64).exp())
}
