//! The ToothGrowth dataset and ways to load it.
//!
//! Sixty guinea pigs each received one of three vitamin C doses (0.5, 1 or
//! 2 mg/day) by one of two delivery methods (orange juice `OJ` or ascorbic
//! acid `VC`); the response is the length of odontoblasts. Every
//! `supp x dose` cell holds ten animals.
//!
//! # Sources
//!
//! - **Embedded**: [`Dataset::tooth_growth`], the values shipped with R's
//!   `datasets` package
//! - **CSV**: [`load_csv`], a header plus `len,supp,dose` rows, as written by
//!   R's `write.csv(ToothGrowth)`
//!
//! # Example
//!
//! ```ignore
//! use toothgrowth::data::{load_csv, Dataset};
//! use std::path::Path;
//!
//! let data = load_csv(Path::new("ToothGrowth.csv"))?;
//! data.validate()?;
//! println!("Loaded {} observations from {}", data.len(), data.source());
//! ```

mod csv;
mod tooth_growth;

pub use csv::load_csv;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toothgrowth_core::constants::SHAPIRO_MIN_N;
use toothgrowth_core::{Factor, StatsResult};

/// Errors that can occur while loading or validating data.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV at a specific line (1-indexed).
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Header lacks a required column.
    #[error("missing column '{0}' in header")]
    MissingColumn(String),

    /// Response value that is not a finite number.
    #[error("invalid length value at line {line}: '{value}'")]
    InvalidValue { line: usize, value: String },

    /// Supplement label other than `OJ` or `VC`.
    #[error("unknown supplement '{value}' at line {line} (expected OJ or VC)")]
    UnknownSupplement { line: usize, value: String },

    /// Dose other than 0.5, 1 or 2.
    #[error("unknown dose '{value}' at line {line} (expected 0.5, 1 or 2)")]
    UnknownDose { line: usize, value: String },

    /// A `supp x dose` cell with too few observations for the report.
    #[error("cell '{cell}' has {got} observations, need at least {min}")]
    InsufficientSamples { cell: String, got: usize, min: usize },
}

/// Vitamin C delivery method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Supplement {
    /// Orange juice.
    OJ,
    /// Ascorbic acid.
    VC,
}

impl Supplement {
    /// Level order: `OJ` is the reference level.
    pub const ALL: [Supplement; 2] = [Supplement::OJ, Supplement::VC];

    pub fn label(&self) -> &'static str {
        match self {
            Supplement::OJ => "OJ",
            Supplement::VC => "VC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OJ" => Some(Supplement::OJ),
            "VC" => Some(Supplement::VC),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Supplement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Daily vitamin C dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dose {
    /// 0.5 mg/day.
    #[serde(rename = "0.5")]
    Low,
    /// 1 mg/day.
    #[serde(rename = "1")]
    Medium,
    /// 2 mg/day.
    #[serde(rename = "2")]
    High,
}

impl Dose {
    pub const ALL: [Dose; 3] = [Dose::Low, Dose::Medium, Dose::High];

    pub fn mg_per_day(&self) -> f64 {
        match self {
            Dose::Low => 0.5,
            Dose::Medium => 1.0,
            Dose::High => 2.0,
        }
    }

    /// Level label as R prints it: `0.5`, `1`, `2`.
    pub fn label(&self) -> &'static str {
        match self {
            Dose::Low => "0.5",
            Dose::Medium => "1",
            Dose::High => "2",
        }
    }

    /// Parse a dose written as a number (`0.5`, `1`, `1.0`, `2`).
    pub fn parse(s: &str) -> Option<Self> {
        let value: f64 = s.parse().ok()?;
        Dose::ALL
            .into_iter()
            .find(|d| (d.mg_per_day() - value).abs() < 1e-9)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One animal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Odontoblast length.
    pub len: f64,
    pub supp: Supplement,
    pub dose: Dose,
}

/// An immutable set of observations plus a note of where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
    source: String,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>, source: impl Into<String>) -> Self {
        Self {
            observations,
            source: source.into(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Where the data came from: `embedded` or a file path.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Response column in row order.
    pub fn response(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.len).collect()
    }

    /// `supp` as a factor with levels `OJ, VC`.
    pub fn supp_factor(&self) -> StatsResult<Factor> {
        Factor::new(
            "supp",
            Supplement::ALL.iter().map(|s| s.label().to_string()).collect(),
            self.observations.iter().map(|o| o.supp.index()).collect(),
        )
    }

    /// `dose` as a factor with levels `0.5, 1, 2`.
    pub fn dose_factor(&self) -> StatsResult<Factor> {
        Factor::new(
            "dose",
            Dose::ALL.iter().map(|d| d.label().to_string()).collect(),
            self.observations.iter().map(|o| o.dose.index()).collect(),
        )
    }

    /// Responses for one `supp x dose` cell, in row order.
    pub fn cell(&self, supp: Supplement, dose: Dose) -> Vec<f64> {
        self.observations
            .iter()
            .filter(|o| o.supp == supp && o.dose == dose)
            .map(|o| o.len)
            .collect()
    }

    /// Every cell, ordered with `supp` varying fastest (`OJ:0.5, VC:0.5,
    /// OJ:1, ...`), matching the level order of the `supp:dose` interaction.
    pub fn cells(&self) -> Vec<(Supplement, Dose, Vec<f64>)> {
        Dose::ALL
            .into_iter()
            .flat_map(|d| Supplement::ALL.into_iter().map(move |s| (s, d)))
            .map(|(s, d)| (s, d, self.cell(s, d)))
            .collect()
    }

    /// Responses grouped by supplement, in level order.
    pub fn by_supp(&self) -> Vec<(Supplement, Vec<f64>)> {
        Supplement::ALL
            .into_iter()
            .map(|s| {
                let group = self
                    .observations
                    .iter()
                    .filter(|o| o.supp == s)
                    .map(|o| o.len)
                    .collect();
                (s, group)
            })
            .collect()
    }

    /// Responses grouped by dose, in level order.
    pub fn by_dose(&self) -> Vec<(Dose, Vec<f64>)> {
        Dose::ALL
            .into_iter()
            .map(|d| {
                let group = self
                    .observations
                    .iter()
                    .filter(|o| o.dose == d)
                    .map(|o| o.len)
                    .collect();
                (d, group)
            })
            .collect()
    }

    /// Check every `supp x dose` cell has enough observations for the
    /// per-cell normality tests (at least three).
    pub fn validate(&self) -> Result<(), DataError> {
        for (supp, dose, values) in self.cells() {
            if values.len() < SHAPIRO_MIN_N {
                return Err(DataError::InsufficientSamples {
                    cell: format!("{}:{}", supp, dose),
                    got: values.len(),
                    min: SHAPIRO_MIN_N,
                });
            }
        }
        Ok(())
    }
}
