//! Categorical factor columns.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// A categorical column: an ordered level list plus one level code per row.
///
/// Level order matters: it fixes the reference level for treatment coding
/// (the first level) and the orientation of pairwise differences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FactorParts")]
pub struct Factor {
    name: String,
    levels: Vec<String>,
    codes: Vec<usize>,
}

/// Unchecked wire form; deserialized factors go through [`Factor::new`].
#[derive(Deserialize)]
struct FactorParts {
    name: String,
    levels: Vec<String>,
    codes: Vec<usize>,
}

impl TryFrom<FactorParts> for Factor {
    type Error = StatsError;

    fn try_from(parts: FactorParts) -> StatsResult<Self> {
        Factor::new(parts.name, parts.levels, parts.codes)
    }
}

impl Factor {
    /// Build a factor, checking every code indexes into `levels`.
    pub fn new(
        name: impl Into<String>,
        levels: Vec<String>,
        codes: Vec<usize>,
    ) -> StatsResult<Self> {
        let name = name.into();
        if let Some(&code) = codes.iter().find(|&&c| c >= levels.len()) {
            return Err(StatsError::InvalidCode {
                factor: name,
                code,
                levels: levels.len(),
            });
        }
        Ok(Self {
            name,
            levels,
            codes,
        })
    }

    /// Build a factor from row labels, with levels in order of first appearance.
    pub fn from_labels<S: AsRef<str>>(name: impl Into<String>, labels: &[S]) -> Self {
        let mut levels: Vec<String> = Vec::new();
        let codes = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                match levels.iter().position(|l| l == label) {
                    Some(idx) => idx,
                    None => {
                        levels.push(label.to_string());
                        levels.len() - 1
                    }
                }
            })
            .collect();
        Self {
            name: name.into(),
            levels,
            codes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Cross two factors into one whose levels are every `a:b` combination.
    ///
    /// The first factor varies fastest, so for `supp` (OJ, VC) crossed with
    /// `dose` (0.5, 1, 2) the levels run `OJ:0.5, VC:0.5, OJ:1, ...`.
    pub fn interaction(&self, other: &Factor) -> StatsResult<Factor> {
        if self.len() != other.len() {
            return Err(StatsError::LengthMismatch {
                factor: other.name.clone(),
                expected: self.len(),
                got: other.len(),
            });
        }
        let ka = self.num_levels();
        let mut levels = Vec::with_capacity(ka * other.num_levels());
        for b in &other.levels {
            for a in &self.levels {
                levels.push(format!("{}:{}", a, b));
            }
        }
        let codes = self
            .codes
            .iter()
            .zip(&other.codes)
            .map(|(&a, &b)| a + ka * b)
            .collect();
        Ok(Factor {
            name: format!("{}:{}", self.name, other.name),
            levels,
            codes,
        })
    }

    /// Split `response` into one vector per level, in level order.
    ///
    /// Levels with no rows yield empty vectors; callers decide whether that
    /// is an error.
    pub fn split(&self, response: &[f64]) -> StatsResult<Vec<Vec<f64>>> {
        self.check_len(response.len())?;
        let mut groups = vec![Vec::new(); self.num_levels()];
        for (&code, &y) in self.codes.iter().zip(response) {
            groups[code].push(y);
        }
        Ok(groups)
    }

    /// Number of rows at each level.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_levels()];
        for &code in &self.codes {
            counts[code] += 1;
        }
        counts
    }

    pub(crate) fn check_len(&self, expected: usize) -> StatsResult<()> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(StatsError::LengthMismatch {
                factor: self.name.clone(),
                expected,
                got: self.len(),
            })
        }
    }
}
