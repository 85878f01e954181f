//! CSV parsing for ToothGrowth-shaped data.
//!
//! Expects a header naming the `len`, `supp` and `dose` columns in any
//! order. Fields may be double-quoted. A leading row-name column, as written
//! by R's `write.csv`, is skipped whether or not the header names it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DataError, Dataset, Dose, Observation, Supplement};

/// Load observations from a CSV file.
///
/// # Example file content
/// ```csv
/// "","len","supp","dose"
/// "1",4.2,"VC",0.5
/// "2",11.5,"VC",0.5
/// ```
///
/// # Errors
/// Returns `DataError` if the file cannot be read, a required column is
/// missing, or a row carries an unparseable or unknown value. Cell sizes are
/// not checked here; see [`Dataset::validate`].
pub fn load_csv(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut columns: Option<Columns> = None;
    let mut observations = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        let line_no = line_num + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = split_fields(line);
        let Some(cols) = &columns else {
            columns = Some(Columns::from_header(&fields)?);
            continue;
        };

        // Unnamed row-name column: data rows carry one more field than the header.
        let offset = match fields.len() {
            n if n == cols.width => 0,
            n if n == cols.width + 1 => 1,
            n => {
                return Err(DataError::Parse {
                    line: line_no,
                    message: format!("expected {} columns, got {}", cols.width, n),
                })
            }
        };
        let field = |idx: usize| fields[idx + offset].as_str();

        let len_str = field(cols.len);
        let len = len_str
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DataError::InvalidValue {
                line: line_no,
                value: len_str.to_string(),
            })?;
        let supp = Supplement::parse(field(cols.supp)).ok_or_else(|| {
            DataError::UnknownSupplement {
                line: line_no,
                value: field(cols.supp).to_string(),
            }
        })?;
        let dose = Dose::parse(field(cols.dose)).ok_or_else(|| DataError::UnknownDose {
            line: line_no,
            value: field(cols.dose).to_string(),
        })?;

        observations.push(Observation { len, supp, dose });
    }

    if columns.is_none() {
        return Err(DataError::Parse {
            line: 1,
            message: "file has no header".to_string(),
        });
    }

    tracing::debug!(path = %path.display(), rows = observations.len(), "loaded csv");
    Ok(Dataset::new(observations, path.display().to_string()))
}

/// Positions of the required columns within a header.
struct Columns {
    len: usize,
    supp: usize,
    dose: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            len: find("len")?,
            supp: find("supp")?,
            dose: find("dose")?,
            width: header.len(),
        })
    }
}

/// Split a line on commas and strip surrounding whitespace and quotes.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|f| {
            let f = f.trim();
            f.strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(f)
                .trim()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_strips_quotes() {
        assert_eq!(
            split_fields(r#""1", 4.2 ,"VC",0.5"#),
            vec!["1", "4.2", "VC", "0.5"]
        );
        assert_eq!(split_fields(r#""""#), vec![""]);
    }

    #[test]
    fn test_header_lookup_any_order() {
        let header: Vec<String> = ["dose", "SUPP", "len"].iter().map(|s| s.to_string()).collect();
        let cols = Columns::from_header(&header).unwrap();
        assert_eq!((cols.len, cols.supp, cols.dose, cols.width), (2, 1, 0, 3));
    }

    #[test]
    fn test_header_missing_column() {
        let header: Vec<String> = ["len", "supp"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            Columns::from_header(&header),
            Err(DataError::MissingColumn(c)) if c == "dose"
        ));
    }
}
