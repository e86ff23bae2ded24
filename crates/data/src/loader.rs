use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use avenue_core::{
    Avenue, Dataset, DatasetSchema, DurationCategory, InvestorRecord, ReasonColumn,
    ReturnCategory, ScoreMap,
};
use thiserror::Error;
use tracing::info;

use crate::reader::{split_records, CsvRecord};

pub const DURATION_COLUMN: &str = "Duration";
pub const EXPECT_COLUMN: &str = "Expect";
pub const GENDER_COLUMN: &str = "gender";
pub const AGE_COLUMN: &str = "age";
pub const SOURCE_COLUMN: &str = "Source";

/// Failures surfaced while loading a survey table. `row` is the 1-based
/// line the offending record starts on.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read dataset `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),
    #[error("row {row}: column `{column}` has non-numeric or non-finite value `{value}`")]
    InvalidNumber { row: usize, column: String, value: String },
    #[error("row {row}: column `{column}` has unknown category `{value}`")]
    UnknownCategory { row: usize, column: String, value: String },
    #[error("row {row}: {reason}")]
    Malformed { row: usize, reason: String },
    #[error("dataset is empty: no header row found")]
    Empty,
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    let dataset = parse_csv(&raw)?;

    info!(
        event_name = "dataset.loaded",
        path = %path.display(),
        records = dataset.len(),
        reason_columns = dataset.schema().reason_columns().len(),
        "loaded survey dataset"
    );
    Ok(dataset)
}

/// Parses CSV text with a header row into a [`Dataset`].
pub fn parse_csv(input: &str) -> Result<Dataset, LoadError> {
    let mut records = split_records(input)?.into_iter();
    let header = records.next().ok_or(LoadError::Empty)?;
    let columns = ColumnIndex::from_header(&header)?;

    let rows = records.map(|record| columns.read_row(&record)).collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new(rows, DatasetSchema::new(columns.reason_columns())))
}

struct ColumnIndex {
    width: usize,
    duration: usize,
    expect: usize,
    avenues: [usize; avenue_core::AVENUE_COUNT],
    gender: Option<usize>,
    age: Option<usize>,
    source: Option<usize>,
    reasons: Vec<(ReasonColumn, usize)>,
}

impl ColumnIndex {
    fn from_header(header: &CsvRecord) -> Result<Self, LoadError> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (index, name) in header.fields.iter().enumerate() {
            positions.entry(name.trim()).or_insert(index);
        }

        let required = |name: &str| {
            positions.get(name).copied().ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let duration = required(DURATION_COLUMN)?;
        let expect = required(EXPECT_COLUMN)?;
        let mut avenues = [0usize; avenue_core::AVENUE_COUNT];
        for avenue in Avenue::ALL {
            avenues[avenue.index()] = required(avenue.column_name())?;
        }

        let reasons = ReasonColumn::ALL
            .into_iter()
            .filter_map(|column| positions.get(column.column_name()).map(|index| (column, *index)))
            .collect();

        Ok(Self {
            width: header.fields.len(),
            duration,
            expect,
            avenues,
            gender: positions.get(GENDER_COLUMN).copied(),
            age: positions.get(AGE_COLUMN).copied(),
            source: positions.get(SOURCE_COLUMN).copied(),
            reasons,
        })
    }

    fn reason_columns(&self) -> Vec<ReasonColumn> {
        self.reasons.iter().map(|(column, _)| *column).collect()
    }

    fn read_row(&self, record: &CsvRecord) -> Result<InvestorRecord, LoadError> {
        let row = record.line;
        if record.fields.len() != self.width {
            return Err(LoadError::Malformed {
                row,
                reason: format!(
                    "expected {} fields, found {}",
                    self.width,
                    record.fields.len()
                ),
            });
        }
        let field = |index: usize| record.fields[index].trim();

        let duration = field(self.duration).parse::<DurationCategory>().map_err(|_| {
            LoadError::UnknownCategory {
                row,
                column: DURATION_COLUMN.to_string(),
                value: field(self.duration).to_string(),
            }
        })?;
        let expected_return = field(self.expect).parse::<ReturnCategory>().map_err(|_| {
            LoadError::UnknownCategory {
                row,
                column: EXPECT_COLUMN.to_string(),
                value: field(self.expect).to_string(),
            }
        })?;

        let mut scores = ScoreMap::default();
        for avenue in Avenue::ALL {
            let raw = field(self.avenues[avenue.index()]);
            let score = raw.parse::<f64>().ok().filter(|score| score.is_finite()).ok_or_else(
                || LoadError::InvalidNumber {
                    row,
                    column: avenue.column_name().to_string(),
                    value: raw.to_string(),
                },
            )?;
            scores.set(avenue, score);
        }

        let mut investor = InvestorRecord::new(duration, expected_return, scores);
        for (column, index) in &self.reasons {
            investor.reasons.set(*column, present(field(*index)));
        }
        investor.gender = self.gender.and_then(|index| present(field(index)));
        investor.source = self.source.and_then(|index| present(field(index)));
        investor.age =
            self.age.and_then(|index| present(field(index))).and_then(|raw| parse_age(&raw));

        Ok(investor)
    }
}

const MISSING_MARKERS: [&str; 4] = ["nan", "na", "n/a", "null"];

/// Trimmed value, or `None` for blanks and stringified missing cells.
fn present(value: &str) -> Option<String> {
    let missing = MISSING_MARKERS.iter().any(|marker| value.eq_ignore_ascii_case(marker));
    if value.is_empty() || missing {
        None
    } else {
        Some(value.to_string())
    }
}

/// Age is descriptive only, so an unreadable value is dropped rather than
/// failing the load. Float exports such as `34.0` truncate to whole years.
fn parse_age(raw: &str) -> Option<u32> {
    raw.parse::<f64>()
        .ok()
        .filter(|age| age.is_finite() && *age >= 0.0 && *age <= f64::from(u32::MAX))
        .map(|age| age as u32)
}
