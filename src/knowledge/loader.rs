//! CSV loader for the knowledge base.
//!
//! Expected header: `ingredient,beneficial,description,alternatives`.
//! `beneficial` is true only for the literal `true` (any case);
//! `alternatives` is a single field of `;`-separated names, with empty
//! entries discarded. Every field is trimmed.
//!
//! Rows need not match the header width: fields past the header are
//! ignored and a missing `alternatives` field means no alternatives. A row
//! too short to carry `ingredient`, `beneficial` and `description` is
//! malformed.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::DataSourceError;
use crate::knowledge::{KnowledgeBase, KnowledgeBaseBuilder};
use crate::record::parse_flag;

/// Column names required in the header row.
pub const REQUIRED_COLUMNS: [&str; 4] = ["ingredient", "beneficial", "description", "alternatives"];

const READER_ORIGIN: &str = "<reader>";

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    ingredient: usize,
    beneficial: usize,
    description: usize,
    alternatives: usize,
}

impl ColumnIndex {
    /// Returns the first required column (other than `alternatives`) the
    /// row is too short to contain.
    fn missing_in(&self, row: &csv::StringRecord) -> Option<&'static str> {
        [
            ("ingredient", self.ingredient),
            ("beneficial", self.beneficial),
            ("description", self.description),
        ]
        .into_iter()
        .find(|&(_, idx)| idx >= row.len())
        .map(|(column, _)| column)
    }

    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataSourceError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| DataSourceError::MissingColumn {
                    column: column.to_string(),
                })
        };
        let [ingredient, beneficial, description, alternatives] = REQUIRED_COLUMNS.map(find);
        Ok(Self {
            ingredient: ingredient?,
            beneficial: beneficial?,
            description: description?,
            alternatives: alternatives?,
        })
    }
}

/// Splits a `;`-separated alternatives field.
#[must_use]
pub fn split_alternatives(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .collect()
}

fn map_csv_error(err: &csv::Error, origin: &Path) -> DataSourceError {
    let line = err.position().map_or(0, csv::Position::line);
    match err.kind() {
        csv::ErrorKind::Io(io_err) => DataSourceError::Io {
            path: origin.to_path_buf(),
            source: io::Error::new(io_err.kind(), io_err.to_string()),
        },
        _ => DataSourceError::Malformed {
            line,
            reason: err.to_string(),
        },
    }
}

fn load<R: Read>(reader: R, origin: &Path) -> Result<KnowledgeBase, DataSourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| map_csv_error(&e, origin))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut builder = KnowledgeBaseBuilder::default();
    let mut rows = 0usize;
    for result in csv_reader.records() {
        let row = result.map_err(|e| map_csv_error(&e, origin))?;
        let line = row.position().map_or(0, csv::Position::line);
        if let Some(column) = columns.missing_in(&row) {
            return Err(DataSourceError::Malformed {
                line,
                reason: format!("row has {} fields, missing '{column}'", row.len()),
            });
        }
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let name = field(columns.ingredient);
        let inserted = builder.insert(
            name,
            parse_flag(field(columns.beneficial)),
            field(columns.description),
            split_alternatives(field(columns.alternatives)),
        );
        if !inserted {
            warn!(line, "skipping knowledge base row with blank ingredient name");
            continue;
        }
        rows += 1;
    }

    if rows > builder.len() {
        debug!(
            rows,
            distinct = builder.len(),
            "duplicate ingredient rows overwrote earlier entries"
        );
    }
    let kb = builder.build();
    info!(count = kb.len(), source = %origin.display(), "loaded ingredients");
    Ok(kb)
}

impl KnowledgeBase {
    /// Loads a knowledge base from a CSV file.
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist
    /// - `Io` if it cannot be read
    /// - `MissingColumn` / `Malformed` if the content is not a valid table
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DataSourceError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DataSourceError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        load(file, path)
    }

    /// Loads a knowledge base from any CSV byte stream.
    ///
    /// # Errors
    /// Same as [`from_csv_path`](Self::from_csv_path), minus `NotFound`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DataSourceError> {
        load(reader, &PathBuf::from(READER_ORIGIN))
    }
}
