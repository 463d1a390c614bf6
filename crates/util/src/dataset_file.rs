use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use gallery_types::{Dataset, DatasetError};
use thiserror::Error;
use tracing::debug;

use crate::expand_tilde;

/// Path value that reads the dataset from standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Error)]
pub enum DatasetFileError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode dataset {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },
}

/// Loads a dataset JSON file. `-` reads standard input.
pub fn load_dataset(path: &str) -> Result<Dataset, DatasetFileError> {
    if path.trim() == STDIN_PATH {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|source| DatasetFileError::Io {
                path: PathBuf::from(STDIN_PATH),
                source,
            })?;
        return decode(&input, Path::new(STDIN_PATH));
    }
    read_dataset(&expand_tilde(path))
}

pub fn read_dataset(path: &Path) -> Result<Dataset, DatasetFileError> {
    let input = fs::read_to_string(path).map_err(|source| DatasetFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&input, path)
}

fn decode(input: &str, path: &Path) -> Result<Dataset, DatasetFileError> {
    let dataset = Dataset::from_json_str(input).map_err(|source| DatasetFileError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        headers = dataset.column_count(),
        rows = dataset.row_count(),
        "dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_bare_row_arrays() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        fs::write(&path, r#"[{"name": "Bob", "age": 30}, {"name": "Al"}]"#).unwrap();

        let dataset = read_dataset(&path).unwrap();

        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn reports_path_on_failure() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_dataset(&missing).unwrap_err();
        assert!(matches!(err, DatasetFileError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"headers": [{"id": "a", "value": "A"}, {"id": "a", "value": "B"}], "rows": []}"#).unwrap();
        let err = read_dataset(&bad).unwrap_err();
        assert!(matches!(
            err,
            DatasetFileError::Decode {
                source: DatasetError::DuplicateHeader { .. },
                ..
            }
        ));
    }
}
