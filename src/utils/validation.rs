//! Centralized validation and helper functions.

use std::path::Path;

/// Largest flank accepted on the command line
pub const MAX_FLANK: u64 = 100_000;

/// Validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Flank must be between 1 and {MAX_FLANK}, got {0}")]
    FlankOutOfRange(u64),
    #[error("Flank must be a whole number, got '{0}'")]
    InvalidFlank(String),
    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),
    #[error("Output path {0} is the same as input path")]
    OutputOverwritesInput(String),
}

/// Check a flank size given on the command line.
///
/// # Examples
///
/// ```
/// use splice_flank::utils::validation::validate_flank;
///
/// assert!(validate_flank(250).is_ok());
/// assert!(validate_flank(0).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::FlankOutOfRange` for 0 or anything above [`MAX_FLANK`].
pub fn validate_flank(flank: u64) -> Result<u64, ValidationError> {
    if (1..=MAX_FLANK).contains(&flank) {
        Ok(flank)
    } else {
        Err(ValidationError::FlankOutOfRange(flank))
    }
}

/// Parse and check a flank size from command-line text.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFlank` if `s` is not a whole number, or
/// `ValidationError::FlankOutOfRange` if it is out of range.
pub fn parse_flank(s: &str) -> Result<u64, ValidationError> {
    let flank = s
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFlank(s.to_string()))?;
    validate_flank(flank)
}

/// Parse a delimiter argument: a single ASCII character, or `\t` / `tab` for tab.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDelimiter` for anything else.
pub fn parse_delimiter(s: &str) -> Result<u8, ValidationError> {
    match s {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(ValidationError::InvalidDelimiter(s.to_string())),
    }
}

/// Refuse to write an output over the input it is derived from.
///
/// # Errors
///
/// Returns `ValidationError::OutputOverwritesInput` if both paths name the same file.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<(), ValidationError> {
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        Err(ValidationError::OutputOverwritesInput(
            output.display().to_string(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_flank() {
        assert_eq!(validate_flank(1), Ok(1));
        assert_eq!(validate_flank(MAX_FLANK), Ok(MAX_FLANK));
        assert_eq!(validate_flank(0), Err(ValidationError::FlankOutOfRange(0)));
        assert!(validate_flank(MAX_FLANK + 1).is_err());
    }

    #[test]
    fn test_parse_flank() {
        assert_eq!(parse_flank("250"), Ok(250));
        assert_eq!(parse_flank("0"), Err(ValidationError::FlankOutOfRange(0)));
        assert_eq!(
            parse_flank("-3"),
            Err(ValidationError::InvalidFlank("-3".to_string()))
        );
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_ensure_distinct() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "a\n").unwrap();

        assert!(ensure_distinct(&input, &dir.path().join("out.csv")).is_ok());
        assert!(ensure_distinct(&input, &input).is_err());
        assert!(ensure_distinct(&input, &dir.path().join(".").join("in.csv")).is_err());
    }
}
