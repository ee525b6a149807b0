use std::str::FromStr;

use thiserror::Error;

use crate::core::types::Strand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JunctionError {
    #[error("Malformed junction '{text}': {reason}")]
    Malformed { text: String, reason: String },
}

impl JunctionError {
    fn malformed(text: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// A splice junction in reference coordinates, written `chrom:donor-acceptor`.
///
/// Positions are 1-based. The chromosome is everything before the last `:`, so
/// names such as `HLA-A*01:01` survive parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junction {
    pub chrom: String,
    pub donor: u64,
    pub acceptor: u64,
}

impl FromStr for Junction {
    type Err = JunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (chrom, coords) = text
            .rsplit_once(':')
            .ok_or_else(|| JunctionError::malformed(text, "expected 'chrom:donor-acceptor'"))?;

        if chrom.is_empty() {
            return Err(JunctionError::malformed(text, "empty chromosome name"));
        }

        let (donor, acceptor) = coords
            .split_once('-')
            .ok_or_else(|| JunctionError::malformed(text, "expected 'donor-acceptor'"))?;

        Ok(Self {
            chrom: chrom.to_string(),
            donor: parse_position(text, donor)?,
            acceptor: parse_position(text, acceptor)?,
        })
    }
}

fn parse_position(text: &str, field: &str) -> Result<u64, JunctionError> {
    let position: u64 = field
        .trim()
        .parse()
        .map_err(|_| JunctionError::malformed(text, format!("'{field}' is not a position")))?;
    if position == 0 {
        return Err(JunctionError::malformed(text, "positions are 1-based"));
    }
    Ok(position)
}

impl std::fmt::Display for Junction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.donor, self.acceptor)
    }
}

/// A junction row from the input table with its annotated strand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionRecord {
    pub identifier: String,
    pub junction: Junction,
    pub strand: Strand,
}

impl JunctionRecord {
    /// Build a record from the raw `junction` and `strand` field text.
    ///
    /// # Errors
    ///
    /// Returns `JunctionError::Malformed` if the junction text does not parse.
    pub fn from_fields(
        identifier: impl Into<String>,
        junction: &str,
        strand: &str,
    ) -> Result<Self, JunctionError> {
        Ok(Self {
            identifier: identifier.into(),
            junction: junction.parse()?,
            strand: Strand::parse(strand),
        })
    }
}
