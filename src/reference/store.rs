//! Backing storage for reference sequence.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Mutex;

use noodles::core::{Position, Region};
use noodles::fasta;

use crate::reference::ReferenceError;

/// Where reference bases come from.
///
/// Both variants are read through `&self`, so a provider can be shared freely
/// between per-record extraction calls.
pub enum SequenceStore {
    /// Whole contigs held in memory, keyed by exact name
    InMemory(HashMap<String, Vec<u8>>),
    /// An indexed FASTA on disk; seeks need exclusive access to the reader
    Indexed(Mutex<fasta::io::IndexedReader<BufReader<File>>>),
}

impl std::fmt::Debug for SequenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory(sequences) => write!(f, "InMemory({} contigs)", sequences.len()),
            Self::Indexed(_) => write!(f, "Indexed"),
        }
    }
}

impl SequenceStore {
    /// Read bases `[start, end)` (0-based, half-open) of contig `name`.
    ///
    /// The range must lie within the contig; callers clamp first.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::InvalidRange` for an empty or out-of-bounds range,
    /// `ReferenceError::ContigNotFound` if the in-memory store lacks the contig, or
    /// `ReferenceError::Noodles` if an indexed read fails.
    pub fn read(&self, name: &str, start: u64, end: u64) -> Result<Vec<u8>, ReferenceError> {
        let invalid = || ReferenceError::InvalidRange {
            contig: name.to_string(),
            start,
            end,
        };

        if start >= end {
            return Err(invalid());
        }

        match self {
            Self::InMemory(sequences) => {
                let sequence = sequences
                    .get(name)
                    .ok_or_else(|| ReferenceError::ContigNotFound {
                        name: name.to_string(),
                        attempted: vec![name.to_string()],
                    })?;
                let start = usize::try_from(start).map_err(|_| invalid())?;
                let end = usize::try_from(end).map_err(|_| invalid())?;
                sequence
                    .get(start..end)
                    .map(<[u8]>::to_vec)
                    .ok_or_else(invalid)
            }
            Self::Indexed(reader) => {
                // noodles regions are 1-based and inclusive
                let first = usize::try_from(start + 1)
                    .ok()
                    .and_then(|p| Position::try_from(p).ok())
                    .ok_or_else(invalid)?;
                let last = usize::try_from(end)
                    .ok()
                    .and_then(|p| Position::try_from(p).ok())
                    .ok_or_else(invalid)?;
                let region = Region::new(name, first..=last);

                let mut reader = reader.lock().map_err(|_| {
                    ReferenceError::Io(std::io::Error::other("reference reader lock poisoned"))
                })?;
                let record = reader.query(&region).map_err(|e| {
                    ReferenceError::Noodles(format!("Failed to read {name}:{start}-{end}: {e}"))
                })?;
                Ok(record.sequence().as_ref().to_vec())
            }
        }
    }
}
