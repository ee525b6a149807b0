use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Mutex;

use noodles::fasta;
use tracing::{debug, info, warn};

use crate::core::contig::{Contig, ContigTable};
use crate::core::sequence::PAD_BASE;
use crate::parsing::fai::{
    fai_path_for, index_fasta, index_to_contigs, read_fai_file, write_fai_file,
};
use crate::parsing::fasta::{is_fasta_file, read_fasta_sequences};
use crate::parsing::{is_gzipped, ParseError};
use crate::reference::names::resolve_contig_name;
use crate::reference::store::SequenceStore;
use crate::reference::ReferenceError;

/// Read-only handle on a reference genome
#[derive(Debug)]
pub struct ReferenceProvider {
    contigs: ContigTable,
    store: SequenceStore,
}

impl ReferenceProvider {
    /// Open a FASTA reference.
    ///
    /// An uncompressed FASTA is read on demand through its `.fai` index. If the
    /// index is missing it is built by scanning the FASTA once and written next to
    /// it when the directory is writable. A gzip-compressed FASTA cannot be read at
    /// random, so every sequence is loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Parse` if the path does not look like a FASTA file
    /// or the FASTA or its index cannot be parsed, and `ReferenceError::Io` if the
    /// FASTA cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ReferenceError> {
        if !is_fasta_file(path) {
            return Err(ParseError::InvalidFormat(format!(
                "{} is not a FASTA file (expected .fa, .fasta or .fna, optionally gzipped)",
                path.display()
            ))
            .into());
        }

        if is_gzipped(path) {
            let provider = Self::from_sequences(read_fasta_sequences(path)?);
            info!(
                "Loaded compressed reference {} into memory ({} contigs)",
                path.display(),
                provider.contigs.len()
            );
            return Ok(provider);
        }

        let fai_path = fai_path_for(path);
        let index = if fai_path.exists() {
            read_fai_file(&fai_path)?
        } else {
            info!("No index found for {}; indexing", path.display());
            let index = index_fasta(path)?;
            match write_fai_file(&fai_path, &index) {
                Ok(()) => debug!("Wrote index {}", fai_path.display()),
                Err(e) => warn!("Could not save index {}: {e}", fai_path.display()),
            }
            index
        };

        let contigs = index_to_contigs(&index);
        let file = File::open(path).map(BufReader::new)?;
        let reader = fasta::io::IndexedReader::new(file, index);

        info!(
            "Opened indexed reference {} ({} contigs)",
            path.display(),
            contigs.len()
        );
        Ok(Self {
            contigs,
            store: SequenceStore::Indexed(Mutex::new(reader)),
        })
    }

    /// Build an in-memory reference from `(name, bases)` pairs
    pub fn from_sequences<N, I>(sequences: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<u8>)>,
    {
        let mut contigs = Vec::new();
        let mut by_name = HashMap::new();
        for (name, bases) in sequences {
            let name = name.into();
            contigs.push(Contig::new(name.clone(), bases.len() as u64));
            by_name.insert(name, bases);
        }

        Self {
            contigs: ContigTable::new(contigs),
            store: SequenceStore::InMemory(by_name),
        }
    }

    #[must_use]
    pub fn contigs(&self) -> &ContigTable {
        &self.contigs
    }

    /// Fetch `flank` bases either side of a 1-based `position`, plus the base itself.
    ///
    /// The contig name is reconciled against the reference (see
    /// [`resolve_contig_name`]). The result always has exactly `2 * flank + 1`
    /// bases; any part of the window before the start or past the end of the
    /// contig is filled with `N`. Bases are returned as stored, so soft-masked
    /// (lowercase) sequence stays lowercase.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::ContigNotFound` if the name cannot be reconciled,
    /// `ReferenceError::InvalidPosition` for position 0, or an I/O error from the
    /// underlying store.
    pub fn fetch(&self, contig: &str, position: u64, flank: u64) -> Result<Vec<u8>, ReferenceError> {
        let name = resolve_contig_name(contig, &self.contigs)?;
        if position == 0 {
            return Err(ReferenceError::InvalidPosition {
                contig: name,
                position,
            });
        }

        let length = self.contigs.length(&name).unwrap_or(0);
        let window = window_len(flank)?;

        // [position - 1 - flank, position + flank) in 0-based coordinates
        let offset = position - 1;
        let (pad_left, start) = if offset < flank {
            (flank - offset, 0)
        } else {
            (0, offset - flank)
        };
        let end = position.saturating_add(flank).min(length);

        let mut bases = Vec::with_capacity(window);
        bases.resize(usize::try_from(pad_left).unwrap_or(window), PAD_BASE);
        if start < end {
            bases.extend(self.store.read(&name, start, end)?);
        }
        bases.resize(window, PAD_BASE);

        debug!(
            "Fetched {name}:{position} +/- {flank} ({pad_left} left pad, {} bases read)",
            end.saturating_sub(start)
        );
        Ok(bases)
    }
}

/// Number of bases in a window of `flank` either side of a site
fn window_len(flank: u64) -> Result<usize, ReferenceError> {
    flank
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(ReferenceError::FlankTooLarge(flank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn small_reference() -> ReferenceProvider {
        ReferenceProvider::from_sequences([
            ("chr1", b"ACGTACGTAC".to_vec()),
            ("chr2", b"acg".to_vec()),
        ])
    }

    #[test]
    fn test_fetch_interior() {
        let reference = small_reference();
        // position 5 -> offset 4; window [2, 7)
        assert_eq!(reference.fetch("chr1", 5, 2).unwrap(), b"GTACG".to_vec());
        assert_eq!(reference.fetch("chr1", 5, 0).unwrap(), b"A".to_vec());
    }

    #[test]
    fn test_fetch_pads_left() {
        let reference = small_reference();
        assert_eq!(reference.fetch("chr1", 1, 3).unwrap(), b"NNNACGT".to_vec());
        assert_eq!(reference.fetch("chr1", 2, 5).unwrap(), b"NNNNACGTACG".to_vec());
    }

    #[test]
    fn test_fetch_pads_right() {
        let reference = small_reference();
        assert_eq!(reference.fetch("chr1", 10, 3).unwrap(), b"GTACNNN".to_vec());
    }

    #[test]
    fn test_fetch_pads_both_sides() {
        let reference = small_reference();
        assert_eq!(reference.fetch("chr2", 2, 3).unwrap(), b"NNacgNN".to_vec());
    }

    #[test]
    fn test_fetch_beyond_contig_end() {
        let reference = small_reference();
        assert_eq!(reference.fetch("chr1", 20, 2).unwrap(), b"NNNNN".to_vec());
    }

    #[test]
    fn test_fetch_length_invariant() {
        let reference = small_reference();
        for flank in [0u64, 1, 2, 4, 9, 25] {
            for position in 1..=15u64 {
                let window = reference.fetch("chr1", position, flank).unwrap();
                assert_eq!(
                    window.len() as u64,
                    2 * flank + 1,
                    "position {position}, flank {flank}"
                );
            }
        }
    }

    #[test]
    fn test_fetch_reconciles_names() {
        let reference = small_reference();
        assert_eq!(reference.fetch("1", 5, 0).unwrap(), b"A".to_vec());
        assert_eq!(reference.fetch("chr1|Y", 5, 0).unwrap(), b"A".to_vec());
        assert!(matches!(
            reference.fetch("chrZZ", 5, 0),
            Err(ReferenceError::ContigNotFound { .. })
        ));
    }

    #[test]
    fn test_fetch_rejects_position_zero() {
        let reference = small_reference();
        assert!(matches!(
            reference.fetch("chr1", 0, 2),
            Err(ReferenceError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_open_indexed_matches_in_memory() {
        let dir = TempDir::new().unwrap();
        let fasta_path = dir.path().join("ref.fa");
        // chr1 is 16 bases over lines of 8; chr2 is 4 bases
        std::fs::write(&fasta_path, b">chr1\nACGTACGT\nTTTTGGGG\n>chr2\nCCCA\n").unwrap();
        let mut fai = std::fs::File::create(fai_path_for(&fasta_path)).unwrap();
        fai.write_all(b"chr1\t16\t6\t8\t9\nchr2\t4\t30\t4\t5\n").unwrap();
        drop(fai);

        let indexed = ReferenceProvider::open(&fasta_path).unwrap();
        assert!(matches!(indexed.store, SequenceStore::Indexed(_)));
        assert_eq!(indexed.contigs().length("chr1"), Some(16));

        assert_eq!(indexed.fetch("1", 8, 2).unwrap(), b"CGTTT".to_vec());
        assert_eq!(indexed.fetch("chr1", 16, 2).unwrap(), b"GGGNN".to_vec());
        assert_eq!(indexed.fetch("chr2", 1, 1).unwrap(), b"NCC".to_vec());
    }

    #[test]
    fn test_open_without_index_builds_one() {
        let dir = TempDir::new().unwrap();
        let fasta_path = dir.path().join("ref.fa");
        std::fs::write(&fasta_path, b">1 desc\nACGTACGT\nTTTT\n").unwrap();

        let reference = ReferenceProvider::open(&fasta_path).unwrap();
        assert!(matches!(reference.store, SequenceStore::Indexed(_)));
        assert_eq!(reference.contigs().length("1"), Some(12));
        assert_eq!(reference.fetch("chr1", 2, 1).unwrap(), b"ACG".to_vec());
        assert_eq!(reference.fetch("1", 9, 1).unwrap(), b"TTT".to_vec());

        assert_eq!(
            std::fs::read_to_string(fai_path_for(&fasta_path)).unwrap(),
            "1\t12\t8\t8\t9\n"
        );
    }

    #[test]
    fn test_open_gzipped_loads_into_memory() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = TempDir::new().unwrap();
        let fasta_path = dir.path().join("ref.fa.gz");
        let mut encoder = GzEncoder::new(
            std::fs::File::create(&fasta_path).unwrap(),
            Compression::default(),
        );
        encoder.write_all(b">1\nACGTACGT\n").unwrap();
        encoder.finish().unwrap();

        let reference = ReferenceProvider::open(&fasta_path).unwrap();
        assert!(matches!(reference.store, SequenceStore::InMemory(_)));
        assert_eq!(reference.fetch("chr1", 2, 1).unwrap(), b"ACG".to_vec());
        assert!(!fai_path_for(&fasta_path).exists());
    }

    #[test]
    fn test_open_rejects_non_fasta_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junctions.csv");
        std::fs::write(&path, b"id,junction\n").unwrap();

        assert!(matches!(
            ReferenceProvider::open(&path),
            Err(ReferenceError::Parse(ParseError::InvalidFormat(_)))
        ));
    }
}
