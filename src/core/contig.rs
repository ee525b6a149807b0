use std::collections::HashMap;

/// A single contig/sequence in a reference genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    /// Sequence name as it appears in the FASTA header or index
    pub name: String,

    /// Sequence length in bases
    pub length: u64,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// The set of contigs known to a reference, in file order.
///
/// Lookups are by exact name; name reconciliation (`chr` prefixes, `|` suffixes)
/// lives in [`crate::reference::names`].
#[derive(Debug, Clone, Default)]
pub struct ContigTable {
    contigs: Vec<Contig>,
    by_name: HashMap<String, usize>,
}

impl ContigTable {
    #[must_use]
    pub fn new(contigs: Vec<Contig>) -> Self {
        let by_name = contigs
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self { contigs, by_name }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Contig> {
        self.by_name.get(name).map(|&i| &self.contigs[i])
    }

    #[must_use]
    pub fn length(&self, name: &str) -> Option<u64> {
        self.get(name).map(|c| c.length)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contig> {
        self.contigs.iter()
    }
}

impl FromIterator<Contig> for ContigTable {
    fn from_iter<I: IntoIterator<Item = Contig>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contig_table_lookup() {
        let table: ContigTable = [Contig::new("chr1", 1000), Contig::new("chrM", 16569)]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 2);
        assert!(table.contains("chr1"));
        assert!(!table.contains("1"));
        assert_eq!(table.length("chrM"), Some(16569));
        assert_eq!(table.length("chrX"), None);

        let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chrM"]);
    }

    #[test]
    fn test_contig_table_last_duplicate_wins() {
        let table = ContigTable::new(vec![Contig::new("chr1", 10), Contig::new("chr1", 20)]);
        assert_eq!(table.length("chr1"), Some(20));
    }
}
