/// Symbol written for a strand that could not be determined
pub const UNKNOWN_STRAND_SYMBOL: &str = ".";

/// Orientation of a feature relative to the reference coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    /// `+`: reads 5' to 3' in increasing coordinate order
    Forward,
    /// `-`: reads 5' to 3' in decreasing coordinate order
    Reverse,
    /// `.`, empty, or anything else
    Unknown,
}

impl Strand {
    /// Parse a strand symbol. Anything other than `+` or `-` (after trimming) is unknown.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "+" => Self::Forward,
            "-" => Self::Reverse,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Forward => "+",
            Self::Reverse => "-",
            Self::Unknown => UNKNOWN_STRAND_SYMBOL,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What to do when a single record cannot be processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Stop the run at the first failing record
    #[default]
    Abort,
    /// Drop the failing record, count it, and keep going
    Skip,
}

/// `part / whole`, or 0.0 when `whole` is 0
#[must_use]
#[allow(clippy::cast_precision_loss)] // Counts are far below 2^52
pub fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
