//! IUPAC nucleotide ambiguity codes
//!
//! A position in a read is represented as a [`NucleotideSet`]: a 4-bit set with one bit
//! per nucleotide. Expanding an ambiguity letter and encoding a set back into a letter
//! are both table lookups.

/// Set of nucleotides observed at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct NucleotideSet(u8);

impl NucleotideSet {
    pub const EMPTY: Self = Self(0);
    pub const A: Self = Self(0b0001);
    pub const C: Self = Self(0b0010);
    pub const G: Self = Self(0b0100);
    pub const T: Self = Self(0b1000);
    pub const ALL: Self = Self(0b1111);

    /// Expands an IUPAC symbol (case-insensitive) into the nucleotides it stands for
    ///
    /// `U` is read as `T`; `N` and `X` stand for all four nucleotides. Unknown symbols
    /// expand to the empty set.
    #[must_use]
    pub fn from_iupac(symbol: char) -> Self {
        let bits = match symbol.to_ascii_uppercase() {
            'A' => 0b0001,
            'C' => 0b0010,
            'G' => 0b0100,
            'T' | 'U' => 0b1000,
            'M' => 0b0011,
            'R' => 0b0101,
            'W' => 0b1001,
            'S' => 0b0110,
            'Y' => 0b1010,
            'K' => 0b1100,
            'V' => 0b0111,
            'H' => 0b1011,
            'D' => 0b1101,
            'B' => 0b1110,
            'N' | 'X' => 0b1111,
            _ => 0,
        };
        Self(bits)
    }

    /// Encodes the set as its ambiguity letter, or `_` for the empty set
    #[must_use]
    pub fn to_iupac(self) -> char {
        IUPAC_BY_MASK[usize::from(self.0 & 0b1111)]
    }

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of nucleotides in the set
    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

/// Indexed by the set bits `T G C A` (high to low)
const IUPAC_BY_MASK: [char; 16] = [
    '_', 'A', 'C', 'M', 'G', 'R', 'S', 'V', 'T', 'W', 'Y', 'H', 'K', 'D', 'B', 'N',
];

/// Expands every symbol of a sequence into its nucleotide set
#[must_use]
pub fn expand(sequence: &str) -> Vec<NucleotideSet> {
    sequence.chars().map(NucleotideSet::from_iupac).collect()
}
