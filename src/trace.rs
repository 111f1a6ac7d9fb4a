//! Chromatogram synthesis
//!
//! A set of weighted reads is turned into four intensity channels and a consensus
//! basecall string. Each consensus position contributes one copy of the intensity curve
//! to every channel, scaled by the total weight of the reads carrying that nucleotide.

use log::trace;

use crate::iupac::{expand, NucleotideSet};

/// Intensity curve for one fully present base
///
/// This defines the shape of the chromatogram peak and the number of values per base.
pub const DEFAULT_CURVE: [f64; 10] = [0.0, 0.0, 128.0, 512.0, 1024.0, 1024.0, 512.0, 128.0, 0.0, 0.0];

/// Channel order used throughout the ABIF file (`FWO_` = "GATC")
pub const CHANNEL_ORDER: [NucleotideSet; 4] = [
    NucleotideSet::G,
    NucleotideSet::A,
    NucleotideSet::T,
    NucleotideSet::C,
];

/// Synthesized chromatogram for one consensus sequence
#[derive(Debug, Clone, PartialEq)]
pub struct TraceData {
    /// Channel intensities for G
    pub data_g: Vec<f64>,
    /// Channel intensities for A
    pub data_a: Vec<f64>,
    /// Channel intensities for T
    pub data_t: Vec<f64>,
    /// Channel intensities for C
    pub data_c: Vec<f64>,
    /// Number of intensity samples per base (the length of the curve)
    pub vals_per_base: usize,
    /// Consensus sequence as IUPAC ambiguity codes
    pub fasta: String,
}
impl TraceData {
    /// Channels in `GATC` order
    #[must_use]
    pub fn channels(&self) -> [&[f64]; 4] {
        [&self.data_g, &self.data_a, &self.data_t, &self.data_c]
    }

    /// Length of the consensus sequence
    #[must_use]
    pub fn num_bases(&self) -> usize {
        self.fasta.chars().count()
    }
}

/// Synthesizes a chromatogram from weighted reads
///
/// Reads of unequal length are not padded: a read that ends before a position simply
/// contributes nothing there. The weight sum at every position is clamped to `[0, 1]`.
///
/// # Arguments
///
/// * `reads` - `(weight, sequence)` pairs; sequences may contain IUPAC ambiguity codes
/// * `curve` - Intensity samples for a fully present base
#[must_use]
pub fn synthesize<S: AsRef<str>>(reads: &[(f64, S)], curve: &[f64]) -> TraceData {
    let expanded: Vec<(f64, Vec<NucleotideSet>)> = reads
        .iter()
        .map(|(w, seq)| (*w, expand(seq.as_ref())))
        .collect();

    let longest_read = expanded.iter().map(|(_, ns)| ns.len()).max().unwrap_or(0);

    let [data_g, data_a, data_t, data_c] =
        CHANNEL_ORDER.map(|nuc| weighted_channel(&expanded, nuc, longest_read, curve));

    let fasta: String = (0..longest_read)
        .map(|ix| {
            expanded
                .iter()
                .filter_map(|(_, ns)| ns.get(ix).copied())
                .fold(NucleotideSet::EMPTY, NucleotideSet::union)
                .to_iupac()
        })
        .collect();

    trace!(
        "Synthesized {} bases from {} reads ({} values per base)",
        longest_read,
        reads.len(),
        curve.len()
    );

    TraceData {
        data_g,
        data_a,
        data_t,
        data_c,
        vals_per_base: curve.len(),
        fasta,
    }
}

/// Convenience wrapper around [`synthesize`] using [`DEFAULT_CURVE`]
#[must_use]
pub fn synthesize_default<S: AsRef<str>>(reads: &[(f64, S)]) -> TraceData {
    synthesize(reads, &DEFAULT_CURVE)
}

/// Builds the concatenated curve segments of one channel
fn weighted_channel(
    expanded: &[(f64, Vec<NucleotideSet>)],
    nuc: NucleotideSet,
    longest_read: usize,
    curve: &[f64],
) -> Vec<f64> {
    let mut channel = Vec::with_capacity(longest_read * curve.len());
    for ix in 0..longest_read {
        let total: f64 = expanded
            .iter()
            .map(|(w, ns)| match ns.get(ix) {
                Some(set) if set.contains(nuc) => *w,
                _ => 0.0,
            })
            .fold(0.0, |acc, w| acc + w);
        let weight = total.clamp(0.0, 1.0);
        channel.extend(curve.iter().map(|v| v * weight));
    }
    channel
}
