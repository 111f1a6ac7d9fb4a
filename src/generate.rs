//! Record assembly for one generated trace file
//!
//! Every output file carries the same fixed set of records: run metadata followed by the
//! peak locations, basecalls and four chromatogram channels derived from a [`TraceData`].

use log::debug;

use crate::{
    config::GeneratorConfig,
    error::Result,
    record::AbifData,
    trace::{synthesize, TraceData},
    writer::build_abif,
};

/// Tag numbers of the `DATA` records holding the analyzed channels, in `GATC` order
pub const CHANNEL_TAGS: [i32; 4] = [9, 10, 11, 12];

/// Base order of the channels (`FWO_`)
pub const BASE_ORDER: &str = "GATC";

#[must_use]
pub fn base_order() -> AbifData {
    AbifData::data_char("FWO_", 1, BASE_ORDER)
}

#[must_use]
pub fn lane(lane_number: i16) -> AbifData {
    AbifData::data_short("LANE", 1, &[lane_number])
}

pub fn mobility_file_name(tag: i32, file_name: &str) -> Result<AbifData> {
    AbifData::data_pstring("PDMF", tag, file_name)
}

pub fn comment(comment: &str) -> Result<AbifData> {
    AbifData::data_pstring("CMNT", 1, comment)
}

pub fn sample_name(name: &str) -> Result<AbifData> {
    AbifData::data_pstring("SMPL", 1, name)
}

/// Signal strength per dye, in `GATC` order
#[must_use]
pub fn dye_strength(strength: [i16; 4]) -> AbifData {
    AbifData::data_short("S/N%", 1, &strength)
}

/// Scan index of the peak of every called base
#[must_use]
pub fn peak_locations(tag: i32, locations: &[i16]) -> AbifData {
    AbifData::data_short("PLOC", tag, locations)
}

#[must_use]
pub fn called_bases(tag: i32, bases: &str) -> AbifData {
    AbifData::data_char("PBAS", tag, bases)
}

/// Chromatogram channel; intensities are truncated to 16 bits, saturating at the bounds
#[must_use]
pub fn chrom_data(tag: i32, intensities: &[f64]) -> AbifData {
    let values: Vec<i16> = intensities.iter().map(|&v| v as i16).collect();
    AbifData::data_short("DATA", tag, &values)
}

/// Fixed records that exercise each inline/offset layout case
#[must_use]
pub fn diagnostic_records() -> Vec<AbifData> {
    vec![
        AbifData::data_byte("dat1", 1, &[1, 2, 3, 4]),
        AbifData::data_char("dat2", 1, "ABc"),
        AbifData::data_char("dat3", 1, "ABcdef!!"),
    ]
}

/// Peak position of each base: the middle of the first curve, then one half-curve apart
///
/// Positions beyond the 16-bit range saturate at `i16::MAX`.
#[must_use]
pub fn peak_positions(num_bases: usize, vals_per_base: usize) -> Vec<i16> {
    let mid_peak = vals_per_base / 2;
    (0..num_bases)
        .map(|ix| i16::try_from(mid_peak + ix * mid_peak).unwrap_or(i16::MAX))
        .collect()
}

/// Builds the ordered record list of one output file
///
/// # Arguments
///
/// * `name` - Sample name written into `SMPL`
/// * `trace` - Synthesized chromatogram and consensus
/// * `config` - Run metadata
pub fn trace_records(
    name: &str,
    trace: &TraceData,
    config: &GeneratorConfig,
) -> Result<Vec<AbifData>> {
    let peaks = peak_positions(trace.num_bases(), trace.vals_per_base);

    let mut records = if config.diagnostics {
        diagnostic_records()
    } else {
        Vec::new()
    };
    records.extend([
        base_order(),
        lane(config.lane),
        mobility_file_name(1, &config.mobility_file)?,
        mobility_file_name(2, &config.mobility_file)?,
        comment(&config.comment)?,
        sample_name(name)?,
        dye_strength(config.dye_strength),
        peak_locations(1, &peaks),
        peak_locations(2, &peaks),
        called_bases(1, &trace.fasta),
        called_bases(2, &trace.fasta),
    ]);
    for (tag, channel) in CHANNEL_TAGS.into_iter().zip(trace.channels()) {
        records.push(chrom_data(tag, channel));
    }
    Ok(records)
}

/// Synthesizes and encodes one ABIF file using `config`
pub fn generate_with_config<S: AsRef<str>>(
    name: &str,
    reads: &[(f64, S)],
    config: &GeneratorConfig,
) -> Result<Vec<u8>> {
    let trace = synthesize(reads, &config.curve);
    let mut records = trace_records(name, &trace, config)?;
    let buffer = build_abif(&mut records)?;
    debug!(
        "Generated {name}: {} bases from {} reads, {} bytes",
        trace.num_bases(),
        reads.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Synthesizes and encodes one ABIF file with the default configuration
///
/// # Examples
///
/// ```
/// # use abifgen::{generate, Result};
/// # fn main() -> Result<()> {
/// let abif = generate("sample", &[(0.7, "ACGT"), (0.3, "ACCT")])?;
/// assert_eq!(&abif[0..4], b"ABIF");
/// # Ok(())
/// # }
/// ```
pub fn generate<S: AsRef<str>>(name: &str, reads: &[(f64, S)]) -> Result<Vec<u8>> {
    generate_with_config(name, reads, &GeneratorConfig::default())
}
