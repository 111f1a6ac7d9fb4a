//! # abifgen
//!
//! Synthesizes ABIF sequencer trace files (`.ab1`) from weighted FASTA, for testing
//! trace-processing tools without real instrument runs.
//!
//! The pipeline has three stages:
//!
//! 1. [`parse_wfasta`] turns weighted FASTA text into named, weighted reads.
//! 2. [`synthesize`] turns a set of weighted reads into four intensity channels and an
//!    IUPAC consensus.
//! 3. [`build_abif`] lays out a list of typed data records as a complete ABIF file.
//!
//! [`generate`] composes stages 2 and 3 for one named output, and [`generate_all`]
//! groups the reads of whole documents by name.
//!
//! ```
//! use abifgen::{generate_all, parse_wfasta, GeneratorConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let doc = parse_wfasta("demo", ">{0.7} s1\nACGT\n>{0.3} s1\nACCT\n")?;
//!     let files = generate_all(&[doc], &GeneratorConfig::default())?;
//!     assert_eq!(files.len(), 1);
//!     assert_eq!(files[0].0, "s1");
//!     assert_eq!(&files[0].1[0..4], b"ABIF");
//!     Ok(())
//! }
//! ```

mod batch;
mod config;
mod error;
mod files;
mod generate;
mod header;
mod iupac;
mod record;
mod trace;
mod utils;
mod wfasta;
mod writer;

pub use batch::{generate_all, generate_data, group_reads, DEMO_LABEL};
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use error::{BuilderError, Error, ParseError, RecordError, Result, WriteError};
pub use files::{read_wfasta_file, run_gen, source_files, ABIF_EXTENSION, FASTA_EXTENSION};
pub use generate::{
    base_order, called_bases, chrom_data, comment, diagnostic_records, dye_strength, generate,
    generate_with_config, lane, mobility_file_name, peak_locations, peak_positions, sample_name,
    trace_records, BASE_ORDER, CHANNEL_TAGS,
};
pub use header::{AbifHeader, DirEntry, MAGIC, SIZE_DIR_ENTRY, SIZE_HEADER, VERSION};
pub use iupac::{expand, NucleotideSet};
pub use record::{AbifData, DataLocation, ElementType, Payload, INLINE_LIMIT, MAX_PSTRING_LEN};
pub use trace::{synthesize, synthesize_default, TraceData, CHANNEL_ORDER, DEFAULT_CURVE};
pub use utils::{mk_i16, mk_i32, mk_i8, mk_u16, mk_u32, mk_u8, str_of_len};
pub use wfasta::{complement_read, parse_wfasta, WFasta, WeightedRead};
pub use writer::{build_abif, write_abif, write_abif_path};

#[cfg(test)]
mod testing {

    use super::*;
    use anyhow::Result;

    #[test]
    fn test_pipeline_single_read() -> Result<()> {
        let doc = parse_wfasta("nn", ">{1} only\nA\n")?;
        let reads: Vec<(f64, &str)> = doc
            .reads
            .iter()
            .map(|r| (r.weight, r.read.as_str()))
            .collect();

        let trace = synthesize(&reads, &[100.0]);
        assert_eq!(trace.data_a, vec![100.0]);
        assert_eq!(trace.fasta, "A");

        let config = GeneratorConfig::builder().curve(vec![100.0]).build()?;
        let mut records = trace_records("only", &trace, &config)?;
        let buffer = build_abif(&mut records)?;
        assert_eq!(buffer, generate_with_config("only", &reads, &config)?);

        let num_entries = records.len();
        let dir_start = buffer.len() - num_entries * SIZE_DIR_ENTRY;
        assert_eq!(&buffer[26..30], &(dir_start as u32).to_be_bytes());
        Ok(())
    }

    #[test]
    fn test_every_record_honors_its_size() -> Result<()> {
        let trace = synthesize_default(&[(0.3, "ACGTRYKMSWBDHVN"), (0.9, "TTT")]);
        let config = GeneratorConfig::builder().diagnostics(true).build()?;
        let mut records = trace_records("all", &trace, &config)?;
        for r in &records {
            assert_eq!(r.render()?.len(), r.data_size(), "{}", r.name());
        }
        build_abif(&mut records)?;
        for r in &records {
            let inline = matches!(r.location(), DataLocation::Inline(_));
            assert_eq!(inline, r.data_size() <= INLINE_LIMIT, "{}", r.name());
        }
        Ok(())
    }
}
