//! Generation across whole documents
//!
//! Reads sharing a name contribute to the same output file, even when they come from
//! different documents. Output files are produced in first-seen name order.

use indexmap::IndexMap;
use log::info;

use crate::{
    config::GeneratorConfig,
    error::Result,
    generate::generate_with_config,
    wfasta::{parse_wfasta, WFasta, WeightedRead},
};

/// Label given to a document passed in as raw text
pub const DEMO_LABEL: &str = "demo";

/// Groups all reads of all documents by read name, in first-seen order
#[must_use]
pub fn group_reads(docs: &[WFasta]) -> IndexMap<String, Vec<WeightedRead>> {
    let mut groups: IndexMap<String, Vec<WeightedRead>> = IndexMap::new();
    for read in docs.iter().flat_map(|doc| doc.reads.iter()) {
        groups
            .entry(read.name.clone())
            .or_default()
            .push(read.clone());
    }
    groups
}

/// Generates one ABIF buffer per distinct read name
///
/// Returns `(name, buffer)` pairs in first-seen name order. Nothing is returned if any
/// single file fails.
pub fn generate_all(docs: &[WFasta], config: &GeneratorConfig) -> Result<Vec<(String, Vec<u8>)>> {
    group_reads(docs)
        .into_iter()
        .map(|(name, reads)| {
            let weighted: Vec<(f64, &str)> =
                reads.iter().map(|r| (r.weight, r.read.as_str())).collect();
            let buffer = generate_with_config(&name, &weighted, config)?;
            info!("{name}: {} reads, {} bytes", reads.len(), buffer.len());
            Ok((name, buffer))
        })
        .collect()
}

/// Parses a single in-memory document and generates one buffer per read name
pub fn generate_data(text: &str, config: &GeneratorConfig) -> Result<Vec<(String, Vec<u8>)>> {
    let doc = parse_wfasta(DEMO_LABEL, text)?;
    generate_all(&[doc], config)
}
