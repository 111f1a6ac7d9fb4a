//! Filesystem front end
//!
//! Discovers weighted FASTA inputs, parses them and writes one `<name>.ab1` per read name.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::Context;
use indexmap::IndexSet;
use log::{debug, info, warn};
use memmap2::Mmap;

use crate::{
    batch::generate_all,
    config::GeneratorConfig,
    error::Result,
    wfasta::{parse_wfasta, WFasta},
};

/// Extension of weighted FASTA inputs picked up from a directory
pub const FASTA_EXTENSION: &str = "fasta";

/// Extension of generated trace files
pub const ABIF_EXTENSION: &str = "ab1";

/// Lists the inputs named by `src`
///
/// A file is taken as is. A directory contributes all of its `*.fasta` entries
/// (not recursive), sorted by path.
pub fn source_files<P: AsRef<Path>>(src: P) -> Result<Vec<PathBuf>> {
    let src = src.as_ref();
    let meta = fs::metadata(src).with_context(|| format!("Cannot access {}", src.display()))?;
    if !meta.is_dir() {
        return Ok(vec![src.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(src)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == FASTA_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    debug!("Found {} inputs in {}", files.len(), src.display());
    Ok(files)
}

/// Reads and parses one weighted FASTA file, labelled by its file stem
pub fn read_wfasta_file<P: AsRef<Path>>(path: P) -> Result<WFasta> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

    // SAFETY: inputs must not be modified or truncated while they are being parsed
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_wfasta(&label, text)
}

/// Generates one trace file per read name found under `src` and writes them into `dest`
///
/// All files are built in memory first; nothing is written if any input fails to
/// parse or any output fails to build. Returns the paths written.
pub fn run_gen<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dest: Q,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>> {
    let docs = source_files(src)?
        .iter()
        .map(read_wfasta_file)
        .collect::<Result<Vec<_>>>()?;

    let outputs = generate_all(&docs, config)?;

    let stems = output_stems(outputs.iter().map(|(name, _)| name.as_str()));

    let dest = dest.as_ref();
    fs::create_dir_all(dest)?;
    let mut written = Vec::with_capacity(outputs.len());
    for (stem, (_, buffer)) in stems.iter().zip(&outputs) {
        let path = dest.join(format!("{stem}.{ABIF_EXTENSION}"));
        fs::write(&path, buffer).with_context(|| format!("Cannot write {}", path.display()))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// File stems for the given read names, one distinct stem per name
///
/// `/` and `\` become `_`. A stem already taken gets the first free `_<n>` suffix,
/// counting from 2.
fn output_stems<'a, I: IntoIterator<Item = &'a str>>(names: I) -> IndexSet<String> {
    let mut stems = IndexSet::new();
    for name in names {
        // read names are free text; keep them inside `dest`
        let base = name.replace(['/', '\\'], "_");
        let mut stem = base.clone();
        let mut n = 2;
        while stems.contains(&stem) {
            stem = format!("{base}_{n}");
            n += 1;
        }
        if stem != base {
            warn!("{name}: {base}.{ABIF_EXTENSION} is taken, writing {stem}.{ABIF_EXTENSION}");
        }
        stems.insert(stem);
    }
    stems
}
