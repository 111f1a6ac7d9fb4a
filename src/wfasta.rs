//! Weighted FASTA parsing
//!
//! Weighted FASTA extends the FASTA header with an optional complement marker and an
//! optional weight:
//!
//! ```text
//! ; comments and blank lines are ignored anywhere
//! > {0.1} name1
//! ACG
//! CGD
//! >R {0.3} name2
//! AC
//! ```
//!
//! A header is `>` optionally followed by `R` (complement the read), optionally a
//! `{<float>}` weight (default 1), and then the read name. All following lines up to
//! the next header are concatenated into the read.

use log::debug;

use crate::error::{ParseError, Result};

/// A single named read with the fraction of signal it contributes
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRead {
    /// Read name, trimmed of surrounding whitespace
    pub name: String,
    /// Contribution of the read, nominally in `(0, 1]`
    pub weight: f64,
    /// Nucleotide sequence, possibly containing IUPAC ambiguity codes
    pub read: String,
    /// Whether the header carried the `R` marker
    ///
    /// The read has already been complemented when this is set.
    pub reverse: bool,
}
impl WeightedRead {
    fn empty() -> Self {
        Self {
            name: String::new(),
            weight: 0.0,
            read: String::new(),
            reverse: false,
        }
    }
}

/// All reads parsed from one weighted FASTA document, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct WFasta {
    /// Label of the document (typically the file stem)
    pub name: String,
    /// Reads in first-seen order; duplicate names are kept as separate entries
    pub reads: Vec<WeightedRead>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Expecting the first header
    Header,
    /// Accumulating sequence lines for the current read
    Read,
}

struct ParserState {
    stage: Stage,
    current: WeightedRead,
    history: Vec<WeightedRead>,
}
impl ParserState {
    fn new() -> Self {
        Self {
            stage: Stage::Header,
            current: WeightedRead::empty(),
            history: Vec::new(),
        }
    }

    fn advance(&mut self, ix: usize, raw: &str) -> Result<()> {
        let line = raw.trim_end();

        // blank lines and `;` comments are ignored in every stage
        if line.is_empty() || line.trim_start().starts_with(';') {
            return Ok(());
        }

        match self.stage {
            Stage::Header => {
                self.current = parse_header(ix, line)?;
                self.stage = Stage::Read;
            }
            Stage::Read if line.starts_with('>') => {
                let next = parse_header(ix, line)?;
                let done = std::mem::replace(&mut self.current, next);
                self.history.push(done);
            }
            Stage::Read => self.current.read.push_str(line),
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<WeightedRead> {
        if !self.current.name.is_empty() {
            self.history.push(self.current);
        }
        self.history
    }
}

/// Parses a weighted FASTA document
///
/// Lines are split on `\n` and `\r` independently, so `\r\n` produces an extra blank
/// line which is ignored.
///
/// # Arguments
///
/// * `name` - Label of the document, copied into the result
/// * `text` - The document contents
///
/// # Errors
///
/// Returns a [`ParseError`] naming the line index and content if a header is malformed.
/// There is no recovery: the first malformed header aborts the parse.
pub fn parse_wfasta(name: &str, text: &str) -> Result<WFasta> {
    let mut state = ParserState::new();
    for (ix, line) in text.split(['\n', '\r']).enumerate() {
        state.advance(ix, line)?;
    }

    let mut reads = state.finish();
    for read in reads.iter_mut().filter(|r| r.reverse) {
        read.read = complement_read(&read.read);
    }

    debug!("Parsed {} reads from {name}", reads.len());
    Ok(WFasta {
        name: name.to_string(),
        reads,
    })
}

/// Complements `A<->T` and `C<->G`, leaving every other symbol untouched
///
/// The order of the read is preserved: the `R` header marker complements but does not
/// reverse.
#[must_use]
pub fn complement_read(read: &str) -> String {
    read.chars()
        .map(|c| match c {
            'A' => 'T',
            'C' => 'G',
            'G' => 'C',
            'T' => 'A',
            other => other,
        })
        .collect()
}

/// Parses `> [R] [{weight}] name`
///
/// A braced token with nothing after it is the name itself, at the default weight.
fn parse_header(ix: usize, line: &str) -> Result<WeightedRead> {
    let body = match line.strip_prefix('>') {
        Some(body) if !body.trim().is_empty() => body.trim_start(),
        _ => {
            return Err(ParseError::InvalidHeader {
                line: ix,
                content: line.to_string(),
            }
            .into())
        }
    };

    // `>R` on its own is a read called "R" rather than an unnamed complemented read
    let (reverse, rest) = match body.strip_prefix('R') {
        Some(rest) if !rest.trim().is_empty() => (true, rest.trim_start()),
        _ => (false, body),
    };

    let (weight, name) = match rest.strip_prefix('{') {
        Some(inner) => {
            let Some((token, tail)) = inner.split_once('}') else {
                return Err(ParseError::InvalidWeight {
                    line: ix,
                    content: line.to_string(),
                    token: inner.to_string(),
                }
                .into());
            };
            if tail.trim().is_empty() {
                (1.0, rest.trim())
            } else {
                (parse_weight(ix, line, token)?, tail.trim())
            }
        }
        None => (1.0, rest.trim()),
    };

    Ok(WeightedRead {
        name: name.to_string(),
        weight,
        read: String::new(),
        reverse,
    })
}

fn parse_weight(ix: usize, line: &str, token: &str) -> Result<f64> {
    match token.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(ParseError::InvalidWeight {
            line: ix,
            content: line.to_string(),
            token: token.to_string(),
        }
        .into()),
    }
}
