//! Fixed-length labeled sequence dataset
//!
//! Supports loading datasets from plain text files with one example per
//! line: a label followed by a sequence.
//!
//! Example:
//! +1 ACGTACGT
//! -1 TTGACCGA
//!
//! All sequences must have identical length; this is validated at
//! construction, before any training state exists.

use crate::core::{Result, SequenceDataset, WdSvmError};
use crate::data::alphabet::Alphabet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// N equal-length encoded sequences stored contiguously, with labels
#[derive(Debug, Clone)]
pub struct StringDataset {
    data: Vec<u8>,
    seq_len: usize,
    labels: Vec<f64>,
    alphabet: Alphabet,
}

impl StringDataset {
    /// Build a dataset from already-encoded sequences
    pub fn from_encoded(
        sequences: Vec<Vec<u8>>,
        labels: Vec<f64>,
        alphabet: Alphabet,
    ) -> Result<Self> {
        if sequences.is_empty() {
            return Err(WdSvmError::EmptyDataset);
        }
        if labels.len() != sequences.len() {
            return Err(WdSvmError::DimensionMismatch {
                expected: sequences.len(),
                actual: labels.len(),
            });
        }

        let seq_len = sequences[0].len();
        if seq_len == 0 {
            return Err(WdSvmError::InvalidParameter(
                "sequences must be non-empty".to_string(),
            ));
        }
        for seq in &sequences {
            if seq.len() != seq_len {
                return Err(WdSvmError::SequenceLengthMismatch {
                    expected: seq_len,
                    actual: seq.len(),
                });
            }
            for (position, &code) in seq.iter().enumerate() {
                if code as usize >= alphabet.size() {
                    return Err(WdSvmError::InvalidSymbol {
                        position,
                        code,
                        alphabet_size: alphabet.size(),
                    });
                }
            }
        }
        for &label in &labels {
            if label != 1.0 && label != -1.0 {
                return Err(WdSvmError::InvalidLabel(label));
            }
        }

        let mut data = Vec::with_capacity(sequences.len() * seq_len);
        for seq in &sequences {
            data.extend_from_slice(seq);
        }

        Ok(Self {
            data,
            seq_len,
            labels,
            alphabet,
        })
    }

    /// Build a dataset from text sequences with labels
    pub fn from_strings(entries: &[(&str, f64)], alphabet: &Alphabet) -> Result<Self> {
        let mut sequences = Vec::with_capacity(entries.len());
        let mut labels = Vec::with_capacity(entries.len());
        for &(text, label) in entries {
            sequences.push(alphabet.encode(text)?);
            labels.push(label);
        }
        Self::from_encoded(sequences, labels, alphabet.clone())
    }

    /// Load a dataset from a `label sequence` text file
    pub fn from_file<P: AsRef<Path>>(path: P, alphabet: &Alphabet) -> Result<Self> {
        let file = File::open(path).map_err(WdSvmError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, alphabet)
    }

    /// Load a dataset from a reader (for testing and flexibility)
    pub fn from_reader<R: BufRead>(reader: R, alphabet: &Alphabet) -> Result<Self> {
        let mut sequences = Vec::new();
        let mut labels = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(WdSvmError::IoError)?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line, alphabet) {
                Ok((sequence, label)) => {
                    sequences.push(sequence);
                    labels.push(label);
                }
                Err(e) => {
                    return Err(WdSvmError::ParseError(format!(
                        "Error parsing line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }

        if sequences.is_empty() {
            return Err(WdSvmError::EmptyDataset);
        }

        Self::from_encoded(sequences, labels, alphabet.clone())
    }

    /// Parse a single `label sequence` line
    fn parse_line(line: &str, alphabet: &Alphabet) -> Result<(Vec<u8>, f64)> {
        let mut parts = line.split_whitespace();

        let label_str = parts
            .next()
            .ok_or_else(|| WdSvmError::ParseError("Empty line".to_string()))?;
        let label = label_str
            .parse::<f64>()
            .map_err(|_| WdSvmError::ParseError(format!("Invalid label: {label_str}")))?;
        // Normalize any nonzero numeric label onto {+1, -1}
        let label = if label > 0.0 { 1.0 } else { -1.0 };

        let sequence_str = parts
            .next()
            .ok_or_else(|| WdSvmError::ParseError("Missing sequence".to_string()))?;
        if parts.next().is_some() {
            return Err(WdSvmError::ParseError(format!(
                "Trailing content after sequence: {line}"
            )));
        }

        let sequence = alphabet.encode(sequence_str)?;
        Ok((sequence, label))
    }

    /// The alphabet sequences are encoded with
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl SequenceDataset for StringDataset {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn seq_len(&self) -> usize {
        self.seq_len
    }

    fn alphabet_size(&self) -> usize {
        self.alphabet.size()
    }

    fn sequence(&self, i: usize) -> &[u8] {
        &self.data[i * self.seq_len..(i + 1) * self.seq_len]
    }

    fn get_labels(&self) -> Vec<f64> {
        self.labels.clone()
    }
}
