//! Symbol alphabets for sequence encoding
//!
//! An alphabet fixes the mapping between text symbols and the dense codes
//! `0..size` the feature map indexes with. Models persist their alphabet so
//! prediction-time encoding matches training-time encoding.

use crate::core::{Result, WdSvmError};
use serde::{Deserialize, Serialize};

/// Ordered set of symbols; the code of a symbol is its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: String,
}

impl Alphabet {
    /// Create an alphabet from an ordered symbol string
    pub fn new(symbols: &str) -> Result<Self> {
        let count = symbols.chars().count();
        if count < 2 {
            return Err(WdSvmError::InvalidParameter(format!(
                "alphabet needs at least 2 symbols, got {count}"
            )));
        }
        if count > u8::MAX as usize + 1 {
            return Err(WdSvmError::InvalidParameter(format!(
                "alphabet too large: {count} symbols"
            )));
        }
        for (i, a) in symbols.chars().enumerate() {
            if symbols.chars().skip(i + 1).any(|b| b == a) {
                return Err(WdSvmError::InvalidParameter(format!(
                    "duplicate symbol '{a}' in alphabet"
                )));
            }
        }
        Ok(Self {
            symbols: symbols.to_string(),
        })
    }

    /// DNA nucleotides ACGT
    pub fn dna() -> Self {
        Self {
            symbols: "ACGT".to_string(),
        }
    }

    /// RNA nucleotides ACGU
    pub fn rna() -> Self {
        Self {
            symbols: "ACGU".to_string(),
        }
    }

    /// The 20 standard amino acids
    pub fn protein() -> Self {
        Self {
            symbols: "ACDEFGHIKLMNPQRSTVWY".to_string(),
        }
    }

    /// Number of symbols
    pub fn size(&self) -> usize {
        self.symbols.chars().count()
    }

    /// Code of a symbol (case-insensitive for ASCII letters)
    pub fn code(&self, symbol: char) -> Result<u8> {
        let wanted = symbol.to_ascii_uppercase();
        self.symbols
            .chars()
            .position(|s| s.to_ascii_uppercase() == wanted)
            .map(|p| p as u8)
            .ok_or(WdSvmError::UnknownSymbol(symbol))
    }

    /// Symbol for a code, if in range
    pub fn symbol(&self, code: u8) -> Option<char> {
        self.symbols.chars().nth(code as usize)
    }

    /// Encode a text sequence into symbol codes
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        text.chars().map(|c| self.code(c)).collect()
    }

    /// Decode symbol codes back into text
    pub fn decode(&self, codes: &[u8]) -> Result<String> {
        codes
            .iter()
            .enumerate()
            .map(|(position, &code)| {
                self.symbol(code).ok_or(WdSvmError::InvalidSymbol {
                    position,
                    code,
                    alphabet_size: self.size(),
                })
            })
            .collect()
    }
}
