//! Canonical Huffman table construction for JPEG (ISO/IEC 10918-1, Annex C).
//!
//! A Define-Huffman-Table record only transmits how many codes exist for
//! each length from 1 to 16 bits plus the symbols in code order. The codes
//! themselves follow from those counts: they are assigned as consecutive
//! integers within a length, and the running value is shifted left by one
//! bit when moving to the next length.

use crate::constants::{MAXIMUM_CODE_LENGTH, MAXIMUM_SYMBOL_COUNT};
use crate::error::JpegScanError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// Huffman table class (the Tc field of a DHT record).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u8)]
pub enum TableClass {
    /// DC coefficients, or lossless process differences.
    Dc = 0,
    /// AC coefficients.
    Ac = 1,
}

impl fmt::Display for TableClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableClass::Dc => write!(f, "DC"),
            TableClass::Ac => write!(f, "AC"),
        }
    }
}

/// Number of codes of each length 1..=16.
pub type CodeCounts = [u8; MAXIMUM_CODE_LENGTH];

/// Standard luminance DC table lengths (Table K.3).
pub const STD_LUMINANCE_DC_COUNTS: CodeCounts = [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];

/// Standard chrominance DC table lengths (Table K.4).
pub const STD_CHROMINANCE_DC_COUNTS: CodeCounts = [0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0];

/// Symbols shared by both standard DC tables.
pub const STD_DC_SYMBOLS: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Standard luminance AC table lengths (Table K.5).
pub const STD_LUMINANCE_AC_COUNTS: CodeCounts =
    [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 125];

#[rustfmt::skip]
pub const STD_LUMINANCE_AC_SYMBOLS: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12,
    0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
    0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xa1, 0x08,
    0x23, 0x42, 0xb1, 0xc1, 0x15, 0x52, 0xd1, 0xf0,
    0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0a, 0x16,
    0x17, 0x18, 0x19, 0x1a, 0x25, 0x26, 0x27, 0x28,
    0x29, 0x2a, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39,
    0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
    0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59,
    0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79,
    0x7a, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
    0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98,
    0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7,
    0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6,
    0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5,
    0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4,
    0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda, 0xe1, 0xe2,
    0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea,
    0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8,
    0xf9, 0xfa,
];

/// Standard chrominance AC table lengths (Table K.6).
pub const STD_CHROMINANCE_AC_COUNTS: CodeCounts =
    [0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 119];

#[rustfmt::skip]
pub const STD_CHROMINANCE_AC_SYMBOLS: [u8; 162] = [
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21,
    0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71,
    0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91,
    0xa1, 0xb1, 0xc1, 0x09, 0x23, 0x33, 0x52, 0xf0,
    0x15, 0x62, 0x72, 0xd1, 0x0a, 0x16, 0x24, 0x34,
    0xe1, 0x25, 0xf1, 0x17, 0x18, 0x19, 0x1a, 0x26,
    0x27, 0x28, 0x29, 0x2a, 0x35, 0x36, 0x37, 0x38,
    0x39, 0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
    0x49, 0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58,
    0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    0x69, 0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78,
    0x79, 0x7a, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87,
    0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96,
    0x97, 0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5,
    0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4,
    0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3,
    0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2,
    0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda,
    0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9,
    0xea, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8,
    0xf9, 0xfa,
];

/// One code of a canonical Huffman table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalCode {
    /// Code length in bits, 1..=16.
    pub length: u8,
    /// Code value, right-aligned in `length` bits.
    pub code: u16,
    pub symbol: u8,
}

impl CanonicalCode {
    /// Whether `self` is a bit-prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &CanonicalCode) -> bool {
        self.length <= other.length && other.code >> (other.length - self.length) == self.code
    }
}

/// The raw content of one table record in a DHT segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanSpec {
    pub class: TableClass,
    pub destination: u8,
    pub counts: CodeCounts,
    pub symbols: Vec<u8>,
}

impl HuffmanSpec {
    pub fn new(class: TableClass, destination: u8, counts: CodeCounts, symbols: Vec<u8>) -> Self {
        Self {
            class,
            destination,
            counts,
            symbols,
        }
    }

    /// Encodes `(symbol, length)` pairs into counts and symbols in code order.
    ///
    /// Symbols of equal length keep the order in which they were given.
    pub fn from_code_lengths(
        class: TableClass,
        destination: u8,
        code_lengths: &[(u8, u8)],
    ) -> Result<Self, JpegScanError> {
        if code_lengths.len() > MAXIMUM_SYMBOL_COUNT {
            return Err(JpegScanError::TooManySymbols {
                count: code_lengths.len(),
            });
        }

        let mut counts = [0u8; MAXIMUM_CODE_LENGTH];
        for &(_, length) in code_lengths {
            if length == 0 || length as usize > MAXIMUM_CODE_LENGTH {
                return Err(JpegScanError::InvalidCodeLengths { length });
            }
            let slot = &mut counts[length as usize - 1];
            *slot = slot
                .checked_add(1)
                .ok_or(JpegScanError::InvalidCodeLengths { length })?;
        }

        let mut ordered: Vec<(u8, u8)> = code_lengths.to_vec();
        ordered.sort_by_key(|&(_, length)| length);
        let symbols = ordered.into_iter().map(|(symbol, _)| symbol).collect();

        Ok(Self::new(class, destination, counts, symbols))
    }

    pub fn standard_luminance_dc() -> Self {
        Self::new(TableClass::Dc, 0, STD_LUMINANCE_DC_COUNTS, STD_DC_SYMBOLS.to_vec())
    }

    pub fn standard_chrominance_dc() -> Self {
        Self::new(TableClass::Dc, 1, STD_CHROMINANCE_DC_COUNTS, STD_DC_SYMBOLS.to_vec())
    }

    pub fn standard_luminance_ac() -> Self {
        Self::new(
            TableClass::Ac,
            0,
            STD_LUMINANCE_AC_COUNTS,
            STD_LUMINANCE_AC_SYMBOLS.to_vec(),
        )
    }

    pub fn standard_chrominance_ac() -> Self {
        Self::new(
            TableClass::Ac,
            1,
            STD_CHROMINANCE_AC_COUNTS,
            STD_CHROMINANCE_AC_SYMBOLS.to_vec(),
        )
    }

    /// Total number of codes the counts describe.
    pub fn symbol_count(&self) -> usize {
        total_count(&self.counts)
    }

    pub fn build(&self) -> Result<HuffmanTable, JpegScanError> {
        HuffmanTable::build(self.class, self.destination, &self.counts, &self.symbols)
    }
}

fn total_count(counts: &CodeCounts) -> usize {
    counts.iter().map(|&count| count as usize).sum()
}

/// A canonical Huffman table keyed by class and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    class: TableClass,
    destination: u8,
    counts: CodeCounts,
    symbols: Vec<u8>,
    codes: Vec<CanonicalCode>,

    // Decoding helpers per code length, ISO/IEC 10918-1, F.2.2.3.
    min_code: [i32; MAXIMUM_CODE_LENGTH],
    max_code: [i32; MAXIMUM_CODE_LENGTH],
    val_ptr: [i32; MAXIMUM_CODE_LENGTH],
}

impl HuffmanTable {
    /// Builds the canonical code table for `counts` and `symbols`.
    ///
    /// Symbols beyond the total of `counts` are ignored.
    pub fn build(
        class: TableClass,
        destination: u8,
        counts: &CodeCounts,
        symbols: &[u8],
    ) -> Result<Self, JpegScanError> {
        let expected = total_count(counts);
        if expected > MAXIMUM_SYMBOL_COUNT {
            return Err(JpegScanError::TooManySymbols { count: expected });
        }
        if expected > symbols.len() {
            return Err(JpegScanError::TruncatedSymbolTable {
                expected,
                available: symbols.len(),
            });
        }

        let mut table = Self {
            class,
            destination,
            counts: *counts,
            symbols: symbols[..expected].to_vec(),
            codes: Vec::with_capacity(expected),
            min_code: [0; MAXIMUM_CODE_LENGTH],
            max_code: [-1; MAXIMUM_CODE_LENGTH],
            val_ptr: [0; MAXIMUM_CODE_LENGTH],
        };

        let mut code = 0u32;
        let mut symbol_index = 0usize;

        for (i, &count) in counts.iter().enumerate() {
            let length = (i + 1) as u8;
            let count = count as usize;
            if count > 0 {
                // The last code at this length must still fit in `length` bits.
                if code + count as u32 > 1u32 << length {
                    return Err(JpegScanError::InvalidCodeLengths { length });
                }

                table.val_ptr[i] = symbol_index as i32;
                table.min_code[i] = code as i32;
                for &symbol in &symbols[symbol_index..symbol_index + count] {
                    table.codes.push(CanonicalCode {
                        length,
                        code: code as u16,
                        symbol,
                    });
                    code += 1;
                }
                symbol_index += count;
                table.max_code[i] = code as i32 - 1;
            }
            code <<= 1;
        }

        Ok(table)
    }

    pub fn class(&self) -> TableClass {
        self.class
    }

    pub fn destination(&self) -> u8 {
        self.destination
    }

    pub fn counts(&self) -> &CodeCounts {
        &self.counts
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Codes in canonical order: by length, then by code value.
    pub fn codes(&self) -> &[CanonicalCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalCode> {
        self.codes.iter()
    }

    /// Resolves a `length`-bit code to its symbol.
    pub fn lookup(&self, length: u8, code: u16) -> Option<u8> {
        if length == 0 || length as usize > MAXIMUM_CODE_LENGTH {
            return None;
        }
        let i = length as usize - 1;
        let code = code as i32;
        if self.max_code[i] < 0 || code < self.min_code[i] || code > self.max_code[i] {
            return None;
        }
        let index = self.val_ptr[i] + (code - self.min_code[i]);
        self.symbols.get(index as usize).copied()
    }

    pub fn code_for_symbol(&self, symbol: u8) -> Option<CanonicalCode> {
        self.codes.iter().find(|code| code.symbol == symbol).copied()
    }

    /// The record this table can be serialized back to.
    pub fn to_spec(&self) -> HuffmanSpec {
        HuffmanSpec::new(self.class, self.destination, self.counts, self.symbols.clone())
    }
}

impl<'a> IntoIterator for &'a HuffmanTable {
    type Item = &'a CanonicalCode;
    type IntoIter = std::slice::Iter<'a, CanonicalCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
