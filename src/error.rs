use crate::huffman::TableClass;
use thiserror::Error;

/// Errors produced while scanning a JPEG stream or building Huffman tables.
///
/// Every variant is terminal for the scan that produced it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegScanError {
    #[error("Start of image marker not found")]
    NotThisFormat,
    #[error("Unexpected end of data at offset {position}: {needed} byte(s) needed, {available} available")]
    UnexpectedEnd {
        position: usize,
        needed: usize,
        available: usize,
    },
    #[error("JPEG marker start byte not found at offset {offset} (found 0x{found:02X})")]
    SyncLost { offset: usize, found: u8 },
    #[error("Unknown JPEG marker 0xFF{code:02X} at offset {offset}")]
    UnknownMarker { offset: usize, code: u8 },
    #[error("Invalid marker segment size {length} at offset {offset}")]
    InvalidSegmentLength { offset: usize, length: u16 },
    #[error("Segment at offset {offset} declares {declared} payload byte(s) but {consumed} were consumed")]
    SegmentLengthMismatch {
        offset: usize,
        declared: usize,
        consumed: usize,
    },
    #[error("Invalid Huffman table selector: class {class}, destination {destination}")]
    InvalidTableSelector { class: u8, destination: u8 },
    #[error("Huffman code lengths overflow the code space at length {length}")]
    InvalidCodeLengths { length: u8 },
    #[error("Huffman table needs {expected} symbol(s) but only {available} are present")]
    TruncatedSymbolTable { expected: usize, available: usize },
    #[error("Huffman table defines {count} symbols, more than the 256 symbol space")]
    TooManySymbols { count: usize },
    #[error("Huffman table not defined: class {class}, destination {destination}")]
    TableNotDefined { class: TableClass, destination: u8 },
}
