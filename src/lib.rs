//! Marker-segment scanner and canonical Huffman table builder for JPEG
//! interchange-format streams (ISO/IEC 10918-1 / ITU-T T.81).
//!
//! The scanner walks an in-memory byte stream segment by segment, reports
//! every marker it recognizes as a [`MarkerEvent`] and builds the Huffman
//! tables of every DHT segment it passes. It does not decode image data.
//!
//! ```
//! use jpegscan_rs::{scan, MarkerKind, TableClass};
//!
//! let data = [
//!     0xFF, 0xD8, // SOI
//!     0xFF, 0xC4, 0x00, 0x14, 0x00, // DHT, one DC table with destination 0
//!     0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x05,
//!     0xFF, 0xD9, // EOI
//! ];
//! let summary = scan(&data)?;
//! assert_eq!(summary.events[1].kind, MarkerKind::DefineHuffmanTable);
//! let table = summary.huffman_tables.get(TableClass::Dc, 0)?;
//! assert_eq!(table.lookup(2, 0b00), Some(0x05));
//! # Ok::<(), jpegscan_rs::JpegScanError>(())
//! ```

pub mod byte_cursor;
pub mod constants;
pub mod error;
pub mod huffman;
pub mod huffman_table_store;
pub mod jpeg_marker_code;
pub mod marker_event;
pub mod scan_options;
pub mod segment_scanner;

pub use byte_cursor::ByteCursor;
pub use error::JpegScanError;
pub use huffman::{CanonicalCode, CodeCounts, HuffmanSpec, HuffmanTable, TableClass};
pub use huffman_table_store::HuffmanTableStore;
pub use jpeg_marker_code::JpegMarkerCode;
pub use marker_event::{MarkerEvent, MarkerKind};
pub use scan_options::{ScanDataPolicy, ScanOptions, UnknownMarkerPolicy};
pub use segment_scanner::{ScanSummary, SegmentScanner, SegmentScannerState};

/// Scans `data` with the default strict options.
pub fn scan(data: &[u8]) -> Result<ScanSummary, JpegScanError> {
    SegmentScanner::new(data).scan_all()
}

pub fn scan_with_options(data: &[u8], options: ScanOptions) -> Result<ScanSummary, JpegScanError> {
    SegmentScanner::with_options(data, options).scan_all()
}
