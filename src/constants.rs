pub const JPEG_MARKER_START_BYTE: u8 = 0xFF;

// The two bytes every interchange-format stream starts with (SOI).
pub const START_OF_IMAGE_BYTES: [u8; 2] = [0xFF, 0xD8];

// The size in bytes of the segment length field. The length includes itself.
pub const SEGMENT_LENGTH_SIZE: usize = 2;

// Standalone markers that may appear inside entropy-coded data, ISO/IEC 10918-1, B.1.1.3.
pub const JPEG_RESTART_MARKER_BASE: u8 = 0xD0;
pub const JPEG_RESTART_MARKER_RANGE: u8 = 8;
pub const JPEG_TEMPORARY_MARKER: u8 = 0x01;

// A 0xFF inside entropy-coded data is followed by a stuffed zero byte.
pub const STUFFED_ZERO_BYTE: u8 = 0x00;

// Huffman code lengths run from 1 to 16 bits, ISO/IEC 10918-1, B.2.4.2.
pub const MAXIMUM_CODE_LENGTH: usize = 16;

// One symbol byte per code.
pub const MAXIMUM_SYMBOL_COUNT: usize = 256;

// Table destinations 0..=3 for each of the two table classes.
pub const HUFFMAN_TABLE_DESTINATIONS: usize = 4;
pub const HUFFMAN_TABLE_CLASSES: usize = 2;

// Size of the Tc/Th byte plus the 16 counts that open every DHT record.
pub const HUFFMAN_RECORD_HEADER_SIZE: usize = 1 + MAXIMUM_CODE_LENGTH;
