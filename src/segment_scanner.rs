//! Marker-segment walk over a JPEG interchange-format stream (ISO/IEC 10918-1, Annex B).
//!
//! The scanner is an iterator of [`MarkerEvent`]s. Huffman tables found in
//! DHT segments are built as their events are produced and collected in the
//! scanner's own [`HuffmanTableStore`].

use crate::byte_cursor::ByteCursor;
use crate::constants::{
    HUFFMAN_RECORD_HEADER_SIZE, HUFFMAN_TABLE_DESTINATIONS, JPEG_MARKER_START_BYTE,
    JPEG_RESTART_MARKER_BASE, JPEG_RESTART_MARKER_RANGE, JPEG_TEMPORARY_MARKER,
    MAXIMUM_CODE_LENGTH, SEGMENT_LENGTH_SIZE, START_OF_IMAGE_BYTES, STUFFED_ZERO_BYTE,
};
use crate::error::JpegScanError;
use crate::huffman::{CodeCounts, HuffmanTable, TableClass};
use crate::huffman_table_store::HuffmanTableStore;
use crate::marker_event::{MarkerEvent, MarkerKind};
use crate::scan_options::{ScanDataPolicy, ScanOptions, UnknownMarkerPolicy};
use log::{debug, trace, warn};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentScannerState {
    ExpectStart,
    Scanning,
    Done,
}

/// Everything a complete scan produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub events: Vec<MarkerEvent>,
    pub huffman_tables: HuffmanTableStore,
    /// Position where scanning stopped: just past EOI, or the first
    /// entropy-coded byte when the scan data was handed off.
    pub end_position: usize,
    pub handed_off: bool,
}

pub struct SegmentScanner<'a> {
    cursor: ByteCursor<'a>,
    state: SegmentScannerState,
    options: ScanOptions,
    huffman_tables: HuffmanTableStore,
    in_scan_data: bool,
    handed_off: bool,
}

impl<'a> SegmentScanner<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    pub fn with_options(source: &'a [u8], options: ScanOptions) -> Self {
        Self {
            cursor: ByteCursor::new(source),
            state: SegmentScannerState::ExpectStart,
            options,
            huffman_tables: HuffmanTableStore::new(),
            in_scan_data: false,
            handed_off: false,
        }
    }

    pub fn state(&self) -> SegmentScannerState {
        self.state
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn remaining_data(&self) -> &'a [u8] {
        self.cursor.remaining_data()
    }

    /// Whether scanning stopped at the entropy-coded data of a scan.
    pub fn handed_off(&self) -> bool {
        self.handed_off
    }

    pub fn huffman_tables(&self) -> &HuffmanTableStore {
        &self.huffman_tables
    }

    pub fn into_huffman_tables(self) -> HuffmanTableStore {
        self.huffman_tables
    }

    /// Runs the scan to completion, stopping at the first error.
    pub fn scan_all(mut self) -> Result<ScanSummary, JpegScanError> {
        let mut events = Vec::new();
        for event in self.by_ref() {
            events.push(event?);
        }
        Ok(ScanSummary {
            events,
            end_position: self.cursor.position(),
            handed_off: self.handed_off,
            huffman_tables: self.huffman_tables,
        })
    }

    fn read_start_of_image(&mut self) -> Result<MarkerEvent, JpegScanError> {
        if !self.cursor.remaining_data().starts_with(&START_OF_IMAGE_BYTES) {
            return Err(JpegScanError::NotThisFormat);
        }
        let offset = self.cursor.position();
        self.cursor.advance(START_OF_IMAGE_BYTES.len())?;
        self.state = SegmentScannerState::Scanning;
        Ok(self.emit(MarkerKind::StartOfImage, offset, 0))
    }

    fn read_next_segment(&mut self) -> Result<MarkerEvent, JpegScanError> {
        if self.in_scan_data {
            self.skip_scan_data()?;
        }

        let (offset, code) = self.read_marker()?;
        if code == STUFFED_ZERO_BYTE {
            // A stuffed zero only belongs inside entropy-coded data.
            return Err(JpegScanError::SyncLost {
                offset: offset + 1,
                found: code,
            });
        }
        let kind = match MarkerKind::classify(code) {
            Some(kind) => kind,
            None => return self.skip_unknown_marker(code, offset),
        };

        match kind {
            MarkerKind::StartOfImage => {
                warn!("start of image marker repeated at offset {}", offset);
                Ok(self.emit(kind, offset, 0))
            }
            MarkerKind::EndOfImage => {
                self.state = SegmentScannerState::Done;
                Ok(self.emit(kind, offset, 0))
            }
            MarkerKind::ApplicationData(_)
            | MarkerKind::Comment
            | MarkerKind::DefineQuantizationTable
            | MarkerKind::StartOfFrame(_) => {
                let payload_length = self.skip_segment(offset)?;
                Ok(self.emit(kind, offset, payload_length))
            }
            MarkerKind::DefineHuffmanTable => {
                let payload_length = self.read_payload_length(offset)?;
                let mut payload = self.cursor.sub_cursor(payload_length)?;
                self.read_huffman_tables(&mut payload, offset, payload_length)?;
                Ok(self.emit(kind, offset, payload_length))
            }
            MarkerKind::StartOfScan => {
                let payload_length = self.skip_segment(offset)?;
                match self.options.scan_data {
                    ScanDataPolicy::HandOff => {
                        debug!(
                            "handing off entropy-coded data at offset {}",
                            self.cursor.position()
                        );
                        self.handed_off = true;
                        self.state = SegmentScannerState::Done;
                    }
                    ScanDataPolicy::Skip => self.in_scan_data = true,
                }
                Ok(self.emit(kind, offset, payload_length))
            }
            MarkerKind::Other(code) => self.skip_unknown_marker(code, offset),
        }
    }

    /// Reads `0xFF` and the marker code, returning the marker offset and code.
    fn read_marker(&mut self) -> Result<(usize, u8), JpegScanError> {
        let mut offset = self.cursor.position();
        let byte = self.cursor.read_u8()?;
        if byte != JPEG_MARKER_START_BYTE {
            return Err(JpegScanError::SyncLost {
                offset,
                found: byte,
            });
        }

        let mut code = self.cursor.read_u8()?;
        if self.options.unknown_markers == UnknownMarkerPolicy::Skip {
            // Any marker may be preceded by 0xFF fill bytes, B.1.1.2.
            while code == JPEG_MARKER_START_BYTE {
                offset = self.cursor.position() - 1;
                code = self.cursor.read_u8()?;
            }
        }
        Ok((offset, code))
    }

    /// Reads a segment length field and returns the payload size.
    fn read_payload_length(&mut self, offset: usize) -> Result<usize, JpegScanError> {
        let length = self.cursor.read_u16_be()?;
        if (length as usize) < SEGMENT_LENGTH_SIZE {
            return Err(JpegScanError::InvalidSegmentLength { offset, length });
        }
        Ok(length as usize - SEGMENT_LENGTH_SIZE)
    }

    fn skip_segment(&mut self, offset: usize) -> Result<usize, JpegScanError> {
        let payload_length = self.read_payload_length(offset)?;
        self.cursor.advance(payload_length)?;
        Ok(payload_length)
    }

    fn skip_unknown_marker(
        &mut self,
        code: u8,
        offset: usize,
    ) -> Result<MarkerEvent, JpegScanError> {
        if self.options.unknown_markers == UnknownMarkerPolicy::Reject {
            return Err(JpegScanError::UnknownMarker { offset, code });
        }

        let kind = MarkerKind::Other(code);
        let payload_length = if kind.has_length() {
            self.skip_segment(offset)?
        } else {
            0
        };
        warn!(
            "skipped unrecognized marker 0xFF{:02X} at offset {} ({} payload bytes)",
            code, offset, payload_length
        );
        Ok(self.emit(kind, offset, payload_length))
    }

    /// Parses the table records of a DHT payload, which must end exactly
    /// at the end of the last record. Tables are stored only once the whole
    /// segment has been accepted.
    fn read_huffman_tables(
        &mut self,
        payload: &mut ByteCursor<'a>,
        offset: usize,
        declared: usize,
    ) -> Result<(), JpegScanError> {
        let mut tables = Vec::new();
        loop {
            if payload.remaining() < HUFFMAN_RECORD_HEADER_SIZE {
                return Err(JpegScanError::SegmentLengthMismatch {
                    offset,
                    declared,
                    consumed: declared - payload.remaining(),
                });
            }

            let selector = payload.read_u8()?;
            let class_bits = selector >> 4;
            let destination = selector & 0x0F;
            let class = TableClass::try_from(class_bits).map_err(|_| {
                JpegScanError::InvalidTableSelector {
                    class: class_bits,
                    destination,
                }
            })?;
            if destination as usize >= HUFFMAN_TABLE_DESTINATIONS {
                return Err(JpegScanError::InvalidTableSelector {
                    class: class_bits,
                    destination,
                });
            }

            let mut counts: CodeCounts = [0; MAXIMUM_CODE_LENGTH];
            counts.copy_from_slice(payload.read_bytes(MAXIMUM_CODE_LENGTH)?);
            let expected: usize = counts.iter().map(|&count| count as usize).sum();
            // A short read is reported by the builder as a truncated symbol table.
            let symbols = payload.read_bytes(expected.min(payload.remaining()))?;

            let table = HuffmanTable::build(class, destination, &counts, symbols)?;
            trace!(
                "Huffman table {} {}: {} codes",
                class,
                destination,
                table.len()
            );
            tables.push(table);

            if payload.is_empty() {
                break;
            }
        }

        for table in tables {
            let (class, destination) = (table.class(), table.destination());
            if self.huffman_tables.put(table)?.is_some() {
                debug!("Huffman table {} {} redefined", class, destination);
            }
        }
        Ok(())
    }

    /// Skips entropy-coded bytes up to the next marker that is not part of
    /// the scan data (stuffed zeros, fill bytes and restart markers are).
    fn skip_scan_data(&mut self) -> Result<(), JpegScanError> {
        let start = self.cursor.position();
        loop {
            if self.cursor.peek()? != JPEG_MARKER_START_BYTE {
                self.cursor.advance(1)?;
                continue;
            }
            let next = self.cursor.peek_at(1)?;
            let is_restart =
                next.wrapping_sub(JPEG_RESTART_MARKER_BASE) < JPEG_RESTART_MARKER_RANGE;
            if next == STUFFED_ZERO_BYTE || next == JPEG_TEMPORARY_MARKER || is_restart {
                self.cursor.advance(2)?;
            } else if next == JPEG_MARKER_START_BYTE {
                self.cursor.advance(1)?;
            } else {
                break;
            }
        }
        trace!(
            "skipped {} bytes of entropy-coded data",
            self.cursor.position() - start
        );
        self.in_scan_data = false;
        Ok(())
    }

    fn emit(&self, kind: MarkerKind, offset: usize, payload_length: usize) -> MarkerEvent {
        debug!(
            "{} at offset {} ({} payload bytes)",
            kind, offset, payload_length
        );
        MarkerEvent {
            kind,
            offset,
            payload_length,
        }
    }
}

impl Iterator for SegmentScanner<'_> {
    type Item = Result<MarkerEvent, JpegScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.state {
            SegmentScannerState::ExpectStart => self.read_start_of_image(),
            SegmentScannerState::Scanning => self.read_next_segment(),
            SegmentScannerState::Done => return None,
        };
        if result.is_err() {
            self.state = SegmentScannerState::Done;
        }
        Some(result)
    }
}

impl FusedIterator for SegmentScanner<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(code: u8, payload: &[u8]) -> Vec<u8> {
        let length = (payload.len() + SEGMENT_LENGTH_SIZE) as u16;
        let mut bytes = vec![JPEG_MARKER_START_BYTE, code];
        bytes.extend_from_slice(&length.to_be_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    fn dht_record(selector: u8, counts: &[(usize, u8)], symbols: &[u8]) -> Vec<u8> {
        let mut record = vec![selector];
        let mut all_counts = [0u8; MAXIMUM_CODE_LENGTH];
        for &(length, count) in counts {
            all_counts[length - 1] = count;
        }
        record.extend_from_slice(&all_counts);
        record.extend_from_slice(symbols);
        record
    }

    fn stream(segments: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = START_OF_IMAGE_BYTES.to_vec();
        for segment in segments {
            bytes.extend_from_slice(segment);
        }
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }

    fn kinds(summary: &ScanSummary) -> Vec<MarkerKind> {
        summary.events.iter().map(|event| event.kind).collect()
    }

    #[test]
    fn test_not_this_format() {
        for data in [&[][..], &[0xFF][..], &[0x89, 0x50, 0x4E, 0x47][..], &[0xFF, 0xD9][..]] {
            let mut scanner = SegmentScanner::new(data);
            assert_eq!(scanner.next(), Some(Err(JpegScanError::NotThisFormat)));
            assert_eq!(scanner.next(), None);
            assert_eq!(scanner.position(), 0);
        }
    }

    #[test]
    fn test_minimal_stream() {
        let summary = SegmentScanner::new(&[0xFF, 0xD8, 0xFF, 0xD9]).scan_all().unwrap();
        assert_eq!(
            summary.events,
            vec![
                MarkerEvent {
                    kind: MarkerKind::StartOfImage,
                    offset: 0,
                    payload_length: 0
                },
                MarkerEvent {
                    kind: MarkerKind::EndOfImage,
                    offset: 2,
                    payload_length: 0
                },
            ]
        );
        assert!(summary.huffman_tables.is_empty());
        assert_eq!(summary.end_position, 4);
        assert!(!summary.handed_off);
    }

    #[test]
    fn test_length_bearing_segments_are_skipped() {
        let data = stream(&[
            segment(0xE0, b"JFIF\0\x01\x02"),
            segment(0xFE, b"hello"),
            segment(0xDB, &[0u8; 65]),
            segment(0xC0, &[8, 0, 16, 0, 16, 1, 1, 0x11, 0]),
        ]);
        let summary = SegmentScanner::new(&data).scan_all().unwrap();
        assert_eq!(
            kinds(&summary),
            vec![
                MarkerKind::StartOfImage,
                MarkerKind::ApplicationData(0),
                MarkerKind::Comment,
                MarkerKind::DefineQuantizationTable,
                MarkerKind::StartOfFrame(crate::JpegMarkerCode::StartOfFrameBaseline),
                MarkerKind::EndOfImage,
            ]
        );
        assert_eq!(summary.events[1].offset, 2);
        assert_eq!(summary.events[1].payload_length, 7);
        assert_eq!(summary.events[2].offset, 13);
        assert_eq!(summary.events[3].payload_length, 65);
    }

    #[test]
    fn test_dht_with_several_records() {
        let mut payload = dht_record(0x00, &[(2, 1)], &[0x05]);
        payload.extend(dht_record(0x11, &[(1, 2)], &[0x01, 0x02]));
        payload.extend(dht_record(0x03, &[(3, 1)], &[0x07]));
        let data = stream(&[segment(0xC4, &payload)]);

        let summary = SegmentScanner::new(&data).scan_all().unwrap();
        assert_eq!(summary.events[1].payload_length, payload.len());
        let tables = &summary.huffman_tables;
        assert_eq!(tables.len(), 3);
        assert_eq!(tables.get(TableClass::Dc, 0).unwrap().lookup(2, 0), Some(0x05));
        assert_eq!(tables.get(TableClass::Ac, 1).unwrap().lookup(1, 1), Some(0x02));
        assert_eq!(tables.get(TableClass::Dc, 3).unwrap().lookup(3, 0), Some(0x07));
        assert!(tables.get(TableClass::Ac, 0).is_err());
    }

    #[test]
    fn test_dht_redefinition_keeps_last() {
        let data = stream(&[
            segment(0xC4, &dht_record(0x00, &[(1, 1)], &[0xAA])),
            segment(0xC4, &dht_record(0x00, &[(2, 1)], &[0xBB])),
        ]);
        let summary = SegmentScanner::new(&data).scan_all().unwrap();
        let table = summary.huffman_tables.get(TableClass::Dc, 0).unwrap();
        assert_eq!(table.symbols(), &[0xBB]);
        assert_eq!(table.codes()[0].length, 2);
    }

    #[test]
    fn test_dht_trailing_bytes_mismatch() {
        let mut payload = dht_record(0x00, &[(2, 1)], &[0x05]);
        payload.push(0x00);
        let data = stream(&[segment(0xC4, &payload)]);
        let result = SegmentScanner::new(&data).scan_all();
        assert_eq!(
            result,
            Err(JpegScanError::SegmentLengthMismatch {
                offset: 2,
                declared: 19,
                consumed: 18
            })
        );
    }

    #[test]
    fn test_dht_truncated_symbols() {
        // Counts ask for three symbols; the declared length only covers one.
        let payload = dht_record(0x10, &[(2, 3)], &[0x01]);
        let data = stream(&[segment(0xC4, &payload)]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::TruncatedSymbolTable {
                expected: 3,
                available: 1
            })
        );
    }

    #[test]
    fn test_dht_invalid_selector() {
        let data = stream(&[segment(0xC4, &dht_record(0x20, &[(1, 1)], &[0]))]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::InvalidTableSelector {
                class: 2,
                destination: 0
            })
        );

        let data = stream(&[segment(0xC4, &dht_record(0x14, &[(1, 1)], &[0]))]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::InvalidTableSelector {
                class: 1,
                destination: 4
            })
        );
    }

    #[test]
    fn test_dht_overflowing_counts() {
        let data = stream(&[segment(0xC4, &dht_record(0x00, &[(1, 3)], &[1, 2, 3]))]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::InvalidCodeLengths { length: 1 })
        );
    }

    #[test]
    fn test_failed_dht_segment_stores_no_tables() {
        let mut payload = dht_record(0x00, &[(2, 1)], &[0x05]);
        payload.extend(dht_record(0x10, &[(2, 3)], &[0x01]));
        let data = stream(&[segment(0xC4, &payload)]);

        let mut scanner = SegmentScanner::new(&data);
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert_eq!(
            scanner.next(),
            Some(Err(JpegScanError::TruncatedSymbolTable {
                expected: 3,
                available: 1
            }))
        );
        assert_eq!(scanner.next(), None);
        assert!(scanner.huffman_tables().is_empty());
        assert_eq!(
            scanner.huffman_tables().get(TableClass::Dc, 0),
            Err(JpegScanError::TableNotDefined {
                class: TableClass::Dc,
                destination: 0
            })
        );
    }

    #[test]
    fn test_failed_dht_segment_keeps_earlier_segments() {
        let data = stream(&[
            segment(0xC4, &dht_record(0x00, &[(1, 1)], &[0xAA])),
            segment(0xC4, &dht_record(0x00, &[(2, 1)], &[0xBB, 0xCC])),
        ]);
        let mut scanner = SegmentScanner::new(&data);
        let results: Vec<_> = scanner.by_ref().collect();
        assert_eq!(results.len(), 3);
        assert!(results[2].is_err());
        let table = scanner.huffman_tables().get(TableClass::Dc, 0).unwrap();
        assert_eq!(table.symbols(), &[0xAA]);
    }

    #[test]
    fn test_empty_dht_payload() {
        let data = stream(&[segment(0xC4, &[])]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::SegmentLengthMismatch {
                offset: 2,
                declared: 0,
                consumed: 0
            })
        );
    }

    #[test]
    fn test_dht_too_many_symbols_before_truncation() {
        // Counts total 510 codes while only four symbol bytes follow.
        let mut counts = [0u8; MAXIMUM_CODE_LENGTH];
        counts[14] = 255;
        counts[15] = 255;
        let mut payload = vec![0x11];
        payload.extend_from_slice(&counts);
        payload.extend_from_slice(&[0x00; 4]);
        let data = stream(&[segment(0xC4, &payload)]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::TooManySymbols { count: 510 })
        );
    }

    #[test]
    fn test_repeated_start_of_image_is_reported() {
        let data = [0xFF, 0xD8, 0xFF, 0xD8, 0xFF, 0xD9];
        let summary = SegmentScanner::new(&data).scan_all().unwrap();
        assert_eq!(
            kinds(&summary),
            vec![
                MarkerKind::StartOfImage,
                MarkerKind::StartOfImage,
                MarkerKind::EndOfImage
            ]
        );
        let offsets: Vec<usize> = summary.events.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 2, 4]);
        assert_eq!(summary.end_position, 6);
    }

    #[test]
    fn test_stuffed_zero_outside_scan_data_loses_sync() {
        let data = [0xFF, 0xD8, 0xFF, 0x00, 0x00, 0x04, 0xFF, 0xD9];
        for options in [ScanOptions::new(), ScanOptions::permissive()] {
            assert_eq!(
                SegmentScanner::with_options(&data, options).scan_all(),
                Err(JpegScanError::SyncLost {
                    offset: 3,
                    found: 0x00
                })
            );
        }
    }

    #[test]
    fn test_sync_lost() {
        let data = [0xFF, 0xD8, 0x00, 0xFF, 0xD9];
        let mut scanner = SegmentScanner::new(&data);
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert_eq!(
            scanner.next(),
            Some(Err(JpegScanError::SyncLost {
                offset: 2,
                found: 0x00
            }))
        );
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_unknown_marker_rejected_by_default() {
        let data = stream(&[segment(0xDD, &[0x00, 0x10])]);
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::UnknownMarker {
                offset: 2,
                code: 0xDD
            })
        );
    }

    #[test]
    fn test_unknown_marker_skipped_when_permissive() {
        let mut data = stream(&[segment(0xDD, &[0x00, 0x10])]);
        // Fill bytes in front of EOI.
        let eoi = data.len() - 2;
        data.splice(eoi..eoi, [0xFF, 0xFF]);
        let options = ScanOptions::new().with_unknown_markers(UnknownMarkerPolicy::Skip);
        let summary = SegmentScanner::with_options(&data, options).scan_all().unwrap();
        assert_eq!(
            kinds(&summary),
            vec![
                MarkerKind::StartOfImage,
                MarkerKind::Other(0xDD),
                MarkerKind::EndOfImage
            ]
        );
        assert_eq!(summary.events[1].payload_length, 2);
        assert_eq!(summary.events[2].offset, data.len() - 2);
    }

    #[test]
    fn test_invalid_segment_length() {
        let data = [0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x01, 0xFF, 0xD9];
        assert_eq!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::InvalidSegmentLength {
                offset: 2,
                length: 1
            })
        );
    }

    #[test]
    fn test_payload_past_end() {
        let data = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10, 0x01];
        assert!(matches!(
            SegmentScanner::new(&data).scan_all(),
            Err(JpegScanError::UnexpectedEnd { position: 6, needed: 14, available: 1 })
        ));
    }

    #[test]
    fn test_hand_off_at_start_of_scan() {
        let mut data = START_OF_IMAGE_BYTES.to_vec();
        data.extend(segment(0xDA, &[1, 1, 0x00, 0, 63, 0]));
        data.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0xFF, 0xD9]);

        let mut scanner = SegmentScanner::new(&data);
        let events: Vec<_> = scanner.by_ref().collect::<Result<_, _>>().unwrap();
        assert_eq!(events.last().map(|e| e.kind), Some(MarkerKind::StartOfScan));
        assert_eq!(scanner.state(), SegmentScannerState::Done);
        assert!(scanner.handed_off());
        assert_eq!(scanner.position(), 12);
        assert_eq!(scanner.remaining_data()[0], 0x12);
    }

    #[test]
    fn test_skip_scan_data() {
        let mut data = START_OF_IMAGE_BYTES.to_vec();
        data.extend(segment(0xDA, &[1, 1, 0x00, 0, 63, 0]));
        data.extend_from_slice(&[0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56, 0xFF, 0xFF, 0xD9]);

        let options = ScanOptions::new().with_scan_data(ScanDataPolicy::Skip);
        let summary = SegmentScanner::with_options(&data, options).scan_all().unwrap();
        assert_eq!(
            kinds(&summary),
            vec![
                MarkerKind::StartOfImage,
                MarkerKind::StartOfScan,
                MarkerKind::EndOfImage
            ]
        );
        assert_eq!(summary.events[2].offset, data.len() - 2);
        assert_eq!(summary.end_position, data.len());
    }

    #[test]
    fn test_truncated_scan_data() {
        let mut data = START_OF_IMAGE_BYTES.to_vec();
        data.extend(segment(0xDA, &[1, 1, 0x00, 0, 63, 0]));
        data.extend_from_slice(&[0x12, 0x34]);

        let options = ScanOptions::new().with_scan_data(ScanDataPolicy::Skip);
        let mut scanner = SegmentScanner::with_options(&data, options);
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert!(matches!(
            scanner.next(),
            Some(Err(JpegScanError::UnexpectedEnd { .. }))
        ));
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_trailing_data_after_end_of_image() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xD9];
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let summary = SegmentScanner::new(&data).scan_all().unwrap();
        assert_eq!(summary.events.len(), 2);
        assert_eq!(summary.end_position, 4);
    }
}
