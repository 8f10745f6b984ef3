use crate::constants::SEGMENT_LENGTH_SIZE;
use crate::jpeg_marker_code::JpegMarkerCode;
use std::fmt;

/// Classification of a marker encountered while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    StartOfImage,
    EndOfImage,
    /// APPn, with n in 0..=15.
    ApplicationData(u8),
    Comment,
    DefineQuantizationTable,
    /// Any SOFn frame header, identified by its marker code.
    StartOfFrame(JpegMarkerCode),
    DefineHuffmanTable,
    StartOfScan,
    /// A marker outside the recognized set, only reported when unknown
    /// markers are skipped instead of rejected.
    Other(u8),
}

impl MarkerKind {
    /// Classifies a marker code; `None` for codes outside the recognized set.
    pub fn classify(code: u8) -> Option<MarkerKind> {
        let marker = JpegMarkerCode::try_from(code).ok()?;
        if let Some(id) = marker.application_data_id() {
            return Some(MarkerKind::ApplicationData(id));
        }
        if marker.is_start_of_frame() {
            return Some(MarkerKind::StartOfFrame(marker));
        }
        match marker {
            JpegMarkerCode::StartOfImage => Some(MarkerKind::StartOfImage),
            JpegMarkerCode::EndOfImage => Some(MarkerKind::EndOfImage),
            JpegMarkerCode::Comment => Some(MarkerKind::Comment),
            JpegMarkerCode::DefineQuantizationTable => Some(MarkerKind::DefineQuantizationTable),
            JpegMarkerCode::DefineHuffmanTable => Some(MarkerKind::DefineHuffmanTable),
            JpegMarkerCode::StartOfScan => Some(MarkerKind::StartOfScan),
            _ => None,
        }
    }

    /// The marker code byte that follows 0xFF.
    pub fn code(self) -> u8 {
        match self {
            MarkerKind::StartOfImage => JpegMarkerCode::StartOfImage.into(),
            MarkerKind::EndOfImage => JpegMarkerCode::EndOfImage.into(),
            MarkerKind::ApplicationData(id) => u8::from(JpegMarkerCode::ApplicationData0) + id,
            MarkerKind::Comment => JpegMarkerCode::Comment.into(),
            MarkerKind::DefineQuantizationTable => JpegMarkerCode::DefineQuantizationTable.into(),
            MarkerKind::StartOfFrame(marker) => marker.into(),
            MarkerKind::DefineHuffmanTable => JpegMarkerCode::DefineHuffmanTable.into(),
            MarkerKind::StartOfScan => JpegMarkerCode::StartOfScan.into(),
            MarkerKind::Other(code) => code,
        }
    }

    pub fn has_length(self) -> bool {
        match self {
            MarkerKind::StartOfImage | MarkerKind::EndOfImage => false,
            MarkerKind::Other(code) => JpegMarkerCode::try_from(code)
                .map(|marker| !marker.is_standalone())
                .unwrap_or(true),
            _ => true,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match JpegMarkerCode::try_from(self.code()) {
            Ok(marker) => f.pad(marker.mnemonic()),
            Err(_) => f.pad(&format!("0xFF{:02X}", self.code())),
        }
    }
}

/// One marker segment observed in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerEvent {
    pub kind: MarkerKind,
    /// Offset of the 0xFF byte that starts the marker.
    pub offset: usize,
    /// Payload size in bytes, excluding the marker and the length field.
    pub payload_length: usize,
}

impl MarkerEvent {
    /// Offset of the first payload byte, if the marker has a length field.
    pub fn payload_offset(&self) -> Option<usize> {
        self.kind
            .has_length()
            .then_some(self.offset + 2 + SEGMENT_LENGTH_SIZE)
    }

    /// Offset just past this segment.
    pub fn end_offset(&self) -> usize {
        match self.payload_offset() {
            Some(start) => start + self.payload_length,
            None => self.offset + 2,
        }
    }
}

impl fmt::Display for MarkerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.has_length() {
            write!(
                f,
                "{:#010x} {:<5} length={}",
                self.offset, self.kind, self.payload_length
            )
        } else {
            write!(f, "{:#010x} {}", self.offset, self.kind)
        }
    }
}
