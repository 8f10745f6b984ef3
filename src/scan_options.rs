/// What the scanner does with markers outside the recognized set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownMarkerPolicy {
    /// Fail with `UnknownMarker`.
    #[default]
    Reject,
    /// Skip the marker (and its payload, when it has a length field) and
    /// report it as `MarkerKind::Other`. Fill bytes before markers are
    /// tolerated as well.
    Skip,
}

/// What the scanner does after the header of a start-of-scan segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanDataPolicy {
    /// Stop at the first entropy-coded byte so the caller can take over.
    #[default]
    HandOff,
    /// Skip entropy-coded data up to the next marker and keep scanning.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    pub unknown_markers: UnknownMarkerPolicy,
    pub scan_data: ScanDataPolicy,
}

impl ScanOptions {
    /// Strict scanning that stops at the first scan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient scanning that walks the whole stream up to EOI.
    pub fn permissive() -> Self {
        Self {
            unknown_markers: UnknownMarkerPolicy::Skip,
            scan_data: ScanDataPolicy::Skip,
        }
    }

    pub fn with_unknown_markers(mut self, policy: UnknownMarkerPolicy) -> Self {
        self.unknown_markers = policy;
        self
    }

    pub fn with_scan_data(mut self, policy: ScanDataPolicy) -> Self {
        self.scan_data = policy;
        self
    }
}
