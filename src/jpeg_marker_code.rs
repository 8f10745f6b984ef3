use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Marker codes of ISO/IEC 10918-1, Table B.1 (the byte following 0xFF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum JpegMarkerCode {
    /// SOF0: Baseline DCT.
    StartOfFrameBaseline = 0xC0,
    /// SOF1: Extended sequential DCT, Huffman coding.
    StartOfFrameExtendedSequential = 0xC1,
    /// SOF2: Progressive DCT, Huffman coding.
    StartOfFrameProgressive = 0xC2,
    /// SOF3: Lossless (sequential), Huffman coding.
    StartOfFrameLossless = 0xC3,

    /// DHT: Defines one or more Huffman tables.
    DefineHuffmanTable = 0xC4,

    /// SOF5: Differential sequential DCT, Huffman coding.
    StartOfFrameDifferentialSequential = 0xC5,
    /// SOF6: Differential progressive DCT, Huffman coding.
    StartOfFrameDifferentialProgressive = 0xC6,
    /// SOF7: Differential lossless, Huffman coding.
    StartOfFrameDifferentialLossless = 0xC7,

    /// JPG: Reserved for JPEG extensions.
    JpegExtension = 0xC8,

    /// SOF9: Extended sequential DCT, arithmetic coding.
    StartOfFrameExtendedSequentialArithmetic = 0xC9,
    /// SOF10: Progressive DCT, arithmetic coding.
    StartOfFrameProgressiveArithmetic = 0xCA,
    /// SOF11: Lossless (sequential), arithmetic coding.
    StartOfFrameLosslessArithmetic = 0xCB,

    /// DAC: Defines arithmetic coding conditioning.
    DefineArithmeticCoding = 0xCC,

    /// SOF13: Differential sequential DCT, arithmetic coding.
    StartOfFrameDifferentialSequentialArithmetic = 0xCD,
    /// SOF14: Differential progressive DCT, arithmetic coding.
    StartOfFrameDifferentialProgressiveArithmetic = 0xCE,
    /// SOF15: Differential lossless, arithmetic coding.
    StartOfFrameDifferentialLosslessArithmetic = 0xCF,

    /// RST0..RST7: Restart markers inside entropy-coded data.
    Restart0 = 0xD0,
    Restart1 = 0xD1,
    Restart2 = 0xD2,
    Restart3 = 0xD3,
    Restart4 = 0xD4,
    Restart5 = 0xD5,
    Restart6 = 0xD6,
    Restart7 = 0xD7,

    /// SOI: Marks the start of an image.
    StartOfImage = 0xD8,
    /// EOI: Marks the end of an image.
    EndOfImage = 0xD9,
    /// SOS: Marks the start of scan.
    StartOfScan = 0xDA,
    /// DQT: Defines one or more quantization tables.
    DefineQuantizationTable = 0xDB,
    /// DNL: Defines the number of lines in a scan.
    DefineNumberOfLines = 0xDC,
    /// DRI: Defines the restart interval used in succeeding scans.
    DefineRestartInterval = 0xDD,
    /// DHP: Defines hierarchical progression.
    DefineHierarchicalProgression = 0xDE,
    /// EXP: Expands reference components.
    ExpandReferenceComponents = 0xDF,

    /// APP0: Application data 0: used for JFIF header.
    ApplicationData0 = 0xE0,
    /// APP1: Application data 1: used for EXIF or XMP header.
    ApplicationData1 = 0xE1,
    /// APP2: Application data 2: used for ICC profile.
    ApplicationData2 = 0xE2,
    ApplicationData3 = 0xE3,
    ApplicationData4 = 0xE4,
    ApplicationData5 = 0xE5,
    ApplicationData6 = 0xE6,
    ApplicationData7 = 0xE7,
    ApplicationData8 = 0xE8,
    ApplicationData9 = 0xE9,
    ApplicationData10 = 0xEA,
    ApplicationData11 = 0xEB,
    ApplicationData12 = 0xEC,
    ApplicationData13 = 0xED,
    /// APP14: Application data 14: used by Adobe.
    ApplicationData14 = 0xEE,
    ApplicationData15 = 0xEF,

    /// COM: Comment block.
    Comment = 0xFE,

    /// TEM: Temporary private use in arithmetic coding.
    Temporary = 0x01,
}

impl JpegMarkerCode {
    /// Markers that carry no length field and no payload.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            Self::StartOfImage
                | Self::EndOfImage
                | Self::Temporary
                | Self::Restart0
                | Self::Restart1
                | Self::Restart2
                | Self::Restart3
                | Self::Restart4
                | Self::Restart5
                | Self::Restart6
                | Self::Restart7
        )
    }

    pub fn is_start_of_frame(self) -> bool {
        let code = u8::from(self);
        (0xC0..=0xCF).contains(&code) && !matches!(code, 0xC4 | 0xC8 | 0xCC)
    }

    /// The `n` of APPn, for application data markers.
    pub fn application_data_id(self) -> Option<u8> {
        let code = u8::from(self);
        (0xE0..=0xEF).contains(&code).then(|| code - 0xE0)
    }

    /// Short mnemonic as used in ISO/IEC 10918-1, Table B.1.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::StartOfFrameBaseline => "SOF0",
            Self::StartOfFrameExtendedSequential => "SOF1",
            Self::StartOfFrameProgressive => "SOF2",
            Self::StartOfFrameLossless => "SOF3",
            Self::DefineHuffmanTable => "DHT",
            Self::StartOfFrameDifferentialSequential => "SOF5",
            Self::StartOfFrameDifferentialProgressive => "SOF6",
            Self::StartOfFrameDifferentialLossless => "SOF7",
            Self::JpegExtension => "JPG",
            Self::StartOfFrameExtendedSequentialArithmetic => "SOF9",
            Self::StartOfFrameProgressiveArithmetic => "SOF10",
            Self::StartOfFrameLosslessArithmetic => "SOF11",
            Self::DefineArithmeticCoding => "DAC",
            Self::StartOfFrameDifferentialSequentialArithmetic => "SOF13",
            Self::StartOfFrameDifferentialProgressiveArithmetic => "SOF14",
            Self::StartOfFrameDifferentialLosslessArithmetic => "SOF15",
            Self::Restart0 => "RST0",
            Self::Restart1 => "RST1",
            Self::Restart2 => "RST2",
            Self::Restart3 => "RST3",
            Self::Restart4 => "RST4",
            Self::Restart5 => "RST5",
            Self::Restart6 => "RST6",
            Self::Restart7 => "RST7",
            Self::StartOfImage => "SOI",
            Self::EndOfImage => "EOI",
            Self::StartOfScan => "SOS",
            Self::DefineQuantizationTable => "DQT",
            Self::DefineNumberOfLines => "DNL",
            Self::DefineRestartInterval => "DRI",
            Self::DefineHierarchicalProgression => "DHP",
            Self::ExpandReferenceComponents => "EXP",
            Self::ApplicationData0 => "APP0",
            Self::ApplicationData1 => "APP1",
            Self::ApplicationData2 => "APP2",
            Self::ApplicationData3 => "APP3",
            Self::ApplicationData4 => "APP4",
            Self::ApplicationData5 => "APP5",
            Self::ApplicationData6 => "APP6",
            Self::ApplicationData7 => "APP7",
            Self::ApplicationData8 => "APP8",
            Self::ApplicationData9 => "APP9",
            Self::ApplicationData10 => "APP10",
            Self::ApplicationData11 => "APP11",
            Self::ApplicationData12 => "APP12",
            Self::ApplicationData13 => "APP13",
            Self::ApplicationData14 => "APP14",
            Self::ApplicationData15 => "APP15",
            Self::Comment => "COM",
            Self::Temporary => "TEM",
        }
    }
}
