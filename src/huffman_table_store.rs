use crate::constants::{HUFFMAN_TABLE_CLASSES, HUFFMAN_TABLE_DESTINATIONS};
use crate::error::JpegScanError;
use crate::huffman::{HuffmanTable, TableClass};

const SLOT_COUNT: usize = HUFFMAN_TABLE_CLASSES * HUFFMAN_TABLE_DESTINATIONS;

/// The Huffman tables defined by one stream, keyed by class and destination.
///
/// Redefining a table replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTableStore {
    tables: [Option<HuffmanTable>; SLOT_COUNT],
}

impl HuffmanTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `table` under its own class and destination, returning the
    /// table it replaced.
    pub fn put(&mut self, table: HuffmanTable) -> Result<Option<HuffmanTable>, JpegScanError> {
        let slot = slot_index(table.class(), table.destination())?;
        Ok(self.tables[slot].replace(table))
    }

    pub fn get(&self, class: TableClass, destination: u8) -> Result<&HuffmanTable, JpegScanError> {
        slot_index(class, destination)
            .ok()
            .and_then(|slot| self.tables[slot].as_ref())
            .ok_or(JpegScanError::TableNotDefined { class, destination })
    }

    pub fn contains(&self, class: TableClass, destination: u8) -> bool {
        self.get(class, destination).is_ok()
    }

    pub fn len(&self) -> usize {
        self.tables.iter().filter(|table| table.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Defined tables, DC before AC, each class ordered by destination.
    pub fn iter(&self) -> impl Iterator<Item = &HuffmanTable> {
        self.tables.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.tables = Default::default();
    }
}

fn slot_index(class: TableClass, destination: u8) -> Result<usize, JpegScanError> {
    if destination as usize >= HUFFMAN_TABLE_DESTINATIONS {
        return Err(JpegScanError::InvalidTableSelector {
            class: class.into(),
            destination,
        });
    }
    Ok(u8::from(class) as usize * HUFFMAN_TABLE_DESTINATIONS + destination as usize)
}
