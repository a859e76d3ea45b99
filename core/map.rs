use alloc::{collections::BTreeMap, vec::Vec};

use crate::{
    error::MapError,
    item::Item,
    label::{AddressLabel, Labels},
};

/// Address-indexed result of a disassembly.
///
/// Once decoded, items partition `start..end` and an end marker is placed at
/// `end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisassemblyMap {
    start: u64,
    end: u64,
    items: BTreeMap<u64, Item>,
    labels: Labels,
}

impl DisassemblyMap {
    /// Creates an empty map with a label at `start`.
    ///
    /// The label is out of range when `start..end` is empty.
    pub fn new(start: u64, end: u64) -> Self {
        let mut labels = Labels::default();
        labels.insert(AddressLabel::new(start, start >= end));
        Self::from_parts(start, end, labels)
    }

    pub(crate) fn from_parts(start: u64, end: u64, labels: Labels) -> Self {
        Self {
            start,
            end,
            items: BTreeMap::new(),
            labels,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn contains(&self, address: u64) -> bool {
        self.start <= address && address < self.end
    }

    pub fn items(&self) -> impl DoubleEndedIterator<Item = &Item> {
        self.items.values()
    }

    /// Items with address in `start..end`.
    pub fn items_in(&self, start: u64, end: u64) -> impl DoubleEndedIterator<Item = &Item> {
        self.items.range(start..end.max(start)).map(|(_, item)| item)
    }

    pub fn item(&self, address: u64) -> Option<&Item> {
        self.items.get(&address)
    }

    /// Item covering `address`.
    pub fn item_at(&self, address: u64) -> Option<&Item> {
        let (_, item) = self.items.range(..=address).next_back()?;
        (address < item.end_address() || item.address() == address).then_some(item)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn label(&self, address: u64) -> Option<&AddressLabel> {
        self.labels.get(address)
    }

    /// Inserts an item, the address must not be occupied.
    pub fn put(&mut self, item: Item) -> Result<(), MapError> {
        use alloc::collections::btree_map::Entry;

        match self.items.entry(item.address()) {
            Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(())
            }
            Entry::Occupied(entry) => Err(MapError::Occupied(*entry.key())),
        }
    }

    /// Registers a reference from the instruction at `referrer` to `address`.
    ///
    /// Returns the address of the label.
    pub fn put_label(&mut self, address: u64, referrer: u64) -> u64 {
        let out_of_range = !self.contains(address);
        let label = self.labels.get_or_insert(address, out_of_range);
        label.add_referrer(referrer);
        label.address()
    }

    fn check_boundaries(&self, start: u64, end: u64) -> Result<(), MapError> {
        if start > end {
            return Err(MapError::ReversedRange { start, end });
        }
        for address in [start, end] {
            if !self.items.contains_key(&address) {
                return Err(MapError::NotItemBoundary(address));
            }
        }
        Ok(())
    }

    /// Raw bytes of the items in `start..end`.
    pub fn extract_data(&self, start: u64, end: u64) -> Result<Vec<u8>, MapError> {
        if start == end {
            return Ok(Vec::new());
        }
        self.check_boundaries(start, end)?;
        Ok(self
            .items
            .range(start..end)
            .flat_map(|(_, item)| item.bytes().iter().copied())
            .collect())
    }

    /// Removes the items in `start..end`.
    pub fn remove_range(&mut self, start: u64, end: u64) -> Result<(), MapError> {
        if start == end {
            return Ok(());
        }
        self.check_boundaries(start, end)?;
        let mut tail = self.items.split_off(&start);
        let mut rest = tail.split_off(&end);
        self.items.append(&mut rest);
        Ok(())
    }

    /// Drops label references from the instructions in `start..end`.
    pub fn cleanup_labels(&mut self, start: u64, end: u64) {
        self.labels.remove_referrers(start, end);
    }

    pub fn rename_label<S: Into<alloc::string::String>>(
        &mut self,
        address: u64,
        name: S,
    ) -> Result<(), MapError> {
        let label = self
            .labels
            .get_mut(address)
            .ok_or(MapError::NoLabel(address))?;
        label.set_name(name);
        Ok(())
    }

    /// Recomputes the displacement anchors of all labels.
    pub fn link_labels(&mut self) {
        let items = &self.items;
        self.labels.link(|address| items.contains_key(&address));
    }

    /// Checks that the items cover `start..end` without gaps or overlaps.
    pub fn is_partitioned(&self) -> bool {
        let mut next = self.start;
        for item in self.items.values() {
            if item.address() != next {
                return false;
            }
            next = item.end_address();
        }
        next == self.end
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::item::ItemKind;

    fn bytes(map: &mut DisassemblyMap, address: u64, data: &[u8]) {
        map.put(Item::new(address, data.to_vec(), ItemKind::Bytes))
            .unwrap();
    }

    fn sample() -> DisassemblyMap {
        let mut map = DisassemblyMap::new(0x100, 0x106);
        bytes(&mut map, 0x100, &[1, 2]);
        bytes(&mut map, 0x102, &[3]);
        bytes(&mut map, 0x103, &[4, 5, 6]);
        map.put(Item::end(0x106)).unwrap();
        map
    }

    #[test]
    fn new_map_has_start_label() {
        let map = DisassemblyMap::new(0x10000, 0x10010);
        let label = map.label(0x10000).unwrap();
        assert_eq!(label.name(), "lbl10000");
        assert!(!label.is_out_of_range());

        let map = DisassemblyMap::new(0x10000, 0x10000);
        assert!(map.label(0x10000).unwrap().is_out_of_range());
    }

    #[test]
    fn put_rejects_occupied_address() {
        let mut map = sample();
        let err = map.put(Item::new(0x102, vec![0], ItemKind::Bytes));
        assert_eq!(err, Err(MapError::Occupied(0x102)));
    }

    #[test]
    fn put_label_dedups() {
        let mut map = sample();
        assert_eq!(map.put_label(0x104, 0x100), 0x104);
        assert_eq!(map.put_label(0x104, 0x102), 0x104);
        map.put_label(0x106, 0x102);
        map.put_label(0x80, 0x102);
        let label = map.label(0x104).unwrap();
        assert_eq!(label.referrers(), &[0x100, 0x102]);
        assert!(!label.is_out_of_range());
        assert!(map.label(0x106).unwrap().is_out_of_range());
        assert!(map.label(0x80).unwrap().is_out_of_range());
    }

    #[test]
    fn extract_and_remove() {
        let mut map = sample();
        assert_eq!(map.extract_data(0x102, 0x106), Ok(vec![3, 4, 5, 6]));
        assert_eq!(map.extract_data(0x102, 0x102), Ok(vec![]));
        assert_eq!(
            map.extract_data(0x103, 0x102),
            Err(MapError::ReversedRange {
                start: 0x103,
                end: 0x102
            })
        );
        assert_eq!(
            map.extract_data(0x101, 0x106),
            Err(MapError::NotItemBoundary(0x101))
        );
        assert_eq!(
            map.remove_range(0x100, 0x104),
            Err(MapError::NotItemBoundary(0x104))
        );

        map.remove_range(0x100, 0x103).unwrap();
        let addrs: Vec<_> = map.items().map(|i| i.address()).collect();
        assert_eq!(addrs, [0x103, 0x106]);
        assert!(!map.is_partitioned());
    }

    #[test]
    fn cleanup_and_rename() {
        let mut map = sample();
        map.put_label(0x104, 0x100);
        map.put_label(0x104, 0x103);
        map.cleanup_labels(0x100, 0x103);
        assert_eq!(map.label(0x104).unwrap().referrers(), &[0x103]);
        map.cleanup_labels(0x103, 0x106);
        assert!(map.label(0x104).is_some());

        map.rename_label(0x104, "table").unwrap();
        assert_eq!(map.label(0x104).unwrap().name(), "table");
        assert_eq!(map.rename_label(0x105, "x"), Err(MapError::NoLabel(0x105)));
    }

    #[test]
    fn link_and_lookup() {
        let mut map = sample();
        map.put_label(0x104, 0x100);
        map.link_labels();
        assert_eq!(map.label(0x104).unwrap().anchor(), Some(0x100));
        assert_eq!(map.item_at(0x104).unwrap().address(), 0x103);
        assert_eq!(map.item_at(0x106).unwrap().address(), 0x106);
        assert!(map.is_partitioned());
    }
}
