use alloc::{
    collections::{BTreeMap, BTreeSet},
    format,
    string::String,
    vec::Vec,
};

/// Symbolic name of an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressLabel {
    address: u64,
    name: String,
    referrers: Vec<u64>,
    out_of_range: bool,
    anchor: Option<u64>,
}

impl AddressLabel {
    pub fn new(address: u64, out_of_range: bool) -> Self {
        Self::with_name(address, Self::default_name(address), out_of_range)
    }

    pub fn with_name<S: Into<String>>(address: u64, name: S, out_of_range: bool) -> Self {
        Self {
            address,
            name: name.into(),
            referrers: Vec::new(),
            out_of_range,
            anchor: None,
        }
    }

    pub fn default_name(address: u64) -> String {
        format!("lbl{address:X}")
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Addresses of instructions referencing this label in ascending order.
    pub fn referrers(&self) -> &[u64] {
        &self.referrers
    }

    pub fn is_referenced(&self) -> bool {
        !self.referrers.is_empty()
    }

    pub fn add_referrer(&mut self, address: u64) {
        if let Err(index) = self.referrers.binary_search(&address) {
            self.referrers.insert(index, address);
        }
    }

    /// Drops references from instructions in `start..end`.
    pub fn remove_referrers(&mut self, start: u64, end: u64) {
        self.referrers.retain(|&i| i < start || i >= end);
    }

    pub fn is_out_of_range(&self) -> bool {
        self.out_of_range
    }

    /// Address of the label used to print this one as `anchor+offset`.
    pub fn anchor(&self) -> Option<u64> {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Option<u64>) {
        self.anchor = anchor;
    }
}

/// Labels of a disassembly map sorted by address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels {
    map: BTreeMap<u64, AddressLabel>,
}

impl Labels {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, address: u64) -> Option<&AddressLabel> {
        self.map.get(&address)
    }

    pub fn get_mut(&mut self, address: u64) -> Option<&mut AddressLabel> {
        self.map.get_mut(&address)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &AddressLabel> {
        self.map.values()
    }

    /// Inserts a label, a label with the same address is replaced.
    pub fn insert(&mut self, label: AddressLabel) {
        self.map.insert(label.address, label);
    }

    /// Returns the label at `address`, creating it if needed.
    pub fn get_or_insert(&mut self, address: u64, out_of_range: bool) -> &mut AddressLabel {
        self.map
            .entry(address)
            .or_insert_with(|| AddressLabel::new(address, out_of_range))
    }

    /// Nearest label with address less than `address`.
    pub fn get_before(&self, address: u64) -> Option<&AddressLabel> {
        self.map.range(..address).next_back().map(|(_, label)| label)
    }

    /// Label is referenced by an instruction or anchors another label.
    pub fn is_visible(&self, address: u64) -> bool {
        match self.map.get(&address) {
            Some(label) => {
                label.is_referenced() || self.map.values().any(|i| i.anchor == Some(address))
            }
            None => false,
        }
    }

    /// Addresses used as an anchor by at least one label.
    pub fn anchors(&self) -> BTreeSet<u64> {
        self.map.values().filter_map(|i| i.anchor).collect()
    }

    pub fn remove_referrers(&mut self, start: u64, end: u64) {
        for label in self.map.values_mut() {
            label.remove_referrers(start, end);
        }
    }

    /// Recomputes displacement anchors.
    ///
    /// An in-range label that does not start an item is anchored to the
    /// nearest preceding label without an anchor, other in-range labels
    /// lose their anchors.
    pub fn link<F>(&mut self, is_item_start: F)
    where
        F: Fn(u64) -> bool,
    {
        let mut candidate = None;
        for label in self.map.values_mut() {
            if !label.out_of_range {
                label.anchor = if is_item_start(label.address) {
                    None
                } else {
                    candidate
                };
            }
            if label.anchor.is_none() {
                candidate = Some(label.address);
            }
        }
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a AddressLabel;
    type IntoIter = alloc::collections::btree_map::Values<'a, u64, AddressLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.values()
    }
}
