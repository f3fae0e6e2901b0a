use std::collections::HashMap;

pub type TagId = u32;

/// Maps tag strings onto dense integer ids so that frame comparisons
/// never touch the strings again.
#[derive(Debug, Default)]
pub struct TagInterner {
    ids: HashMap<String, TagId>,
}

impl TagInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, tag: &str) -> TagId {
        if let Some(id) = self.ids.get(tag) {
            return *id;
        }
        let id = self.ids.len() as TagId;
        self.ids.insert(tag.to_owned(), id);
        id
    }

    pub fn get(&self, tag: &str) -> Option<TagId> {
        self.ids.get(tag).copied()
    }

    /// Number of distinct tags seen.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Set of tag ids, kept sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<TagId>);

impl TagSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_ids(mut ids: Vec<TagId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[TagId] {
        &self.0
    }

    pub fn union(&self, other: &TagSet) -> TagSet {
        let (a, b) = (&self.0, &other.0);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                merged.push(a[i]);
                i += 1;
            } else if b[j] < a[i] {
                merged.push(b[j]);
                j += 1;
            } else {
                merged.push(a[i]);
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        TagSet(merged)
    }

    /// Size of the intersection, computed with a merge walk.
    pub fn intersection_len(&self, other: &TagSet) -> usize {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j, mut common) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                i += 1;
            } else if b[j] < a[i] {
                j += 1;
            } else {
                common += 1;
                i += 1;
                j += 1;
            }
        }
        common
    }
}
