//! Dense name→id mapping with one slot per id.
//!
//! Ids are allocated consecutively from 0 in first-touch order, and every
//! id owns a fixed slot created with `Default::default()`.

use fxhash::FxHashMap;

#[derive(Debug)]
pub struct NameMap<T> {
    ids: FxHashMap<String, u32>,
    names: Vec<String>,
    slots: Vec<T>,
}

impl<T: Default> NameMap<T> {
    pub fn with_capacity(buckets: usize) -> Self {
        NameMap {
            ids: FxHashMap::with_capacity_and_hasher(buckets, Default::default()),
            names: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Id for `name`, allocating the next consecutive id (and an empty
    /// slot) when the name is new.
    pub fn get_id(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.slots.len() as u32;
        self.ids.insert(name.to_owned(), id);
        self.names.push(name.to_owned());
        self.slots.push(T::default());
        id
    }

    /// Id for `name` without allocating.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.slots.get(id as usize)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.slots.get_mut(id as usize)
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Number of ids allocated so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
