//! Section registry: names, ids, and per-section metadata.

use log::debug;

use crate::graph::name_map::NameMap;
use crate::graph::section::Section;

/// Name-keyed section table plus the running tail id.
///
/// `tail_id` is one past the highest id ever referenced, whether the name
/// arrived through a segment append or only as a link endpoint. The tail
/// sentinel added at freeze time lands exactly there.
#[derive(Debug)]
pub struct Registry {
    map: NameMap<Section>,
    tail_id: u32,
}

impl Registry {
    pub fn with_capacity(buckets: usize) -> Self {
        Registry {
            map: NameMap::with_capacity(buckets),
            tail_id: 0,
        }
    }

    /// Allocate (or re-resolve) `name` and store its section record.
    /// Re-appending a known name overwrites its record.
    pub fn assign(&mut self, name: &str, len: u32, base: u64) -> u32 {
        let id = self.map.get_id(name);
        self.tail_id = self.tail_id.max(id + 1);
        let slot = self.map.get_mut(id).expect("slot exists after get_id");
        *slot = Section { id, len, base };
        id
    }

    /// Resolve `name` for use as a link endpoint, allocating an empty
    /// record when it has not been seen yet.
    pub fn touch(&mut self, name: &str) -> u32 {
        let id = self.map.get_id(name);
        self.tail_id = self.tail_id.max(id + 1);
        if let Some(slot) = self.map.get_mut(id) {
            slot.id = id;
        }
        id
    }

    /// Install the zero-length tail sentinel at `tail_id`, picking a name
    /// that is not taken yet. Idempotent across melt/freeze cycles.
    pub fn add_tail_sentinel(&mut self) -> u32 {
        let tail = self.tail_id;
        if self.map.len() as u32 > tail {
            // sentinel already present
            return tail;
        }
        let mut name = String::from("tail_sentinel_");
        loop {
            name.push('0');
            let id = self.map.get_id(&name);
            if id == tail {
                break;
            }
        }
        debug!("tail sentinel `{name}` installed at id {tail}");
        let slot = self.map.get_mut(tail).expect("sentinel slot exists");
        *slot = Section {
            id: tail,
            len: 0,
            base: 0,
        };
        tail
    }

    pub fn section(&self, id: u32) -> Option<&Section> {
        self.map.get(id)
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.map.name(id)
    }

    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.map.lookup(name)
    }

    /// One past the highest referenced id; the sentinel (when present)
    /// does not count.
    pub fn tail_id(&self) -> u32 {
        self.tail_id
    }

    /// Number of registry entries, sentinel included.
    pub fn entry_count(&self) -> usize {
        self.map.len()
    }
}
