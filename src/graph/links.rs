//! Link storage: loose pairs while pooling, a packed table once frozen.

use log::debug;

use crate::error::{GraphError, Result};
use crate::graph::section::Gid;
use crate::graph::sort::{self, PrefixKey};

/// One directed edge between oriented sections. Every user link is stored
/// twice: the pair as given and its reverse twin, so that walking against
/// the strand sees the mirrored topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GidPair {
    pub from: Gid,
    pub to: Gid,
}

impl PrefixKey for GidPair {
    #[inline]
    fn prefix_key(&self) -> u64 {
        ((self.from.0 as u64) << 32) | self.to.0 as u64
    }
}

/// Packed successor table built at freeze time.
///
/// `bounds` holds one entry per oriented section plus a terminator, so the
/// successors of `gid` occupy `targets[bounds[gid] .. bounds[gid + 1]]`.
/// The tail sentinel's two orientations are covered and always empty.
#[derive(Debug)]
pub struct LinkTable {
    bounds: Vec<u64>,
    targets: Vec<Gid>,
}

impl LinkTable {
    /// Sort the pair buffer and compact it into the destination-only form.
    /// `tail_id` is the sentinel's section id.
    pub fn build(mut pairs: Vec<GidPair>, tail_id: u32, num_threads: usize) -> Result<LinkTable> {
        let slots = 2 * (tail_id as usize + 1) + 1;
        debug!(
            "packing link table: {} pairs over {} oriented sections",
            pairs.len(),
            slots - 1
        );

        sort::sort_by_prefix(&mut pairs, num_threads);

        let mut bounds = Vec::new();
        bounds
            .try_reserve_exact(slots)
            .map_err(|_| GraphError::TableAlloc { entries: slots })?;

        // gap-fill scan: bounds[g] is the offset of the first pair whose
        // source is >= g
        bounds.push(0);
        let mut prev = 0u32;
        for (i, pair) in pairs.iter().enumerate() {
            let gid = pair.from.0;
            if gid == prev {
                continue;
            }
            for _ in prev + 1..=gid {
                bounds.push(i as u64);
            }
            prev = gid;
        }
        while bounds.len() < slots {
            bounds.push(pairs.len() as u64);
        }

        let targets = pairs.iter().map(|p| p.to).collect();
        Ok(LinkTable { bounds, targets })
    }

    /// Successor slots of `gid` as raw cursor bounds into the table.
    #[inline]
    pub fn cursor_bounds(&self, gid: Gid) -> (u64, u64) {
        let g = gid.0 as usize;
        (self.bounds[g], self.bounds[g + 1])
    }

    /// Destination at cursor `slot`.
    #[inline]
    pub fn target(&self, slot: u64) -> Gid {
        self.targets[slot as usize]
    }

    /// Successors of `gid`, in pair sort order.
    pub fn successors(&self, gid: Gid) -> &[Gid] {
        let (lb, ub) = self.cursor_bounds(gid);
        &self.targets[lb as usize..ub as usize]
    }

    /// Total number of stored (twinned) links.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Expand back into loose pairs, melting the archive.
    pub fn into_pairs(self) -> Vec<GidPair> {
        let mut pairs = Vec::with_capacity(self.targets.len());
        for g in 0..self.bounds.len() - 1 {
            let from = Gid(g as u32);
            let (lb, ub) = (self.bounds[g], self.bounds[g + 1]);
            for slot in lb..ub {
                pairs.push(GidPair {
                    from,
                    to: self.targets[slot as usize],
                });
            }
        }
        pairs
    }
}
