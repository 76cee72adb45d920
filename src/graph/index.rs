//! Sorted-table k-mer index.
//!
//! The walker output is sorted by packed word and split into two flat
//! tables: `ranks`, a dense prefix index over the whole 4^k keyspace, and
//! `hits`, the word-sorted position records. A lookup is two rank reads
//! and one slice.

use log::debug;

use crate::error::{GraphError, Result};
use crate::graph::section::GidPos;
use crate::graph::sort;
use crate::graph::walker::{KmerTuple, Kmers};

#[derive(Debug)]
pub struct KmerIndex {
    /// `ranks[w]` is the offset of the first hit whose word is >= w;
    /// length 4^k + 1, non-decreasing, ends at `hits.len()`.
    ranks: Vec<u64>,
    /// Position records sorted by word.
    hits: Vec<GidPos>,
    mask: u64,
}

impl KmerIndex {
    /// Drain the walker, sort its tuples, and build the rank table.
    pub fn build(kmers: Kmers<'_, '_>, k: u32, num_threads: usize) -> Result<KmerIndex> {
        let mut tuples: Vec<KmerTuple> = kmers.collect();
        debug!("indexing {} k-mer occurrences at k={k}", tuples.len());
        sort::sort_by_prefix(&mut tuples, num_threads);

        let entries = keyspace(k)?
            .checked_add(1)
            .ok_or(GraphError::TableAlloc { entries: usize::MAX })?;
        let mut ranks = Vec::new();
        ranks
            .try_reserve_exact(entries)
            .map_err(|_| GraphError::TableAlloc { entries })?;

        // gap-fill scan over the sorted tuples: words that never occur
        // point at the first strictly greater word that does
        ranks.push(0);
        let mut prev = 0u64;
        for (i, t) in tuples.iter().enumerate() {
            if t.kmer == prev {
                continue;
            }
            for _ in prev + 1..=t.kmer {
                ranks.push(i as u64);
            }
            prev = t.kmer;
        }
        while ranks.len() < entries {
            ranks.push(tuples.len() as u64);
        }

        let hits = tuples
            .iter()
            .map(|t| GidPos {
                gid: t.gid,
                pos: t.pos,
            })
            .collect();

        Ok(KmerIndex {
            ranks,
            hits,
            mask: word_mask(k),
        })
    }

    /// Occurrences of a packed word. Bits above the k-mer width are
    /// masked off; a word with no occurrences yields an empty slice.
    #[inline]
    pub fn lookup_packed(&self, word: u64) -> &[GidPos] {
        let w = (word & self.mask) as usize;
        let (lb, ub) = (self.ranks[w] as usize, self.ranks[w + 1] as usize);
        &self.hits[lb..ub]
    }

    /// Total number of indexed occurrences.
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }
}

/// Number of distinct k-mer words, erroring when 4^k cannot be addressed.
fn keyspace(k: u32) -> Result<usize> {
    1usize
        .checked_shl(2 * k)
        .ok_or(GraphError::TableAlloc { entries: usize::MAX })
}

/// Low 2k bits set.
fn word_mask(k: u32) -> u64 {
    if k >= 32 {
        u64::MAX
    } else {
        (1u64 << (2 * k)) - 1
    }
}
