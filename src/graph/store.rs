//! The graph object and its three-state lifecycle.
//!
//! A graph is always in exactly one state, each with its own type:
//!
//! * [`Pool`] - mutable; segments and links may be appended.
//! * [`Archive`] - immutable topology; links packed, k-mers enumerable.
//! * [`Index`] - archive plus the sorted k-mer lookup tables.
//!
//! Transitions consume the old state and return the new one, so calling
//! an operation in the wrong state is a type error rather than a runtime
//! one. `melt` is the only reverse edge back to [`Pool`]; dropping the
//! index is cheap and idempotent via `disable_index`.

use log::debug;

use crate::error::{GraphError, Result};
use crate::graph::codec;
use crate::graph::index::KmerIndex;
use crate::graph::links::{GidPair, LinkTable};
use crate::graph::registry::Registry;
use crate::graph::section::{Dir, Gid, GidPos, Section};
use crate::graph::seq::SeqStore;
use crate::graph::walker::Kmers;

/// Longest admissible segment.
pub const MAX_SEGMENT_LEN: u64 = 1 << 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqFormat {
    /// Segment input is ASCII nucleotide text.
    Ascii,
    /// Segment input is 4-bit packed, two bases per byte.
    FourBit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Copy,
    /// Pin caller buffers instead of copying; packed input only.
    NoCopy,
}

/// Reserved switch: both modes currently build the same hash index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMode {
    Hash,
    Iter,
}

/// Graph construction parameters.
#[derive(Debug, Clone)]
pub struct Params {
    /// K-mer length, 1..=32. The rank table costs 8*4^k bytes.
    pub k: u32,
    /// Initial bucket count of the name map; must be a power of two.
    pub hash_size: usize,
    pub seq_format: SeqFormat,
    pub copy_mode: CopyMode,
    pub index_mode: IndexMode,
    /// Thread hint for sorting; 0 or 1 sorts serially.
    pub num_threads: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            k: 14,
            hash_size: 1024,
            seq_format: SeqFormat::Ascii,
            copy_mode: CopyMode::Copy,
            index_mode: IndexMode::Hash,
            num_threads: 0,
        }
    }
}

impl Params {
    fn validate(&self) -> Result<()> {
        if self.k == 0 || self.k > 32 {
            return Err(GraphError::KmerLength(self.k));
        }
        if !self.hash_size.is_power_of_two() {
            return Err(GraphError::HashSize(self.hash_size));
        }
        if self.copy_mode == CopyMode::NoCopy && self.seq_format != SeqFormat::FourBit {
            return Err(GraphError::ZeroCopyFormat);
        }
        Ok(())
    }
}

/// State shared by every lifecycle stage.
#[derive(Debug)]
struct Core<'s> {
    params: Params,
    registry: Registry,
    seq: SeqStore<'s>,
}

impl<'s> Core<'s> {
    fn section(&self, id: u32) -> Option<&Section> {
        self.registry.section(id)
    }

    fn name(&self, id: u32) -> Option<&str> {
        self.registry.name(id)
    }
}

/// Mutable graph under construction.
#[derive(Debug)]
pub struct Pool<'s> {
    core: Core<'s>,
    pairs: Vec<GidPair>,
}

/// Frozen graph: packed links, enumerable k-mers.
#[derive(Debug)]
pub struct Archive<'s> {
    core: Core<'s>,
    links: LinkTable,
}

/// Archive with the k-mer lookup tables attached.
#[derive(Debug)]
pub struct Index<'s> {
    acv: Archive<'s>,
    kmers: KmerIndex,
}

impl<'s> Pool<'s> {
    pub fn new(params: Params) -> Result<Pool<'s>> {
        params.validate()?;
        let seq = match params.copy_mode {
            CopyMode::Copy => SeqStore::owned(),
            CopyMode::NoCopy => SeqStore::pinned(),
        };
        Ok(Pool {
            core: Core {
                registry: Registry::with_capacity(params.hash_size),
                seq,
                params,
            },
            pairs: Vec::new(),
        })
    }

    /// Append a named segment of ASCII nucleotide text.
    pub fn append_segment(&mut self, name: &str, seq: &[u8]) -> Result<()> {
        if self.core.params.seq_format != SeqFormat::Ascii {
            return Err(GraphError::SequenceFormat);
        }
        check_segment_len(name, seq.len() as u64)?;
        let iv = self.core.seq.append_ascii(seq)?;
        self.core
            .registry
            .assign(name, (iv.tail - iv.base) as u32, iv.base);
        Ok(())
    }

    /// Append a named segment of `len` bases from a packed 4-bit buffer.
    pub fn append_segment_packed(&mut self, name: &str, data: &[u8], len: u64) -> Result<()> {
        if self.core.params.seq_format != SeqFormat::FourBit
            || self.core.params.copy_mode != CopyMode::Copy
        {
            return Err(GraphError::SequenceFormat);
        }
        check_segment_len(name, len)?;
        let iv = self.core.seq.append_packed(data, len)?;
        self.core
            .registry
            .assign(name, (iv.tail - iv.base) as u32, iv.base);
        Ok(())
    }

    /// Append a named segment by pinning the caller's packed buffer for
    /// the lifetime of the graph.
    pub fn append_segment_pinned(&mut self, name: &str, data: &'s [u8], len: u64) -> Result<()> {
        if self.core.params.copy_mode != CopyMode::NoCopy {
            return Err(GraphError::SequenceFormat);
        }
        check_segment_len(name, len)?;
        let iv = self.core.seq.append_pinned(data, len)?;
        self.core
            .registry
            .assign(name, (iv.tail - iv.base) as u32, iv.base);
        Ok(())
    }

    /// Append a directed link between oriented segment ends. Both
    /// endpoints are allocated on demand; the reverse twin is stored
    /// alongside so traversal stays strand-symmetric.
    pub fn append_link(&mut self, src: &str, src_dir: Dir, dst: &str, dst_dir: Dir) -> Result<()> {
        let src_id = self.core.registry.touch(src);
        let dst_id = self.core.registry.touch(dst);
        self.pairs.push(GidPair {
            from: Gid::new(src_id, src_dir),
            to: Gid::new(dst_id, dst_dir),
        });
        self.pairs.push(GidPair {
            from: Gid::new(dst_id, dst_dir.flip()),
            to: Gid::new(src_id, src_dir.flip()),
        });
        Ok(())
    }

    /// Pack the link table and archive the graph.
    pub fn freeze(mut self) -> Result<Archive<'s>> {
        self.core.registry.add_tail_sentinel();
        debug!(
            "freezing pool: {} sections, {} link pairs",
            self.core.registry.tail_id(),
            self.pairs.len()
        );
        let links = LinkTable::build(
            self.pairs,
            self.core.registry.tail_id(),
            self.core.params.num_threads,
        )?;
        Ok(Archive {
            core: self.core,
            links,
        })
    }

    pub fn section(&self, id: u32) -> Option<&Section> {
        self.core.section(id)
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.core.name(id)
    }

    pub fn section_count(&self) -> u32 {
        self.core.registry.tail_id()
    }

    pub fn total_len(&self) -> u64 {
        self.core.seq.total_len()
    }

    pub fn params(&self) -> &Params {
        &self.core.params
    }
}

impl<'s> Archive<'s> {
    /// Enumerate every k-mer occurrence of the graph.
    pub fn kmers(&self) -> Kmers<'_, 's> {
        Kmers::new(
            &self.core.seq,
            &self.core.registry,
            &self.links,
            self.core.params.k,
        )
    }

    /// Build the k-mer lookup tables.
    pub fn build_index(self) -> Result<Index<'s>> {
        let kmers = KmerIndex::build(self.kmers(), self.core.params.k, self.core.params.num_threads)?;
        Ok(Index { acv: self, kmers })
    }

    /// Unpack the link table and return to the mutable pool state. The
    /// tail sentinel persists in the registry.
    pub fn melt(self) -> Pool<'s> {
        Pool {
            core: self.core,
            pairs: self.links.into_pairs(),
        }
    }

    /// Successors of an oriented section, in link sort order.
    pub fn successors(&self, gid: Gid) -> &[Gid] {
        self.links.successors(gid)
    }

    /// True when any base in the buffer range `[lb, ub)` is a gap or an
    /// ambiguity code.
    pub fn is_ambiguous(&self, lb: u64, ub: u64) -> bool {
        self.core.seq.is_ambiguous(lb, ub)
    }

    pub fn section(&self, id: u32) -> Option<&Section> {
        self.core.section(id)
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.core.name(id)
    }

    pub fn section_count(&self) -> u32 {
        self.core.registry.tail_id()
    }

    pub fn total_len(&self) -> u64 {
        self.core.seq.total_len()
    }

    /// The packed sequence bytes, when the graph owns them. Pinned
    /// (zero-copy) graphs have no single backing buffer.
    pub fn seq_bytes(&self) -> Option<&[u8]> {
        self.core.seq.bytes()
    }

    pub fn params(&self) -> &Params {
        &self.core.params
    }
}

impl<'s> Index<'s> {
    /// Occurrences of an ASCII query word. The query must be exactly k
    /// bases long; a word with no occurrences yields an empty slice.
    pub fn matches(&self, seq: &[u8]) -> Result<&[GidPos]> {
        let k = self.acv.core.params.k as usize;
        if seq.len() != k {
            return Err(GraphError::QueryLength {
                expected: k,
                got: seq.len(),
            });
        }
        Ok(self.matches_packed(codec::pack_word(seq)))
    }

    /// Occurrences of a packed 2-bit query word. Bits above the k-mer
    /// width are ignored.
    pub fn matches_packed(&self, word: u64) -> &[GidPos] {
        self.kmers.lookup_packed(word)
    }

    /// Enumerate every k-mer occurrence of the graph.
    pub fn kmers(&self) -> Kmers<'_, 's> {
        self.acv.kmers()
    }

    /// Drop the lookup tables and return to the archive state.
    pub fn disable_index(self) -> Archive<'s> {
        self.acv
    }

    /// Total number of indexed k-mer occurrences.
    pub fn hit_count(&self) -> usize {
        self.kmers.hit_count()
    }

    /// Reserved: on-disk persistence is not part of this generation.
    pub fn dump(&self, _writer: &mut dyn std::io::Write) -> Result<()> {
        Err(GraphError::Persistence)
    }

    /// Reserved: on-disk persistence is not part of this generation.
    pub fn load(_reader: &mut dyn std::io::Read) -> Result<Index<'s>> {
        Err(GraphError::Persistence)
    }

    pub fn successors(&self, gid: Gid) -> &[Gid] {
        self.acv.successors(gid)
    }

    pub fn is_ambiguous(&self, lb: u64, ub: u64) -> bool {
        self.acv.is_ambiguous(lb, ub)
    }

    pub fn section(&self, id: u32) -> Option<&Section> {
        self.acv.section(id)
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.acv.name(id)
    }

    pub fn section_count(&self) -> u32 {
        self.acv.section_count()
    }

    pub fn total_len(&self) -> u64 {
        self.acv.total_len()
    }

    pub fn seq_bytes(&self) -> Option<&[u8]> {
        self.acv.seq_bytes()
    }

    pub fn params(&self) -> &Params {
        self.acv.params()
    }
}

fn check_segment_len(name: &str, len: u64) -> Result<()> {
    if len > MAX_SEGMENT_LEN {
        return Err(GraphError::SegmentLength {
            name: name.to_owned(),
            len,
            max: MAX_SEGMENT_LEN,
        });
    }
    Ok(())
}
