//! Depth-bounded k-mer enumeration over the frozen graph.
//!
//! For every section (forward orientation only) and every start offset,
//! the walker emits every concrete length-k word that begins there,
//! following links up to k-1 bases past the section end and expanding
//! each ambiguous base into all of its concrete readings.
//!
//! Traversal state is an explicit stack of frames bump-allocated in two
//! flat arenas (`frames` and the shared word buffer `words`); frames
//! address their word set by offset, never by pointer, so arena growth
//! cannot invalidate anything.

use crate::graph::codec;
use crate::graph::links::LinkTable;
use crate::graph::registry::Registry;
use crate::graph::section::{Dir, Gid};
use crate::graph::seq::SeqStore;
use crate::graph::sort::PrefixKey;

/// One enumerated window: the packed word, the oriented section the
/// window starts in, and the start offset within it. Cross-boundary
/// windows are attributed to their starting section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerTuple {
    pub kmer: u64,
    pub gid: Gid,
    pub pos: u32,
}

impl PrefixKey for KmerTuple {
    #[inline]
    fn prefix_key(&self) -> u64 {
        self.kmer
    }
}

/// One traversal frame. The word set of the frame lives in the shared
/// arena at `words[word_base .. word_base + occ]`; `occ` is the number of
/// concrete readings of the window so far.
#[derive(Debug, Clone, Copy)]
struct Frame {
    gid: Gid,
    /// Next successor slot to descend into, and the end of the range.
    link_cursor: u64,
    link_end: u64,
    /// Bases still to fetch inside this section.
    rem: u32,
    /// Bases the whole walk may still extend past this frame.
    global_rem: u32,
    sec_base: u64,
    sec_len: u32,
    /// Bases already fetched in this frame.
    read: u32,
    /// Bases fetched on the path so far; window start = pos - k.
    pos: u32,
    /// First window start allowed to emit; raised past gap bases.
    min_emit: u32,
    /// Rolling 2-bit record of per-base expansion widths, newest at the
    /// bottom. Wide enough to look one full window back even at k = 32.
    cnt_arr: u128,
    emit_cursor: usize,
    word_base: usize,
    occ: usize,
}

/// Iterator over every k-mer occurrence of an archived graph.
pub struct Kmers<'g, 's> {
    seq: &'g SeqStore<'s>,
    registry: &'g Registry,
    links: &'g LinkTable,
    k: u32,
    /// Bit offset of the newest base in a packed word: 2*(k-1).
    shift: u32,
    /// Forward gid of the next base section to seed.
    next_base: u32,
    /// Forward gid of the tail sentinel; enumeration stops there.
    tail_gid: u32,
    cur_base: Gid,
    frames: Vec<Frame>,
    words: Vec<u64>,
}

impl<'g, 's> Kmers<'g, 's> {
    pub(crate) fn new(
        seq: &'g SeqStore<'s>,
        registry: &'g Registry,
        links: &'g LinkTable,
        k: u32,
    ) -> Self {
        // worst-case fan-out is 3 readings per base over half a window
        let init_words = 1024usize.max(3usize.pow(k / 2));
        Kmers {
            seq,
            registry,
            links,
            k,
            shift: 2 * (k - 1),
            next_base: 0,
            tail_gid: Gid::forward(registry.tail_id()).0,
            cur_base: Gid(0),
            frames: Vec::with_capacity(16),
            words: Vec::with_capacity(init_words),
        }
    }

    /// Seed the root frame for one base section.
    fn init_base(&mut self, gid: Gid) {
        let sec = match self.registry.section(gid.id()) {
            Some(sec) => *sec,
            None => return,
        };
        self.cur_base = gid;
        let (link_cursor, link_end) = self.links.cursor_bounds(gid);
        self.words.push(0);
        self.frames.push(Frame {
            gid,
            link_cursor,
            link_end,
            rem: sec.len,
            global_rem: self.k - 1,
            sec_base: sec.base,
            sec_len: sec.len,
            read: 0,
            pos: 0,
            min_emit: 0,
            cnt_arr: 0,
            emit_cursor: 1,
            word_base: 0,
            occ: 1,
        });
    }

    /// Pop the top frame and release its word region.
    fn pop_frame(&mut self) {
        if let Some(top) = self.frames.pop() {
            self.words.truncate(top.word_base);
        }
    }

    /// Fetch the next 4-bit base of the top frame, honoring orientation.
    fn fetch_top(&mut self) -> u8 {
        let fi = self.frames.len() - 1;
        let (gid, sec_base, sec_len, read) = {
            let f = &self.frames[fi];
            (f.gid, f.sec_base, f.sec_len, f.read)
        };
        let c = match gid.dir() {
            Dir::Fwd => self.seq.get(sec_base + read as u64),
            Dir::Rev => codec::complement_4bit(self.seq.get(sec_base + (sec_len - 1 - read) as u64)),
        };
        let f = &mut self.frames[fi];
        f.read += 1;
        f.rem -= 1;
        f.pos += 1;
        c
    }

    /// Shift one base into every partial word of the top frame.
    ///
    /// An ambiguous base replicates the word set once per concrete
    /// reading; when the base that falls out of the window was itself
    /// ambiguous, the set is thinned back down by keeping every p-th
    /// word. A gap keeps a placeholder reading and instead raises the
    /// frame's minimum emission position past every window covering it.
    fn append_base(&mut self, c: u8) {
        let k = self.k;
        let shift = self.shift;
        let fi = self.frames.len() - 1;
        let Kmers { frames, words, .. } = self;
        let f = &mut frames[fi];
        let base = f.word_base;
        let occ = f.occ;

        let exp = codec::expand(c);
        if exp.is_empty() {
            // gap: placeholder base, windows covering it never emit
            f.cnt_arr = (f.cnt_arr << 2) | 1;
            f.min_emit = f.pos;
            for w in &mut words[base..base + occ] {
                *w >>= 2;
            }
        } else {
            let p = exp.len();
            f.cnt_arr = (f.cnt_arr << 2) | p as u128;
            for _ in 1..p {
                words.extend_from_within(base..base + occ);
            }
            for (j, &b) in exp.iter().enumerate() {
                for w in &mut words[base + j * occ..base + (j + 1) * occ] {
                    *w = (*w >> 2) | ((b as u64) << shift);
                }
            }
            f.occ = occ * p;
        }

        // thin the set once the base leaving the window stops contributing
        let left = ((f.cnt_arr >> (2 * k)) & 0x3) as usize;
        if left > 1 {
            let occ = f.occ / left;
            for j in 0..occ {
                words[base + j] = words[base + j * left];
            }
            f.occ = occ;
        }
        words.truncate(base + f.occ);
        f.emit_cursor = 0;
    }

    /// Advance the walk by one base: fetch within the top frame, or pop
    /// exhausted frames and descend the next link. Returns `false` when
    /// the current base section is fully enumerated.
    fn step(&mut self) -> bool {
        loop {
            let Some(top) = self.frames.last() else {
                return false;
            };
            if top.rem > 0 {
                let c = self.fetch_top();
                self.append_base(c);
                return true;
            }
            if top.global_rem == 0 {
                self.pop_frame();
            }
            // drop frames whose successors are all explored
            while let Some(f) = self.frames.last() {
                if f.link_cursor < f.link_end {
                    break;
                }
                self.pop_frame();
            }
            let Some(parent) = self.frames.last_mut() else {
                return false;
            };

            // descend the next successor, inheriting the window state
            let slot = parent.link_cursor;
            parent.link_cursor += 1;
            let child_gid = self.links.target(slot);
            let inherited = *parent;
            let sec = match self.registry.section(child_gid.id()) {
                Some(sec) => *sec,
                None => continue,
            };
            let rem = inherited.global_rem.min(sec.len);
            let (link_cursor, link_end) = self.links.cursor_bounds(child_gid);
            let word_base = self.words.len();
            self.words
                .extend_from_within(inherited.word_base..inherited.word_base + inherited.occ);
            self.frames.push(Frame {
                gid: child_gid,
                link_cursor,
                link_end,
                rem,
                global_rem: inherited.global_rem - rem,
                sec_base: sec.base,
                sec_len: sec.len,
                read: 0,
                pos: inherited.pos,
                min_emit: inherited.min_emit,
                cnt_arr: inherited.cnt_arr,
                emit_cursor: inherited.occ,
                word_base,
                occ: inherited.occ,
            });
        }
    }
}

impl<'g, 's> Iterator for Kmers<'g, 's> {
    type Item = KmerTuple;

    fn next(&mut self) -> Option<KmerTuple> {
        let k = self.k;
        loop {
            if let Some(top) = self.frames.last_mut() {
                if top.emit_cursor < top.occ && top.pos >= k && top.pos - k >= top.min_emit {
                    let word = self.words[top.word_base + top.emit_cursor];
                    top.emit_cursor += 1;
                    return Some(KmerTuple {
                        kmer: word,
                        gid: self.cur_base,
                        pos: top.pos - k,
                    });
                }
                if !self.step() {
                    self.frames.clear();
                    self.words.clear();
                }
                continue;
            }

            if self.next_base >= self.tail_gid {
                return None;
            }
            let gid = Gid(self.next_base);
            self.next_base += 2;
            self.init_base(gid);
        }
    }
}
