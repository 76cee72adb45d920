//! Sections and oriented section ids.

use std::fmt;

/// Traversal orientation of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    /// Read the stored bases as-is.
    Fwd,
    /// Read from the far end, complementing on the fly.
    Rev,
}

impl Dir {
    pub fn flip(self) -> Dir {
        match self {
            Dir::Fwd => Dir::Rev,
            Dir::Rev => Dir::Fwd,
        }
    }
}

/// Oriented section id: the section id shifted up one bit, with the
/// orientation in the low bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gid(pub u32);

impl Gid {
    #[inline]
    pub fn new(id: u32, dir: Dir) -> Gid {
        Gid((id << 1) | dir as u32)
    }

    #[inline]
    pub fn forward(id: u32) -> Gid {
        Gid(id << 1)
    }

    /// Same section, opposite orientation.
    #[inline]
    pub fn flip(self) -> Gid {
        Gid(self.0 ^ 1)
    }

    #[inline]
    pub fn id(self) -> u32 {
        self.0 >> 1
    }

    #[inline]
    pub fn dir(self) -> Dir {
        if self.0 & 1 == 0 {
            Dir::Fwd
        } else {
            Dir::Rev
        }
    }
}

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strand = match self.dir() {
            Dir::Fwd => '+',
            Dir::Rev => '-',
        };
        write!(f, "{}{}", self.id(), strand)
    }
}

/// Immutable segment record: stable id, length in bases, and the base
/// offset of its first base in the sequence store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: u32,
    pub len: u32,
    pub base: u64,
}

/// One occurrence of a k-mer: the oriented section the window starts in
/// and the 0-based offset of its first base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GidPos {
    pub gid: Gid,
    pub pos: u32,
}
