pub mod codec;
pub mod index;
pub mod links;
pub mod name_map;
pub mod registry;
pub mod section;
pub mod seq;
pub mod sort;
pub mod store;
pub mod walker;

pub use links::{GidPair, LinkTable};
pub use section::{Dir, Gid, GidPos, Section};
pub use store::{Archive, CopyMode, Index, IndexMode, Params, Pool, SeqFormat, MAX_SEGMENT_LEN};
pub use walker::{KmerTuple, Kmers};
