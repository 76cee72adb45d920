use thiserror::Error;

/// Everything that can go wrong while building or querying a sequence graph.
///
/// No-hit lookups are not an error: `matches` returns an empty slice.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid k-mer length {0}: must be between 1 and 32")]
    KmerLength(u32),

    #[error("hash size {0} is not a power of two")]
    HashSize(usize),

    #[error("zero-copy input requires the packed 4-bit sequence format")]
    ZeroCopyFormat,

    #[error("segment input does not match the configured sequence format")]
    SequenceFormat,

    #[error("segment `{name}` is {len} bases long, exceeding the {max} base limit")]
    SegmentLength { name: String, len: u64, max: u64 },

    #[error("packed buffer holds {have} bytes, expected {need} for {len} bases")]
    PackedLength { have: usize, need: usize, len: u64 },

    #[error("query is {got} bases long, expected exactly {expected}")]
    QueryLength { expected: usize, got: usize },

    #[error("cannot reserve a table of {entries} entries")]
    TableAlloc { entries: usize },

    #[error("index persistence is reserved and not implemented")]
    Persistence,
}

pub type Result<T> = std::result::Result<T, GraphError>;
