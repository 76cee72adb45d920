use clap::{value_parser, Args};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Sequence graph input (GFA subset: S and L records) [path]
    #[clap(
        short = 'g',
        long,
        value_parser,
        required = true,
        help_heading = "Core"
    )]
    pub graph: PathBuf,

    /// K-mer (seed) length [integer]
    ///
    /// The rank table costs 8*4^k bytes, so large k needs a LOT of RAM.
    #[clap(short = 'k', long, default_value = "14", value_parser = value_parser!(u32).range(1..33), help_heading = "Core")]
    pub kmer_size: u32,

    /// Number of threads for sorting (increases RAM usage) [integer]
    #[clap(short = 't', long, default_value = "1", help_heading = "Core")]
    pub n_threads: usize,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Seed words to look up, each exactly k bases [string]
    #[clap(value_parser, num_args = 0.., help_heading = "Queries")]
    pub seeds: Vec<String>,

    /// File with seed words to look up, one per line [path]
    #[clap(short = 'q', long, value_parser, help_heading = "Queries")]
    pub queries: Option<PathBuf>,

    /// Output TSV file; stdout when omitted [path]
    #[clap(short = 'o', long, value_parser, help_heading = "Queries")]
    pub output: Option<PathBuf>,
}
