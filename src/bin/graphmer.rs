use anyhow::{Context, Result};
use clap::Parser;
use graphmer::cli::io::load_gfa;
use graphmer::cli::opts::{GraphArgs, QueryArgs};
use graphmer::graph::{Dir, Params, Pool};
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::{
    fs::File,
    io::{BufWriter, Write},
    time::Instant,
};

/// Command-line options for the sequence-graph seed lookup tool
#[derive(Parser)]
#[command(
    name = "graphmer",
    about = "Index a sequence graph and look up exact k-mer seeds",
    long_about = "Index a sequence graph and look up exact k-mer seeds.


EXAMPLES:
    // Look up two seeds in a graph at k=3
    $ graphmer --graph <path/to/graph.gfa> --kmer-size 3 GTG GGG

    // Seeds from a file, results to a TSV
    $ graphmer -g graph.gfa -k 14 -q seeds.txt -o hits.tsv -t 4
    ",
    version = "0.1.0"
)]
struct Cli {
    #[clap(flatten)]
    graph: GraphArgs,

    #[clap(flatten)]
    query: QueryArgs,

    /// Print debug-level progress information [flag]
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Returns the final seed list: file-provided seeds first, then the
    /// positional ones.
    fn resolve_seeds(&self) -> Result<Vec<String>> {
        let mut seeds = Vec::new();
        if let Some(file) = &self.query.queries {
            let text = std::fs::read_to_string(file)
                .context(format!("reading query file {:?}", file))?;
            seeds.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(String::from),
            );
        }
        seeds.extend(self.query.seeds.iter().cloned());
        Ok(seeds)
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn run() -> Result<()> {
    let start_time = Instant::now();
    let opt = Cli::parse();

    let level = if opt.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("initializing logger")?;

    // Configure global thread-pool size
    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.graph.n_threads)
        .build_global()
        .context("building Rayon thread pool")?;

    let seeds = opt.resolve_seeds()?;
    if seeds.is_empty() {
        warn!("no seeds given; building the index and exiting");
    }

    info!("Start: Loading graph");
    let mut pool = Pool::new(Params {
        k: opt.graph.kmer_size,
        num_threads: opt.graph.n_threads,
        ..Params::default()
    })
    .context("initializing graph pool")?;
    let (n_segments, n_links) = load_gfa(&mut pool, &opt.graph.graph)?;
    info!("Loaded {} segments and {} links", n_segments, n_links);

    info!("Start: Building k-mer index");
    let idx = pool
        .freeze()
        .context("freezing graph")?
        .build_index()
        .context("building k-mer index")?;
    info!("Indexed {} k-mer occurrences", idx.hit_count());

    info!("Start: Matching seeds");
    let mut out: BufWriter<Box<dyn Write>> = BufWriter::new(match &opt.query.output {
        Some(path) => Box::new(File::create(path).context("creating output file")?),
        None => Box::new(std::io::stdout()),
    });
    for seed in &seeds {
        let hits = match idx.matches(seed.as_bytes()) {
            Ok(hits) => hits,
            Err(e) => {
                warn!("skipping seed `{}`: {}", seed, e);
                continue;
            }
        };
        for hit in hits {
            let name = idx.name(hit.gid.id()).unwrap_or("?");
            let strand = match hit.gid.dir() {
                Dir::Fwd => '+',
                Dir::Rev => '-',
            };
            writeln!(out, "{}\t{}\t{}\t{}", seed, name, strand, hit.pos)
                .context("writing hit row")?;
        }
    }
    out.flush().context("flushing output")?;

    let elapsed = start_time.elapsed();
    info!("Elapsed time: {:.2?}", elapsed);
    Ok(())
}
