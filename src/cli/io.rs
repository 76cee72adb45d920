use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;

use crate::graph::{Dir, Pool};

/// Load a GFA-subset graph file into a pool.
///
/// * `S <name> <seq>` appends a segment (ASCII IUPAC text).
/// * `L <src> <+/-> <dst> <+/->` appends an oriented link; any overlap
///   column is ignored, ends are treated as abutting.
///
/// Header and other record types are skipped; malformed lines are
/// reported and skipped. Returns `(segments, links)` loaded.
pub fn load_gfa(pool: &mut Pool, path: &Path) -> Result<(usize, usize)> {
    let content =
        std::fs::read_to_string(path).context(format!("reading graph file {:?}", path))?;

    let mut n_segments = 0;
    let mut n_links = 0;
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        match fields.next() {
            Some("S") => {
                let (Some(name), Some(seq)) = (fields.next(), fields.next()) else {
                    warn!("skipping malformed S record at line {}", lineno + 1);
                    continue;
                };
                pool.append_segment(name, seq.as_bytes())
                    .context(format!("appending segment `{}`", name))?;
                n_segments += 1;
            }
            Some("L") => {
                let (Some(src), Some(so), Some(dst), Some(do_)) =
                    (fields.next(), fields.next(), fields.next(), fields.next())
                else {
                    warn!("skipping malformed L record at line {}", lineno + 1);
                    continue;
                };
                let (Some(src_dir), Some(dst_dir)) = (parse_strand(so), parse_strand(do_)) else {
                    warn!("skipping L record with bad strand at line {}", lineno + 1);
                    continue;
                };
                pool.append_link(src, src_dir, dst, dst_dir)
                    .context(format!("appending link `{}` -> `{}`", src, dst))?;
                n_links += 1;
            }
            Some(tag) => debug!("ignoring `{}` record at line {}", tag, lineno + 1),
            None => {}
        }
    }
    Ok((n_segments, n_links))
}

fn parse_strand(field: &str) -> Option<Dir> {
    match field {
        "+" => Some(Dir::Fwd),
        "-" => Some(Dir::Rev),
        _ => None,
    }
}
