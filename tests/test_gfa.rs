#[cfg(test)]
mod tests {
    use graphmer::cli::io::load_gfa;
    use graphmer::graph::{Dir, Gid, Params, Pool};
    use std::io::Write;

    fn write_graph(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_segments_and_links() {
        let file = write_graph(
            "H\tVN:Z:1.0\n\
             S\tsec0\tGGRA\n\
             S\tsec1\tM\n\
             S\tsec2\tACVVGTGT\n\
             L\tsec0\t+\tsec1\t+\t0M\n\
             L\tsec1\t+\tsec2\t+\t0M\n\
             L\tsec0\t+\tsec2\t+\t0M\n",
        );

        let mut pool = Pool::new(Params {
            k: 3,
            ..Params::default()
        })
        .unwrap();
        let (n_segments, n_links) = load_gfa(&mut pool, file.path()).unwrap();
        assert_eq!((n_segments, n_links), (3, 3));
        assert_eq!(pool.section_count(), 3);
        assert_eq!(pool.total_len(), 13);

        // the loaded graph behaves like a hand-built one
        let idx = pool.freeze().unwrap().build_index().unwrap();
        let hits = idx.matches(b"GTG").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].gid, Gid::forward(2));
        assert_eq!(hits[0].pos, 4);
    }

    #[test]
    fn reverse_strand_links_parse() {
        let file = write_graph(
            "S\tsec0\tAC\n\
             S\tsec1\tGT\n\
             L\tsec0\t+\tsec1\t-\n",
        );

        let mut pool = Pool::new(Params {
            k: 3,
            ..Params::default()
        })
        .unwrap();
        load_gfa(&mut pool, file.path()).unwrap();
        let acv = pool.freeze().unwrap();
        assert_eq!(
            acv.successors(Gid::new(0, Dir::Fwd)),
            &[Gid::new(1, Dir::Rev)]
        );
    }

    #[test]
    fn skips_noise_lines() {
        let file = write_graph(
            "# comment\n\
             \n\
             S\tsec0\tACGT\n\
             P\tignored\trecord\n\
             L\tonly_src\t+\n\
             S\ttruncated\n",
        );

        let mut pool = Pool::new(Params {
            k: 3,
            ..Params::default()
        })
        .unwrap();
        let (n_segments, n_links) = load_gfa(&mut pool, file.path()).unwrap();
        assert_eq!((n_segments, n_links), (1, 0));
        assert_eq!(pool.section_count(), 1);
    }
}
