#[cfg(test)]
mod tests {
    use graphmer::graph::codec::pack_word;
    use graphmer::graph::{Dir, Gid, GidPos, Index, Params, Pool};
    use graphmer::GraphError;

    fn index(k: u32, segments: &[(&str, &str)], links: &[(&str, Dir, &str, Dir)]) -> Index<'static> {
        let mut pool = Pool::new(Params {
            k,
            ..Params::default()
        })
        .unwrap();
        for (name, seq) in segments {
            pool.append_segment(name, seq.as_bytes()).unwrap();
        }
        for (src, sd, dst, dd) in links {
            pool.append_link(src, *sd, dst, *dd).unwrap();
        }
        pool.freeze().unwrap().build_index().unwrap()
    }

    /// Hits sorted by (gid, pos); the order of equal words in the table is
    /// unspecified.
    fn sorted_hits(idx: &Index, word: &str) -> Vec<(u32, u32)> {
        let mut hits: Vec<(u32, u32)> = idx
            .matches(word.as_bytes())
            .unwrap()
            .iter()
            .map(|h| (h.gid.0, h.pos))
            .collect();
        hits.sort_unstable();
        hits
    }

    /* --------------------------------------------------------------------- */
    /*  disjoint concrete segments                                           */
    /* --------------------------------------------------------------------- */

    #[test]
    fn matches_concrete_segments() {
        let idx = index(
            3,
            &[("sec0", "ACGT"), ("sec1", "TTTT"), ("sec2", "GGGA")],
            &[],
        );

        assert_eq!(sorted_hits(&idx, "ACG"), vec![(0, 0)]);
        // TTTT holds TTT twice; gid 2 is sec1 forward
        assert_eq!(sorted_hits(&idx, "TTT"), vec![(2, 0), (2, 1)]);
        assert_eq!(sorted_hits(&idx, "GGA"), vec![(4, 1)]);
        assert!(idx.matches(b"CCC").unwrap().is_empty());
    }

    #[test]
    fn every_window_of_a_concrete_segment_is_found() {
        let seq = "ACGTACGGT";
        let idx = index(3, &[("sec0", seq)], &[]);
        for i in 0..seq.len() - 2 {
            let word = &seq[i..i + 3];
            let hits = idx.matches(word.as_bytes()).unwrap();
            assert!(
                hits.contains(&GidPos {
                    gid: Gid::forward(0),
                    pos: i as u32
                }),
                "window {} at {} missing",
                word,
                i
            );
        }
    }

    /* --------------------------------------------------------------------- */
    /*  ambiguity expansion                                                  */
    /* --------------------------------------------------------------------- */

    #[test]
    fn iupac_codes_match_every_concretisation() {
        let idx = index(3, &[("sec0", "GGRA")], &[]);

        // windows: GG[AG] at 0, G[AG]A at 1
        assert_eq!(sorted_hits(&idx, "GGG"), vec![(0, 0)]);
        assert_eq!(sorted_hits(&idx, "GAA"), vec![(0, 1)]);
        // GGA arises from both windows: R read as A at 0, as G at 1
        assert_eq!(sorted_hits(&idx, "GGA"), vec![(0, 0), (0, 1)]);
        assert!(idx.matches(b"GGT").unwrap().is_empty());
        assert!(idx.matches(b"AAA").unwrap().is_empty());
    }

    #[test]
    fn cross_link_windows_are_attributed_to_their_start() {
        let idx = index(
            3,
            &[("sec0", "GGRA"), ("sec1", "M"), ("sec2", "ACVVGTGT")],
            &[
                ("sec0", Dir::Fwd, "sec1", Dir::Fwd),
                ("sec1", Dir::Fwd, "sec2", Dir::Fwd),
                ("sec0", Dir::Fwd, "sec2", Dir::Fwd),
            ],
        );

        // every word reachable from sec0 offset 2 across the links
        for word in ["AAA", "AAC", "GAA", "GAC"] {
            let hits = idx.matches(word.as_bytes()).unwrap();
            assert!(
                hits.contains(&GidPos {
                    gid: Gid::forward(0),
                    pos: 2
                }),
                "{} not found at sec0:2",
                word
            );
        }

        // GTG lives in sec2 only
        assert_eq!(sorted_hits(&idx, "GTG"), vec![(4, 4)]);
    }

    /* --------------------------------------------------------------------- */
    /*  packed lookups                                                       */
    /* --------------------------------------------------------------------- */

    #[test]
    fn high_bits_of_packed_queries_are_masked() {
        let idx = index(3, &[("sec0", "ACGT"), ("sec1", "TTTT")], &[]);
        assert_eq!(
            idx.matches_packed(0xDEADBEEF),
            idx.matches_packed(0xDEADBEEF & 0x3F)
        );
        assert_eq!(
            idx.matches_packed(pack_word(b"TTT")),
            idx.matches(b"TTT").unwrap()
        );
    }

    #[test]
    fn gap_only_queries_find_nothing_without_the_degenerate_word() {
        // X encodes as 0, so "XXX" collapses onto "AAA"; with no A runs in
        // the graph the result is empty
        let idx = index(3, &[("sec0", "GGGT")], &[]);
        assert!(idx.matches(b"XXX").unwrap().is_empty());
    }

    /* --------------------------------------------------------------------- */
    /*  rank table integrity                                                 */
    /* --------------------------------------------------------------------- */

    #[test]
    fn rank_slices_tile_the_whole_table() {
        let idx = index(
            3,
            &[("sec0", "GGRA"), ("sec1", "MGGG"), ("sec2", "ACVVGTGT")],
            &[
                ("sec0", Dir::Fwd, "sec1", Dir::Fwd),
                ("sec1", Dir::Fwd, "sec2", Dir::Fwd),
                ("sec0", Dir::Fwd, "sec2", Dir::Fwd),
            ],
        );

        // per-word slice lengths must agree with a fresh enumeration, and
        // sum to the full table; an out-of-range stored word would blow
        // the counting array
        let mut counts = vec![0usize; 64];
        for t in idx.kmers() {
            counts[t.kmer as usize] += 1;
        }
        let mut total = 0usize;
        for w in 0..64u64 {
            assert_eq!(
                idx.matches_packed(w).len(),
                counts[w as usize],
                "word {w} slice length"
            );
            total += counts[w as usize];
        }
        assert_eq!(total, idx.hit_count());
    }

    /* --------------------------------------------------------------------- */
    /*  misuse and state round-trips                                         */
    /* --------------------------------------------------------------------- */

    #[test]
    fn query_length_must_equal_k() {
        let idx = index(3, &[("sec0", "ACGT")], &[]);
        assert!(matches!(
            idx.matches(b"ACGT"),
            Err(GraphError::QueryLength {
                expected: 3,
                got: 4
            })
        ));
        assert!(matches!(
            idx.matches(b""),
            Err(GraphError::QueryLength { .. })
        ));
    }

    #[test]
    fn rebuilding_after_disable_is_idempotent() {
        let idx = index(3, &[("sec0", "ACGT"), ("sec1", "TTTT")], &[]);
        let before = sorted_hits(&idx, "TTT");

        let acv = idx.disable_index();
        let idx = acv.build_index().unwrap();
        assert_eq!(sorted_hits(&idx, "TTT"), before);
    }

    #[test]
    fn melt_extend_and_reindex_sees_new_material() {
        let idx = index(3, &[("sec0", "ACGT")], &[]);
        assert!(idx.matches(b"TTT").unwrap().is_empty());

        let mut pool = idx.disable_index().melt();
        pool.append_segment("sec1", b"TTTT").unwrap();
        let idx = pool.freeze().unwrap().build_index().unwrap();

        assert_eq!(sorted_hits(&idx, "ACG"), vec![(0, 0)]);
        // sec1 allocated after the first freeze's sentinel
        assert_eq!(sorted_hits(&idx, "TTT"), vec![(4, 0), (4, 1)]);
    }

    #[test]
    fn persistence_is_reserved() {
        let idx = index(3, &[("sec0", "ACGT")], &[]);
        let mut sink = Vec::new();
        assert!(matches!(idx.dump(&mut sink), Err(GraphError::Persistence)));
        assert!(sink.is_empty());
        let mut src = std::io::Cursor::new(Vec::new());
        assert!(matches!(Index::load(&mut src), Err(GraphError::Persistence)));
    }

    #[test]
    fn ambiguity_probe_reaches_through_the_index() {
        let idx = index(3, &[("sec0", "ACGRAC")], &[]);
        assert!(!idx.is_ambiguous(0, 3));
        assert!(idx.is_ambiguous(0, 4));
    }
}
