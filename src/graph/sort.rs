//! Record sorting by a 64-bit key prefix.
//!
//! Both the link pair buffer and the k-mer tuple vector are laid out so
//! that their primary sort key fits one unsigned 64-bit value; sorting is
//! delegated to rayon when a thread hint above 1 is given.

use rayon::prelude::*;

/// A record whose leading 8 bytes form its sort key.
pub trait PrefixKey {
    fn prefix_key(&self) -> u64;
}

/// Sort `items` ascending by prefix key. Stability is not guaranteed.
pub fn sort_by_prefix<T: PrefixKey + Send>(items: &mut [T], num_threads: usize) {
    if num_threads > 1 {
        items.par_sort_unstable_by_key(PrefixKey::prefix_key);
    } else {
        items.sort_unstable_by_key(PrefixKey::prefix_key);
    }
}
