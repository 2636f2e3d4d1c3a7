//! Build-once k-mer inverted index over a string corpus.

use ahash::AHashMap;
use roaring::RoaringBitmap;

use super::extract::kmers;
use super::posting::intersect;
use super::{KmerSet, DEFAULT_K};
use crate::error::MatchError;

/// Inverted index from k-mer to the set of corpus ids containing it.
///
/// String ids are dense and equal to corpus position. Postings carry set
/// membership only, no positional information. The index is built once per
/// corpus and read-only afterward; queries may run concurrently against a
/// shared reference.
#[derive(Debug, Clone)]
pub struct KmerIndex {
    k: usize,
    n_strings: u32,
    postings: AHashMap<Box<[u8]>, RoaringBitmap>,
}

impl KmerIndex {
    /// Build an index with the default k-mer length.
    pub fn build<S: AsRef<str>>(corpus: &[S]) -> Self {
        Self::build_with_k(corpus, DEFAULT_K)
    }

    /// Build an index with an explicit k-mer length.
    ///
    /// Strings shorter than `k` contribute no postings but still own an id.
    pub fn build_with_k<S: AsRef<str>>(corpus: &[S], k: usize) -> Self {
        let n_strings =
            u32::try_from(corpus.len()).expect("KmerIndex: corpus exceeds u32::MAX strings");

        let mut postings: AHashMap<Box<[u8]>, RoaringBitmap> = AHashMap::new();
        for (id, s) in corpus.iter().enumerate() {
            for kmer in kmers(s.as_ref().as_bytes(), k) {
                postings.entry(kmer).or_default().insert(id as u32);
            }
        }

        KmerIndex {
            k,
            n_strings,
            postings,
        }
    }

    /// The k-mer length this index was built with.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of strings in the indexed corpus.
    pub fn n_strings(&self) -> u32 {
        self.n_strings
    }

    /// Number of distinct k-mers in the index.
    pub fn kmer_count(&self) -> usize {
        self.postings.len()
    }

    /// Posting set for one k-mer; `None` if absent from the index.
    pub fn posting(&self, kmer: &[u8]) -> Option<&RoaringBitmap> {
        self.postings.get(kmer)
    }

    /// Intersection of the posting sets of `kmers`.
    ///
    /// A k-mer absent from the index collapses the result to the empty set
    /// without error. Zero k-mers is internal misuse: callers holding an
    /// empty mandatory set must use [`KmerIndex::candidates`], which falls
    /// back to the full corpus.
    pub fn query<I, T>(&self, kmers: I) -> Result<RoaringBitmap, MatchError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut iter = kmers.into_iter();
        let Some(first) = iter.next() else {
            return Err(MatchError::EmptyQuery);
        };

        let mut lists = Vec::new();
        for kmer in std::iter::once(first).chain(iter) {
            match self.postings.get(kmer.as_ref()) {
                Some(p) => lists.push(p),
                // Absent k-mer: no string can satisfy the conjunction.
                None => return Ok(RoaringBitmap::new()),
            }
        }

        Ok(intersect(&lists))
    }

    /// Candidate ids for a mandatory k-mer set.
    ///
    /// An empty set means "no usable filter": the full id range comes back
    /// and every string must be verified. Never "matches nothing".
    pub fn candidates(&self, kmers: &KmerSet) -> RoaringBitmap {
        if kmers.is_empty() {
            return self.all_ids();
        }

        // Non-empty input, so `query` cannot report misuse.
        self.query(kmers.iter()).unwrap_or_default()
    }

    fn all_ids(&self) -> RoaringBitmap {
        let mut all = RoaringBitmap::new();
        all.insert_range(0..self.n_strings);
        all
    }
}
