//! k-mer extraction from string content.

use ahash::AHashSet;

/// Extract the unique k-mers (contiguous k-byte windows) of `content`.
///
/// Content shorter than `k` yields no k-mers — not an error; such strings
/// simply contribute nothing to the index.
pub fn kmers(content: &[u8], k: usize) -> Vec<Box<[u8]>> {
    if k == 0 || content.len() < k {
        return Vec::new();
    }

    let mut seen: AHashSet<&[u8]> = AHashSet::new();
    for window in content.windows(k) {
        seen.insert(window);
    }

    seen.into_iter().map(Box::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmers_basic() {
        let kmers = kmers(b"ABCDE", 3);
        // "ABCDE" → ["ABC", "BCD", "CDE"]
        assert_eq!(kmers.len(), 3);
        assert!(kmers.contains(&Box::from(&b"ABC"[..])));
        assert!(kmers.contains(&Box::from(&b"BCD"[..])));
        assert!(kmers.contains(&Box::from(&b"CDE"[..])));
    }

    #[test]
    fn test_kmers_short_content() {
        assert!(kmers(b"AB", 3).is_empty());
        assert!(kmers(b"A", 3).is_empty());
        assert!(kmers(b"", 3).is_empty());
    }

    #[test]
    fn test_kmers_exact_length() {
        let kmers = kmers(b"ABC", 3);
        assert_eq!(kmers.len(), 1);
        assert!(kmers.contains(&Box::from(&b"ABC"[..])));
    }

    #[test]
    fn test_kmers_deduplicates() {
        // "AAAA" has only one unique 3-mer: "AAA".
        let kmers = kmers(b"AAAA", 3);
        assert_eq!(kmers.len(), 1);
        assert!(kmers.contains(&Box::from(&b"AAA"[..])));
    }

    #[test]
    fn test_kmers_other_lengths() {
        assert_eq!(kmers(b"ABCD", 2).len(), 3);
        assert_eq!(kmers(b"ABCD", 4).len(), 1);
        assert!(kmers(b"ABCD", 5).is_empty());
    }

    #[test]
    fn test_kmers_zero_k() {
        assert!(kmers(b"ABCD", 0).is_empty());
    }
}
