use std::ops::Range;

/// Split `0..len` into at most `workers` contiguous ranges.
///
/// Ranges are non-empty, ordered, and cover every index exactly once. Sizes
/// differ by at most one: the first `len % workers` ranges get the extra
/// element. An empty input (or zero workers) yields no ranges.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 || workers == 0 {
        return Vec::new();
    }

    // Never hand a worker an empty slice
    let parts = std::cmp::min(workers, len);
    let base = len / parts;
    let remainder = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let size = base + usize::from(part < remainder);
        ranges.push(start..start + size);
        start += size;
    }

    debug_assert_eq!(start, len);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(ranges: &[Range<usize>], len: usize) {
        let mut expected_start = 0;
        for range in ranges {
            assert_eq!(range.start, expected_start, "ranges must be contiguous");
            assert!(!range.is_empty(), "ranges must be non-empty");
            expected_start = range.end;
        }
        assert_eq!(expected_start, len, "ranges must cover the input");
    }

    #[test]
    fn test_empty_input_has_no_ranges() {
        assert!(partition(0, 8).is_empty());
    }

    #[test]
    fn test_zero_workers_has_no_ranges() {
        assert!(partition(10, 0).is_empty());
    }

    #[test]
    fn test_even_split() {
        let ranges = partition(16, 4);
        assert_eq!(ranges, vec![0..4, 4..8, 8..12, 12..16]);
    }

    #[test]
    fn test_uneven_split_front_loads_remainder() {
        let ranges = partition(10, 4);
        assert_eq!(ranges, vec![0..3, 3..6, 6..8, 8..10]);
    }

    #[test]
    fn test_more_workers_than_items() {
        let ranges = partition(3, 8);
        assert_eq!(ranges.len(), 3);
        assert_covers(&ranges, 3);
    }

    #[test]
    fn test_coverage_over_many_shapes() {
        for len in [1, 2, 7, 64, 1000, 1001] {
            for workers in [1, 2, 3, 8, 13] {
                let ranges = partition(len, workers);
                assert!(ranges.len() <= workers);
                assert_covers(&ranges, len);

                let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
                let max = sizes.iter().max().copied().unwrap_or(0);
                let min = sizes.iter().min().copied().unwrap_or(0);
                assert!(max - min <= 1, "len={len} workers={workers} sizes={sizes:?}");
            }
        }
    }
}
