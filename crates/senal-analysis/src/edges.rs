//! Clock edge detection.

/// Level separating a clock's low state from its high state.
pub const CLOCK_THRESHOLD: f64 = 0.5;

/// Returns true if sample `i` is a rising edge: the previous sample is at or
/// below `threshold` and this one is above it.
///
/// Sample 0 is never an edge, since it has no predecessor.
#[inline]
pub fn is_rising_edge(clock: &[f64], i: usize, threshold: f64) -> bool {
    i > 0 && i < clock.len() && clock[i - 1] <= threshold && clock[i] > threshold
}

/// Indices of every rising edge in `clock`.
pub fn rising_edges(clock: &[f64], threshold: f64) -> Vec<usize> {
    (1..clock.len())
        .filter(|&i| is_rising_edge(clock, i, threshold))
        .collect()
}

/// Clock frequency estimated from the mean spacing of rising edges.
///
/// Returns `None` with fewer than two edges.
pub fn estimate_clock_frequency(clock: &[f64], sample_rate: f64) -> Option<f64> {
    let edges = rising_edges(clock, CLOCK_THRESHOLD);
    if edges.len() < 2 {
        return None;
    }
    let span = (edges[edges.len() - 1] - edges[0]) as f64;
    let mean_period = span / (edges.len() - 1) as f64;
    Some(sample_rate / mean_period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(period: usize, high: usize, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| if i % period < high { 1.0 } else { 0.0 })
            .collect()
    }

    #[test]
    fn initial_high_is_not_an_edge() {
        let clock = square(4, 2, 12);
        assert_eq!(rising_edges(&clock, CLOCK_THRESHOLD), [4, 8]);
    }

    #[test]
    fn threshold_is_inclusive_on_the_low_side() {
        let clock = [0.0, 0.5, 0.51, 0.5, 1.0];
        assert_eq!(rising_edges(&clock, CLOCK_THRESHOLD), [2, 4]);
    }

    #[test]
    fn out_of_range_index_is_not_an_edge() {
        assert!(!is_rising_edge(&[0.0, 1.0], 5, CLOCK_THRESHOLD));
        assert!(!is_rising_edge(&[], 0, CLOCK_THRESHOLD));
    }

    #[test]
    fn estimates_frequency_from_edge_spacing() {
        let clock = square(44, 22, 44100);
        let f = estimate_clock_frequency(&clock, 44100.0).unwrap();
        assert!((f - 44100.0 / 44.0).abs() < 1e-9);
    }

    #[test]
    fn single_edge_gives_no_estimate() {
        assert_eq!(estimate_clock_frequency(&[0.0, 1.0, 1.0], 100.0), None);
    }
}
