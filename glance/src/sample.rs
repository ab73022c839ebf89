//! Even-stride downsampling for chart-like series.

/// Keeps at most `max_points` entries of `indices`, evenly spaced.
///
/// The first and last entries are always kept, so the sampled series spans the same domain as
/// the input. `max_points == 0` yields an empty result; inputs already within budget are returned
/// unchanged.
pub fn downsample(indices: &[usize], max_points: usize) -> Vec<usize> {
    let len = indices.len();
    if len <= max_points {
        return indices.to_vec();
    }
    match max_points {
        0 => Vec::new(),
        1 => vec![indices[0]],
        _ => {
            let last = len - 1;
            let steps = max_points - 1;
            (0..max_points)
                .map(|k| indices[k * last / steps])
                .collect()
        }
    }
}
