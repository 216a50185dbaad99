/// Jaccard overlap of two `(start, stop)` intervals: 0 when disjoint, 1 when identical.
pub fn overlap_score(a: (f64, f64), b: (f64, f64)) -> f64 {
    let overlap = (a.1.min(b.1) - a.0.max(b.0)).max(0.0);
    let union = (a.1 - a.0) + (b.1 - b.0) - overlap;

    if union > 0.0 {
        overlap / union
    } else {
        0.0
    }
}
