//! Local pattern histogram of a series.
//!
//! The series is folded row-major into rows of `row_width` samples. Every
//! interior cell gets an 8-bit code, one bit per neighbour that is greater than
//! or equal to the cell; the normalised histogram of codes is the signature.

pub const SIGNATURE_BINS: usize = 256;

// (row, col) offsets, bit 0 first
const NEIGHBOURS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Normalised 256-bin pattern histogram; all zeros when the fold has no interior cell.
pub fn pattern_signature(values: &[f64], row_width: usize) -> Vec<f64> {
    let mut histogram = vec![0.0; SIGNATURE_BINS];
    if row_width < 3 {
        return histogram;
    }

    let rows = values.len() / row_width;
    if rows < 3 {
        return histogram;
    }

    let cell = |row: usize, col: usize| values[row * row_width + col];
    let mut count = 0usize;

    for row in 1..rows - 1 {
        for col in 1..row_width - 1 {
            let centre = cell(row, col);
            let mut code = 0usize;
            for (bit, (dr, dc)) in NEIGHBOURS.iter().enumerate() {
                let neighbour = cell(
                    (row as isize + dr) as usize,
                    (col as isize + dc) as usize,
                );
                if neighbour >= centre {
                    code |= 1 << bit;
                }
            }
            histogram[code] += 1.0;
            count += 1;
        }
    }

    for bin in histogram.iter_mut() {
        *bin /= count as f64;
    }
    histogram
}
