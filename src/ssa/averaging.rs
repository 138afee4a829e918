//! ssa::averaging — diagonal averaging (Hankelization) of an `L×K` matrix.
//!
//! Purpose
//! -------
//! Map a matrix back to a series of length `L + K − 1` by averaging each
//! anti-diagonal. For a trajectory matrix this recovers the original series
//! exactly; for a grouped eigentriple sum it yields the least-squares
//! closest series whose trajectory has that matrix's shape.
//!
//! Key behaviors
//! -------------
//! - [`diagonal_average`] returns `out[p] = mean{ m[i, j] : i + j = p }` for
//!   `p = 0, …, L + K − 2`.
//! - [`anti_diagonal_len`] gives the number of cells averaged at position
//!   `p`, i.e. `min(p + 1, L, K, L + K − 1 − p)`. The same count is the
//!   w-correlation weight of series position `p`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output length is exactly `L + K − 1`, which equals the series length
//!   `n` for any matrix sharing the trajectory's shape.
//! - Indexing by `i + j` on the matrix is the same as indexing by `j − i`
//!   on its row-reversed view with offset `L − 1`.
//! - The input is never mutated.
//!
//! Testing notes
//! -------------
//! - Unit tests check the inverse-of-embedding property, output length for
//!   wide and tall shapes, hand-computed averages, and the cell counts.
use ndarray::{Array1, ArrayView2};

/// Number of cells on anti-diagonal `p` of an `rows×cols` matrix.
///
/// Returns 0 when `p ≥ rows + cols − 1`.
#[inline]
pub fn anti_diagonal_len(p: usize, rows: usize, cols: usize) -> usize {
    let total = rows + cols - 1;
    if p >= total {
        return 0;
    }
    (p + 1).min(rows).min(cols).min(total - p)
}

/// diagonal_average — anti-diagonal means of a matrix.
///
/// Parameters
/// ----------
/// - `matrix`: `ArrayView2<f64>`
///   Any `L×K` matrix with `L, K ≥ 1`.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Series of length `L + K − 1`.
///
/// Panics
/// ------
/// - Panics on an empty matrix (`L == 0` or `K == 0`); such a matrix cannot
///   come out of the embedding.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_ssa::ssa::averaging::diagonal_average;
/// let m = array![[1.0, 2.0, 3.0],
///                [3.0, 4.0, 5.0]];
/// assert_eq!(diagonal_average(m.view()).to_vec(), vec![1.0, 2.5, 3.5, 5.0]);
/// ```
pub fn diagonal_average(matrix: ArrayView2<'_, f64>) -> Array1<f64> {
    let (rows, cols) = matrix.dim();
    assert!(rows > 0 && cols > 0, "diagonal averaging needs a non-empty matrix");

    let mut sums = Array1::<f64>::zeros(rows + cols - 1);
    for ((i, j), &value) in matrix.indexed_iter() {
        sums[i + j] += value;
    }
    for (p, sum) in sums.iter_mut().enumerate() {
        *sum /= anti_diagonal_len(p, rows, cols) as f64;
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::embedding::embed;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact inversion of the trajectory embedding.
    // - Output length L + K − 1 for wide, tall, and degenerate shapes.
    // - Averages on a non-Hankel matrix, checked by hand.
    // - `anti_diagonal_len` against a brute-force count.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that averaging a trajectory matrix returns the series itself.
    //
    // Given
    // -----
    // - A length-11 series embedded with every window L = 1..=11.
    //
    // Expect
    // ------
    // - The averaged series equals the input up to rounding in the mean of
    //   each constant anti-diagonal.
    fn diagonal_average_inverts_embedding() {
        // Arrange
        let series: Vec<f64> = (0..11).map(|t| (t as f64 * 0.9).sin() + t as f64).collect();

        for window in 1..=series.len() {
            // Act
            let x = embed(&series, window).unwrap();
            let back = diagonal_average(x.view());

            // Assert
            assert_eq!(back.len(), series.len());
            for (&a, &b) in back.iter().zip(&series) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the averages of a matrix that is not Hankel.
    //
    // Given
    // -----
    // - m = [[1, 0, 0], [0, 0, 6]] (anti-diagonals {1}, {0, 0}, {0, 0}, {6}).
    //
    // Expect
    // ------
    // - [1, 0, 0, 6].
    fn diagonal_average_non_hankel_matrix() {
        // Arrange
        let m = array![[1.0, 0.0, 0.0], [0.0, 0.0, 6.0]];

        // Act
        let out = diagonal_average(m.view());

        // Assert
        assert_eq!(out, array![1.0, 0.0, 0.0, 6.0]);
    }

    #[test]
    fn diagonal_average_output_length_is_rows_plus_cols_minus_one() {
        for (rows, cols) in [(1, 1), (1, 7), (7, 1), (3, 8), (8, 3), (5, 5)] {
            let m = Array2::<f64>::ones((rows, cols));
            let out = diagonal_average(m.view());
            assert_eq!(out.len(), rows + cols - 1);
            assert!(out.iter().all(|&v| v == 1.0));
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the closed-form cell count matches a brute-force count.
    //
    // Given
    // -----
    // - Shapes (3, 8), (8, 3), and (4, 4).
    //
    // Expect
    // ------
    // - `anti_diagonal_len(p)` equals #{(i, j) : i + j = p} for every p, and
    //   0 past the last anti-diagonal.
    fn anti_diagonal_len_matches_brute_force() {
        for (rows, cols) in [(3, 8), (8, 3), (4, 4)] {
            for p in 0..rows + cols - 1 {
                let brute = (0..rows)
                    .flat_map(|i| (0..cols).map(move |j| (i, j)))
                    .filter(|(i, j)| i + j == p)
                    .count();
                assert_eq!(anti_diagonal_len(p, rows, cols), brute, "shape ({rows},{cols}) p={p}");
            }
            assert_eq!(anti_diagonal_len(rows + cols - 1, rows, cols), 0);
        }
    }
}
