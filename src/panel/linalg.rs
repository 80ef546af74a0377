use nalgebra::{DMatrix, DVector};

/// Pivot magnitudes below this are replaced by it (sign kept).
pub const PIVOT_FLOOR: f64 = 1e-12;

/// Result of a dense solve.
#[derive(Debug, Clone)]
pub struct DenseSolve {
    pub x: DVector<f64>,
    /// Number of elimination steps whose pivot had to be floored.
    pub floored_pivots: usize,
}

/// Solve `a · x = b` by Gaussian elimination with partial pivoting.
///
/// Never fails: a singular or near-singular system gets its small pivots
/// floored and yields a (possibly meaningless) finite answer.
pub fn solve_dense(mut a: DMatrix<f64>, mut b: DVector<f64>) -> DenseSolve {
    let n = b.len();
    debug_assert_eq!(a.nrows(), n);
    debug_assert_eq!(a.ncols(), n);

    let mut floored_pivots = 0;

    for k in 0..n {
        // Partial pivot: largest magnitude in column k at or below the diagonal
        let pivot_row = (k..n)
            .max_by(|&i, &j| a[(i, k)].abs().total_cmp(&a[(j, k)].abs()))
            .unwrap_or(k);
        if pivot_row != k {
            a.swap_rows(k, pivot_row);
            b.swap_rows(k, pivot_row);
        }

        let mut pivot = a[(k, k)];
        if pivot.abs() < PIVOT_FLOOR {
            pivot = if pivot < 0.0 { -PIVOT_FLOOR } else { PIVOT_FLOOR };
            a[(k, k)] = pivot;
            floored_pivots += 1;
        }

        for i in (k + 1)..n {
            let factor = a[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            a[(i, k)] = 0.0;
            for j in (k + 1)..n {
                a[(i, j)] -= factor * a[(k, j)];
            }
            b[i] -= factor * b[k];
        }
    }

    // Back substitution
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut acc = b[i];
        for j in (i + 1)..n {
            acc -= a[(i, j)] * x[j];
        }
        x[i] = acc / a[(i, i)];
    }

    DenseSolve { x, floored_pivots }
}
