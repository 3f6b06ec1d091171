//! Least-squares polynomial trend fitting
//!
//! Fits an ordinary least-squares polynomial of a given degree to a cost
//! series and evaluates it at every sample point. This is a visual
//! smoothing aid for trend display, not a statistical model: no weighting,
//! no outlier rejection, no confidence intervals.

use crate::error::{ExpenseError, ExpenseResult};

/// The outcome of a polynomial fit
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Degree of the fitted polynomial
    pub degree: usize,
    /// Coefficients in ascending order of power (c0 + c1*x + c2*x^2 + ...)
    pub coefficients: Vec<f64>,
    /// The polynomial evaluated at x = 0, 1, ..., ys.len() - 1
    pub values: Vec<f64>,
}

/// Fit a polynomial of `degree` to `ys` sampled at x = 0, 1, 2, ...
///
/// Solves the normal equations of the least-squares problem with Gaussian
/// elimination. Requires `degree < ys.len()`; anything else is a
/// configuration error, never silently clamped.
pub fn fit(ys: &[f64], degree: usize) -> ExpenseResult<FitResult> {
    if degree >= ys.len() {
        return Err(ExpenseError::InvalidFitDegree {
            degree,
            points: ys.len(),
        });
    }

    let n = ys.len();
    let m = degree + 1;

    // Power sums S_k = sum(x^k) for k in 0..2*degree, and the right-hand
    // side T_k = sum(y * x^k).
    let mut power_sums = vec![0.0f64; 2 * degree + 1];
    let mut rhs = vec![0.0f64; m];
    for (i, &y) in ys.iter().enumerate() {
        let x = i as f64;
        let mut xp = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += xp;
            if k < m {
                rhs[k] += y * xp;
            }
            xp *= x;
        }
    }

    // Normal matrix A[i][j] = S_{i+j}, augmented with the right-hand side.
    let mut matrix: Vec<Vec<f64>> = (0..m)
        .map(|i| {
            let mut row: Vec<f64> = (0..m).map(|j| power_sums[i + j]).collect();
            row.push(rhs[i]);
            row
        })
        .collect();

    let coefficients = solve(&mut matrix);
    let values = (0..n).map(|x| evaluate(&coefficients, x as f64)).collect();

    Ok(FitResult {
        degree,
        coefficients,
        values,
    })
}

/// Gaussian elimination with partial pivoting on an augmented matrix
///
/// The normal matrix is nonsingular whenever degree < number of distinct
/// sample points, which `fit` guarantees; a vanishing pivot is guarded
/// anyway by leaving that coefficient at zero.
fn solve(matrix: &mut [Vec<f64>]) -> Vec<f64> {
    let m = matrix.len();

    for col in 0..m {
        let pivot_row = (col..m)
            .max_by(|&a, &b| {
                matrix[a][col]
                    .abs()
                    .partial_cmp(&matrix[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        matrix.swap(col, pivot_row);

        if matrix[col][col].abs() < f64::EPSILON {
            continue;
        }

        for row in (col + 1)..m {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..=m {
                let value = matrix[col][k];
                matrix[row][k] -= factor * value;
            }
        }
    }

    // Back substitution.
    let mut coefficients = vec![0.0f64; m];
    for col in (0..m).rev() {
        if matrix[col][col].abs() < f64::EPSILON {
            continue;
        }
        let mut sum = matrix[col][m];
        for k in (col + 1)..m {
            sum -= matrix[col][k] * coefficients[k];
        }
        coefficients[col] = sum / matrix[col][col];
    }

    coefficients
}

/// Evaluate a polynomial given ascending coefficients (Horner's method)
fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
