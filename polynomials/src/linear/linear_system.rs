use thiserror::Error;
use tracing::{debug, trace};

// A square real system A * c = Y, solved in place.
// Each call owns its own copy, nothing is shared between solves.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub matrix: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("matrix has {rows} rows but right-hand side has {rhs} entries")]
    ShapeMismatch { rows: usize, rhs: usize },
    #[error("row {row} has {columns} columns, expected {expected}")]
    NotSquare { row: usize, columns: usize, expected: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("system is singular: pivot in column {column} is {pivot}")]
    Singular { column: usize, pivot: f64 },
}

impl LinearSystem {
    pub fn new(matrix: Vec<Vec<f64>>, rhs: Vec<f64>) -> Result<Self, ShapeError> {
        if matrix.len() != rhs.len() {
            return Err(ShapeError::ShapeMismatch { rows: matrix.len(), rhs: rhs.len() });
        }
        let expected = matrix.len();
        if let Some((row, columns)) = matrix
            .iter()
            .map(|row| row.len())
            .enumerate()
            .find(|(_, columns)| *columns != expected)
        {
            return Err(ShapeError::NotSquare { row, columns, expected });
        }

        Ok(LinearSystem { matrix, rhs })
    }

    // Vandermonde system for the degree n - 1 polynomial through n points (x, y).
    // Row i, column (degree - j) holds x_i^j, so the last column is the constant term.
    pub fn vandermonde(points: &[(f64, f64)]) -> Self {
        let degree = points.len().saturating_sub(1);
        let (matrix, rhs): (Vec<Vec<f64>>, Vec<f64>) = points
            .iter()
            .map(|(x, y)| {
                let mut row = vec![0.0; degree + 1];
                for j in 0..=degree {
                    row[degree - j] = x.powi(j as i32);
                }
                (row, *y)
            })
            .unzip();

        LinearSystem { matrix, rhs }
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    // Gaussian elimination with partial pivoting followed by back substitution.
    // Returns the unknowns in column order.
    pub fn solve(mut self) -> Result<Vec<f64>, SolveError> {
        let n = self.len();

        for i in 0..n {
            let pivot_row = self.pivot_row(i);
            let pivot = self.matrix[pivot_row][i];
            // Equal rows stay bit-identical through elimination and cancel to an exact zero.
            // Small but nonzero pivots are kept, rounding catches the precision they lose.
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(SolveError::Singular { column: i, pivot });
            }

            if pivot_row != i {
                trace!(column = i, from = pivot_row, "swapping pivot row");
                self.matrix.swap(pivot_row, i);
                self.rhs.swap(pivot_row, i);
            }

            for k in (i + 1)..n {
                let c = -self.matrix[k][i] / self.matrix[i][i];
                for j in i..n {
                    if i == j {
                        self.matrix[k][j] = 0.0;
                    } else {
                        self.matrix[k][j] += c * self.matrix[i][j];
                    }
                }
                self.rhs[k] += c * self.rhs[i];
            }
        }

        let mut solution = vec![0.0; n];
        for i in (0..n).rev() {
            solution[i] = self.rhs[i] / self.matrix[i][i];
            for k in (0..i).rev() {
                self.rhs[k] -= self.matrix[k][i] * solution[i];
            }
        }

        debug!(unknowns = n, ?solution, "solved linear system");
        Ok(solution)
    }

    // first row in [column, n) with the largest absolute value in `column`
    fn pivot_row(&self, column: usize) -> usize {
        let mut max_el = self.matrix[column][column].abs();
        let mut max_row = column;
        for k in (column + 1)..self.len() {
            if self.matrix[k][column].abs() > max_el {
                max_el = self.matrix[k][column].abs();
                max_row = k;
            }
        }
        max_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_vandermonde_layout() {
        let system = LinearSystem::vandermonde(&[(2.0, 5.0), (3.0, 7.0)]);
        assert_eq!(system.matrix, vec![vec![2.0, 1.0], vec![3.0, 1.0]]);
        assert_eq!(system.rhs, vec![5.0, 7.0]);

        let system = LinearSystem::vandermonde(&[(1.0, 12.0), (2.0, 23.0), (3.0, 40.0)]);
        assert_eq!(system.matrix[2], vec![9.0, 3.0, 1.0]);
    }

    #[test]
    fn test_solve_quadratic() {
        // 3x^2 + 2x + 7
        let system = LinearSystem::vandermonde(&[(1.0, 12.0), (2.0, 23.0), (3.0, 40.0)]);
        assert_close(&system.solve().unwrap(), &[3.0, 2.0, 7.0]);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        // a zero in the leading position must be swapped out
        let system = LinearSystem::new(
            vec![vec![0.0, 1.0], vec![1.0, 1.0]],
            vec![2.0, 5.0],
        ).unwrap();
        assert_close(&system.solve().unwrap(), &[3.0, 2.0]);
    }

    #[test]
    fn test_pivot_row_prefers_largest_and_first_on_ties() {
        let system = LinearSystem::new(
            vec![vec![1.0, 0.0, 0.0], vec![-4.0, 1.0, 0.0], vec![4.0, 0.0, 1.0]],
            vec![0.0; 3],
        ).unwrap();
        assert_eq!(system.pivot_row(0), 1);
    }

    #[test]
    fn test_solve_singular() {
        let system = LinearSystem::vandermonde(&[(1.0, 5.0), (1.0, 9.0)]);
        assert!(matches!(system.solve(), Err(SolveError::Singular { column: 1, .. })));

        let system = LinearSystem::vandermonde(&[(2.0, 4.0), (2.0, 5.0), (3.0, 6.0)]);
        assert!(matches!(system.solve(), Err(SolveError::Singular { .. })));
    }

    #[test]
    fn test_small_pivot_is_not_singular() {
        // the second pivot is tiny next to the first but still carries the answer
        let system = LinearSystem::new(
            vec![vec![1e12, 1.0], vec![0.0, 1e-5]],
            vec![1e12 + 1.0, 1e-5],
        ).unwrap();
        assert_close(&system.solve().unwrap(), &[1.0, 1.0]);
    }

    #[test]
    fn test_shape_checks() {
        assert_eq!(
            LinearSystem::new(vec![vec![1.0]], vec![1.0, 2.0]).unwrap_err(),
            ShapeError::ShapeMismatch { rows: 1, rhs: 2 }
        );
        assert_eq!(
            LinearSystem::new(vec![vec![1.0, 2.0], vec![1.0]], vec![1.0, 2.0]).unwrap_err(),
            ShapeError::NotSquare { row: 1, columns: 1, expected: 2 }
        );
    }

    #[test]
    fn test_empty_system() {
        let system = LinearSystem::new(vec![], vec![]).unwrap();
        assert!(system.is_empty());
        assert_eq!(system.solve().unwrap(), Vec::<f64>::new());
    }
}
