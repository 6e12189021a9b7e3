//! Dense distance matrix.

use crate::error::ProblemError;

/// A dense n×n distance matrix stored in row-major order.
///
/// May be symmetric or asymmetric. [`DistanceMatrix::validate`] checks the
/// invariants a [`Problem`](crate::models::Problem) relies on: every entry
/// finite and non-negative, zero on the diagonal.
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 4.0],
///     vec![8.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 2), 8.0);
/// assert_eq!(dm.path_length(&[0, 1, 2, 0]), 17.0);
/// assert!(dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// Fails if the rows do not form a square grid. Values are not checked
    /// here; see [`DistanceMatrix::validate`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ProblemError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ProblemError::RaggedMatrix {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets the distance in both directions.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Copies the matrix back into rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(|r| r.to_vec()).collect()
    }

    /// Sum of consecutive pairwise distances along `path`.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Checks that all entries are finite and non-negative and the diagonal is zero.
    pub fn validate(&self) -> Result<(), ProblemError> {
        for from in 0..self.size {
            for to in 0..self.size {
                let value = self.get(from, to);
                if !value.is_finite() || value < 0.0 {
                    return Err(ProblemError::InvalidDistance { from, to, value });
                }
                if from == to && value != 0.0 {
                    return Err(ProblemError::NonZeroDiagonal { node: from, value });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties go to the earliest candidate. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}
