use crate::error::Error;
use sampling::source::Source;

/// Dense row-major matrix of residues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl Matrix {
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Builds a matrix from its rows. Fails if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, Error> {
        let cols: usize = rows.first().map_or(0, |row| row.len());
        if let Some(row) = rows.iter().find(|row| row.len() != cols) {
            return Err(Error::DimensionMismatch {
                expected: (rows.len(), cols),
                got: (rows.len(), row.len()),
            });
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// A single-row matrix is treated as a vector operand.
    pub fn is_vector(&self) -> bool {
        self.rows == 1
    }

    /// Returns the entry at (i, j), or None outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> Option<u64> {
        (i < self.rows && j < self.cols).then(|| self.data[i * self.cols + j])
    }

    /// Returns the entry at (i, j), or zero outside the matrix.
    pub fn at(&self, i: usize, j: usize) -> u64 {
        self.get(i, j).unwrap_or(0)
    }

    /// Sets the entry at (i, j). Returns false if (i, j) is outside the matrix.
    pub fn set(&mut self, i: usize, j: usize, v: u64) -> bool {
        if i < self.rows && j < self.cols {
            self.data[i * self.cols + j] = v;
            true
        } else {
            false
        }
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res: Matrix = Matrix::zero(self.cols, self.rows);
        (0..self.rows).for_each(|i| {
            (0..self.cols).for_each(|j| {
                res.data[j * self.rows + i] = self.data[i * self.cols + j];
            })
        });
        res
    }

    /// Fills the matrix with uniform values in [0, p).
    pub fn randomize(&mut self, p: u64, source: &mut Source) {
        source.fill_mod(p, &mut self.data);
    }

    /// Returns `self * other mod p`.
    pub fn mul_mod(&self, other: &Matrix, p: u64) -> Result<Matrix, Error> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                expected: (self.cols, other.cols),
                got: (other.rows, other.cols),
            });
        }
        let q: u128 = p as u128;
        let mut res: Matrix = Matrix::zero(self.rows, other.cols);
        (0..self.rows).for_each(|i| {
            (0..other.cols).for_each(|j| {
                let acc: u128 = (0..self.cols).fold(0u128, |acc, k| {
                    (acc + self.at(i, k) as u128 * other.at(k, j) as u128) % q
                });
                res.data[i * other.cols + j] = acc as u64;
            })
        });
        Ok(res)
    }

    /// True if both matrices have the same shape and agree entry-wise mod p.
    pub fn is_same(&self, other: &Matrix, p: u64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a % p == b % p)
    }
}
