//! Dense matrix value used by generated programs.
//!
//! Elements are `f32` stored row-major in one buffer. The text format
//! read by [`Matrix::matrix_read`] and written by `Display` is a
//! `rows cols` header line followed by `rows * cols` whitespace-separated
//! values in row-major order.

use crate::utils::errors::MatrixError;
use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::ops::{Add, Index, IndexMut, Mul};
use std::path::Path;
use std::str::FromStr;

/// A dense 2-D matrix of `f32` with at least one row and one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Create a zero-filled `rows x cols` matrix. Both dimensions must be
    /// positive, and the buffer must be allocatable.
    pub fn new(rows: i64, cols: i64) -> Result<Self, MatrixError> {
        let (r, c, len) = Self::shape(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::TooLarge { rows, cols })?;
        data.resize(len, 0.0);
        Ok(Self { rows: r, cols: c, data })
    }

    /// Validate a requested shape, returning `(rows, cols, rows * cols)`.
    fn shape(rows: i64, cols: i64) -> Result<(usize, usize, usize), MatrixError> {
        if rows < 1 || cols < 1 {
            return Err(MatrixError::InvalidDimensions { rows, cols });
        }
        let too_large = || MatrixError::TooLarge { rows, cols };
        let r = usize::try_from(rows).map_err(|_| too_large())?;
        let c = usize::try_from(cols).map_err(|_| too_large())?;
        let len = r.checked_mul(c).ok_or_else(too_large)?;
        Ok((r, c, len))
    }

    /// Create a matrix from row-major values.
    pub fn from_vec(rows: i64, cols: i64, values: Vec<f32>) -> Result<Self, MatrixError> {
        let mut m = Self::new(rows, cols)?;
        if values.len() != m.data.len() {
            return Err(MatrixError::MalformedBody {
                index: values.len().min(m.data.len()),
                message: format!("expected {} values, got {}", m.data.len(), values.len()),
            });
        }
        m.data = values;
        Ok(m)
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// The elements in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Get an element.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.offset(row, col).map(|i| self.data[i])
    }

    /// Get a mutable reference to an element.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f32> {
        let i = self.offset(row, col)?;
        self.data.get_mut(i)
    }

    /// The settable cell at `(row, col)`; generated code writes through it.
    pub fn access(&mut self, row: usize, col: usize) -> Option<&mut f32> {
        self.get_mut(row, col)
    }

    /// Element-wise sum. Both operands must have the same shape.
    pub fn add_elementwise(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch("add", other));
        }
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// Matrix product. The left operand's column count must equal the
    /// right operand's row count.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows {
            return Err(self.mismatch("multiply", other));
        }
        let mut data = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                data[i * other.cols + j] = (0..self.cols)
                    .map(|k| self.data[i * self.cols + k] * other.data[k * other.cols + j])
                    .sum();
            }
        }
        Ok(Matrix { rows: self.rows, cols: other.cols, data })
    }

    fn mismatch(&self, op: &'static str, other: &Matrix) -> MatrixError {
        MatrixError::DimensionMismatch {
            op,
            left_rows: self.rows,
            left_cols: self.cols,
            right_rows: other.rows,
            right_cols: other.cols,
        }
    }

    /// Parse the matrix text format from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, MatrixError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// Load a matrix from a file in the matrix text format.
    pub fn matrix_read<P: AsRef<Path>>(path: P) -> Result<Self, MatrixError> {
        let path = path.as_ref();
        debug!("reading matrix from {}", path.display());
        Self::from_reader(File::open(path)?)
    }
}

impl FromStr for Matrix {
    type Err = MatrixError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (header, body) = text.split_once('\n').unwrap_or((text, ""));
        let dims: Vec<i64> = header
            .split_whitespace()
            .map(str::parse::<i64>)
            .collect::<Result<_, _>>()
            .map_err(|_| MatrixError::MalformedHeader(header.to_string()))?;
        let (rows, cols) = match dims.as_slice() {
            [rows, cols] => (*rows, *cols),
            _ => return Err(MatrixError::MalformedHeader(header.to_string())),
        };

        // The body must hold every value before anything is allocated.
        let (_, _, len) = Matrix::shape(rows, cols)?;
        let values: Vec<&str> = body.split_whitespace().collect();
        if values.len() < len {
            return Err(MatrixError::MalformedBody {
                index: values.len(),
                message: "missing value".to_string(),
            });
        }

        let mut m = Matrix::new(rows, cols)?;
        for (index, (cell, value)) in m.data.iter_mut().zip(&values).enumerate() {
            *cell = value.parse().map_err(|e| MatrixError::MalformedBody {
                index,
                message: format!("{:?}: {}", value, e),
            })?;
        }

        let extra = values.len() - len;
        if extra > 0 {
            warn!("ignoring {} value(s) after a {}x{} matrix", extra, rows, cols);
        }
        Ok(m)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows, self.cols)?;
        for row in self.data.chunks(self.cols) {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join("  "))?;
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        match self.offset(row, col) {
            Some(i) => &self.data[i],
            None => panic!("index ({}, {}) out of bounds for {}x{} matrix", row, col, self.rows, self.cols),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        match self.offset(row, col) {
            Some(i) => &mut self.data[i],
            None => panic!("index ({}, {}) out of bounds for {}x{} matrix", row, col, self.rows, self.cols),
        }
    }
}

impl Add for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn add(self, other: Self) -> Self::Output {
        self.add_elementwise(other)
    }
}

impl Mul for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn mul(self, other: Self) -> Self::Output {
        self.multiply(other)
    }
}
