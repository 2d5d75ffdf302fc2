//! Runtime support for translated programs.
//!
//! Emitted C++ targets a `matrix` class with the same shape as [`Matrix`]:
//! a `(rows, cols)` constructor, cell access by `(row, col)`, a static
//! `matrix_read(path)` loader, and `+`/`*` operators.

pub mod matrix;

pub use matrix::Matrix;
