//! Elementwise sum and outer product, sequential and chunked-parallel.

use crate::error::TransformError;
use crate::matrix::Matrix;
use crate::partition;

/// Selects which binary operation a [`transform`] call performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sum,
    Outer,
}

/// Result shape of a [`transform`] call: one-dimensional for sums,
/// two-dimensional for outer products.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutput {
    Vector(Vec<f64>),
    Matrix(Matrix),
}

/// Sums two vectors sequentially.
///
/// Fails with [`TransformError::LengthMismatch`] when the operands do not
/// share the same length; nothing is allocated in that case.
pub fn add(left: &[f64], right: &[f64]) -> Result<Vec<f64>, TransformError> {
    check_lengths(left, right)?;
    Ok(left.iter().zip(right).map(|(a, b)| a + b).collect())
}

/// Computes the outer product sequentially. Operand lengths may differ: the
/// result has one row per left element and one column per right element.
pub fn outer(left: &[f64], right: &[f64]) -> Matrix {
    let mut result = Matrix::zeros(left.len(), right.len());
    for (row, &a) in left.iter().enumerate() {
        for (col, &b) in right.iter().enumerate() {
            result.set(row, col, a * b);
        }
    }
    result
}

/// Sums two vectors with one worker per partition.
///
/// Each worker reads only its slice of both operands and writes only its
/// slice of the output. The call returns once every worker has joined, so
/// the caller never observes a partially filled result.
pub fn par_add(left: &[f64], right: &[f64], workers: usize) -> Result<Vec<f64>, TransformError> {
    check_lengths(left, right)?;
    let partitions = partition::split(left.len(), workers);
    let mut output = vec![0.0; left.len()];
    partition::run_partitioned(&mut output, 1, &partitions, |part, chunk| {
        let lhs = &left[part.start..part.end()];
        let rhs = &right[part.start..part.end()];
        for (slot, (a, b)) in chunk.iter_mut().zip(lhs.iter().zip(rhs)) {
            *slot = a + b;
        }
    })?;
    Ok(output)
}

/// Computes the outer product with one worker per row block.
///
/// Workers share a read-only view of `right`; each fills the rows that
/// belong to its slice of `left`.
pub fn par_outer(left: &[f64], right: &[f64], workers: usize) -> Result<Matrix, TransformError> {
    let cols = right.len();
    let mut output = Matrix::zeros(left.len(), cols);
    if left.is_empty() || cols == 0 {
        return Ok(output);
    }
    let partitions = partition::split(left.len(), workers);
    partition::run_partitioned(output.as_mut_slice(), cols, &partitions, |part, block| {
        for (offset, row) in block.chunks_mut(cols).enumerate() {
            let a = left[part.start + offset];
            for (cell, &b) in row.iter_mut().zip(right) {
                *cell = a * b;
            }
        }
    })?;
    Ok(output)
}

/// Invocation boundary: runs the selected operation across `workers`
/// partitions and wraps the result in the matching output shape.
pub fn transform(
    left: &[f64],
    right: &[f64],
    operation: Operation,
    workers: usize,
) -> Result<TransformOutput, TransformError> {
    match operation {
        Operation::Sum => par_add(left, right, workers).map(TransformOutput::Vector),
        Operation::Outer => par_outer(left, right, workers).map(TransformOutput::Matrix),
    }
}

fn check_lengths(left: &[f64], right: &[f64]) -> Result<(), TransformError> {
    if left.len() != right.len() {
        return Err(TransformError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
