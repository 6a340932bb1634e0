use thiserror::Error;

/// Failure modes of the chunked transforms.
/// Precondition violations are raised before any worker is dispatched;
/// worker faults are raised only after every worker has been joined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The elementwise sum requires operands of equal length.
    #[error("operand lengths differ: left has {left} elements, right has {right}")]
    LengthMismatch { left: usize, right: usize },
    /// A worker panicked while computing its partition.
    #[error("worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },
}
