//! Contiguous work partitions and the scoped executor that runs them.

use std::any::Any;
use std::mem;
use std::thread;

use crate::error::TransformError;

/// A contiguous index range owned by exactly one worker.
///
/// Partitions produced by [`split`] never overlap and together cover the
/// whole index space. That invariant is what makes lock-free writes into a
/// shared output buffer safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub len: usize,
}

impl Partition {
    /// One past the last index of the range.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Splits `len` indices into `workers` contiguous partitions.
///
/// The chunk size is the ceiling of `len / workers`, so earlier partitions
/// are full and trailing partitions are empty whenever there are more
/// workers than elements. Exactly `workers.max(1)` partitions come back.
pub fn split(len: usize, workers: usize) -> Vec<Partition> {
    let workers = workers.max(1);
    let chunk = (len + workers - 1) / workers;
    (0..workers)
        .map(|i| {
            let start = (i * chunk).min(len);
            let end = ((i + 1) * chunk).min(len);
            Partition {
                start,
                len: end - start,
            }
        })
        .collect()
}

/// Runs one worker per partition over disjoint chunks of `output`.
///
/// Each partition owns `partition.len * stride` consecutive output elements
/// (`stride` is 1 for vectors, the column count for row-major matrices).
/// Every worker is joined before this returns; the first panic, if any,
/// comes back as [`TransformError::WorkerPanicked`] instead of crossing the
/// join barrier unreported.
pub(crate) fn run_partitioned<T, F>(
    output: &mut [T],
    stride: usize,
    partitions: &[Partition],
    op: F,
) -> Result<(), TransformError>
where
    T: Send,
    F: Fn(Partition, &mut [T]) + Sync,
{
    thread::scope(|scope| {
        let op = &op;
        let mut rest = output;
        let mut handles = Vec::with_capacity(partitions.len());
        for &partition in partitions {
            let (chunk, tail) = mem::take(&mut rest).split_at_mut(partition.len * stride);
            rest = tail;
            handles.push(scope.spawn(move || op(partition, chunk)));
        }
        // partitions are exhaustive, so the carving must consume the buffer
        debug_assert!(rest.is_empty());

        let mut fault = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            if let Err(payload) = handle.join() {
                if fault.is_none() {
                    fault = Some(TransformError::WorkerPanicked {
                        worker,
                        message: panic_message(payload),
                    });
                }
            }
        }
        match fault {
            Some(error) => Err(error),
            None => Ok(()),
        }
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        String::from("unknown panic payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_covers_whole_range() {
        let parts = split(10, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], Partition { start: 0, len: 4 });
        assert_eq!(parts[1], Partition { start: 4, len: 4 });
        assert_eq!(parts[2], Partition { start: 8, len: 2 });
    }

    #[test]
    fn test_split_contiguous_and_exhaustive() {
        let parts = split(1000, 7);
        assert_eq!(parts[0].start, 0);
        for pair in parts.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
        assert_eq!(parts.last().unwrap().end(), 1000);
    }

    #[test]
    fn test_split_more_workers_than_elements() {
        let parts = split(5, 8);
        assert_eq!(parts.len(), 8);
        assert_eq!(parts.iter().filter(|p| !p.is_empty()).count(), 5);
        assert!(parts[5..].iter().all(|p| p.is_empty()));
        assert_eq!(parts.last().unwrap().end(), 5);
    }

    #[test]
    fn test_split_empty_domain() {
        let parts = split(0, 4);
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_split_zero_workers_clamps_to_one() {
        let parts = split(3, 0);
        assert_eq!(parts, vec![Partition { start: 0, len: 3 }]);
    }

    #[test]
    fn test_run_partitioned_writes_disjoint_chunks() {
        let parts = split(10, 4);
        let mut output = vec![0usize; 10];
        run_partitioned(&mut output, 1, &parts, |partition, chunk| {
            for (offset, slot) in chunk.iter_mut().enumerate() {
                *slot = partition.start + offset;
            }
        })
        .unwrap();
        let expected: Vec<usize> = (0..10).collect();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_run_partitioned_strided_chunks() {
        let parts = split(3, 2);
        let mut output = vec![0u32; 12];
        run_partitioned(&mut output, 4, &parts, |partition, chunk| {
            assert_eq!(chunk.len(), partition.len * 4);
            chunk.fill(partition.start as u32 + 1);
        })
        .unwrap();
        assert_eq!(output[..8], [1, 1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(output[8..], [3, 3, 3, 3]);
    }

    #[test]
    fn test_run_partitioned_surfaces_panic_after_join() {
        let parts = split(8, 4);
        let mut output = vec![0u32; 8];
        let result = run_partitioned(&mut output, 1, &parts, |partition, chunk| {
            if partition.start == 2 {
                panic!("slice rejected");
            }
            chunk.fill(1);
        });
        match result {
            Err(TransformError::WorkerPanicked { worker, message }) => {
                assert_eq!(worker, 1);
                assert!(message.contains("slice rejected"));
            }
            other => panic!("expected a worker fault, got {:?}", other),
        }
        // the remaining workers still ran to completion
        assert_eq!(output[..2], [1, 1]);
        assert_eq!(output[4..], [1, 1, 1, 1]);
    }
}
