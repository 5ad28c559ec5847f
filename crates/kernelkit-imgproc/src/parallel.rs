use rayon::prelude::*;
use thiserror::Error;

use kernelkit_image::ImageError;

/// Pixel count from which [`ExecutionStrategy::Auto`] switches to parallel execution.
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0")]
    InvalidRowStride,
}

impl From<ParallelError> for ImageError {
    fn from(err: ParallelError) -> Self {
        ImageError::ParallelExecution(err.to_string())
    }
}

/// Controls how the rows of a filter are scheduled.
///
/// Rows are written to disjoint slices of the output buffer, so every strategy
/// produces exactly the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    Parallel,

    /// Parallel for images of at least [`AUTO_PARALLEL_MIN_PIXELS`] pixels, serial otherwise.
    #[default]
    Auto,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels would run on worker threads.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel | ExecutionStrategy::Fixed(_) => true,
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
        }
    }
}

/// Apply a function to every row of a destination buffer with the given strategy.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst` - The destination buffer, a whole number of rows.
/// * `row_stride` - The number of elements in a row.
/// * `num_pixels` - The pixel count used by [`ExecutionStrategy::Auto`].
/// * `op` - Called with the row index and the mutable row slice.
pub fn execute_rows<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    row_stride: usize,
    num_pixels: usize,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_stride == 0 {
        return Err(ParallelError::InvalidRowStride);
    }

    match strategy {
        ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_mut(row_stride)
                    .enumerate()
                    .for_each(|(r, row)| op(r, row));
            });
        }
        _ if strategy.is_parallel(num_pixels) => {
            dst.par_chunks_mut(row_stride)
                .enumerate()
                .for_each(|(r, row)| op(r, row));
        }
        _ => {
            dst.chunks_mut(row_stride)
                .enumerate()
                .for_each(|(r, row)| op(r, row));
        }
    }

    Ok(())
}
