/// An error type for the image and filter modules.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Error when the width or height is zero, the channel count is not 3 or 4, or
    /// the sample count overflows.
    #[error("Invalid image dimensions: {0}x{1} with {2} channels")]
    InvalidDimensions(usize, usize, usize),

    /// Error when the sample buffer does not hold exactly `width * height * channels` values.
    #[error("Data length ({0}) does not match the image size ({1})")]
    BufferLengthMismatch(usize, usize),

    /// Error when a kernel cannot be used for convolution.
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the work could not be scheduled on the worker threads.
    #[error("Parallel execution failed: {0}")]
    ParallelExecution(String),
}
