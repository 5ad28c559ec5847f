use kernelkit_image::{Image, ImageError, PixelType};

use super::kernels::Kernel;
use super::FilterConfig;
use crate::parallel::execute_rows;

/// Convolve an image with a 2D kernel.
///
/// Every output sample is the weighted sum of the K x K neighborhood of the same
/// channel, divided by the kernel divisor. Channels never mix. Neighbors past the
/// image edges are replicated from the nearest edge pixel. For `u8` images the
/// result is rounded and saturated to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The kernel to apply.
///
/// # Returns
///
/// A new image with the same size and channel count as `src`.
///
/// # Examples
///
/// ```
/// use kernelkit_image::Image;
/// use kernelkit_imgproc::filter::{convolve, kernels};
///
/// let src = Image::<u8>::from_raw(2, 1, 3, &[0, 0, 0, 90, 90, 90]).unwrap();
/// let kernel = kernels::Kernel::new(3, vec![1.0; 9], 9.0).unwrap();
/// let dst = convolve(&src, &kernel).unwrap();
///
/// assert_eq!(dst.as_slice(), &[30, 30, 30, 60, 60, 60]);
/// ```
pub fn convolve<T: PixelType>(src: &Image<T>, kernel: &Kernel) -> Result<Image<T>, ImageError> {
    convolve_with_config(src, kernel, &FilterConfig::default())
}

/// Convolve an image with a 2D kernel using the given border mode and execution strategy.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The kernel to apply.
/// * `config` - The border mode and execution strategy.
pub fn convolve_with_config<T: PixelType>(
    src: &Image<T>,
    kernel: &Kernel,
    config: &FilterConfig,
) -> Result<Image<T>, ImageError> {
    if kernel.is_identity() {
        log::trace!("identity kernel, copying {}", src.size());
        return Ok(src.clone());
    }

    let cols = src.cols();
    let rows = src.rows();
    let channels = src.num_channels();
    let size = kernel.size();
    let divisor = kernel.divisor();
    let weights = kernel.weights();

    let col_lut = config.border.lookup_table(cols, kernel.radius());
    let row_lut = config.border.lookup_table(rows, kernel.radius());

    log::trace!(
        "convolving {} x {channels} with a {size}x{size} kernel ({:?}, {})",
        src.size(),
        config.strategy,
        config.border
    );

    let src_data = src.as_slice();
    let mut dst_data = vec![T::zero(); src_data.len()];

    execute_rows(
        config.strategy,
        &mut dst_data,
        src.row_stride(),
        src.size().num_pixels(),
        |r, row_dst| {
            let row_taps = &row_lut[r * size..(r + 1) * size];
            let mut acc = vec![0.0f32; channels];

            for (c, dst_pixel) in row_dst.chunks_exact_mut(channels).enumerate() {
                let col_taps = &col_lut[c * size..(c + 1) * size];
                acc.fill(0.0);

                for (&y, kernel_row) in row_taps.iter().zip(weights.chunks_exact(size)) {
                    let row_offset = y * cols * channels;
                    for (&x, &w) in col_taps.iter().zip(kernel_row) {
                        if w == 0.0 {
                            continue;
                        }
                        let idx = row_offset + x * channels;
                        for (acc_val, &v) in acc.iter_mut().zip(&src_data[idx..idx + channels]) {
                            *acc_val += v.to_f32() * w;
                        }
                    }
                }

                for (dst_val, &acc_val) in dst_pixel.iter_mut().zip(acc.iter()) {
                    *dst_val = T::from_f32(acc_val / divisor);
                }
            }
        },
    )?;

    Image::new(src.size(), channels, dst_data)
}
