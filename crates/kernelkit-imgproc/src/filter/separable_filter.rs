use kernelkit_image::{Image, ImageError, PixelType};

use super::FilterConfig;
use crate::parallel::execute_rows;

fn check_kernel_1d(kernel: &[f32], axis: &str) -> Result<(), ImageError> {
    if kernel.len() % 2 == 0 {
        return Err(ImageError::InvalidKernel(format!(
            "{axis} kernel length must be odd, got {}",
            kernel.len()
        )));
    }
    if kernel.iter().any(|k| !k.is_finite()) {
        return Err(ImageError::InvalidKernel(format!(
            "{axis} kernel weights must be finite"
        )));
    }
    Ok(())
}

/// Apply a separable filter to an image.
///
/// Uses the default [`FilterConfig`]: replicated borders and automatic
/// parallelism. The kernels are used as given, no normalization happens.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel, odd length.
/// * `kernel_y` - The vertical kernel, odd length.
///
/// # Returns
///
/// A new image with the same size and channel count as `src`.
pub fn separable_filter<T: PixelType>(
    src: &Image<T>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<Image<T>, ImageError> {
    separable_filter_with_config(src, kernel_x, kernel_y, &FilterConfig::default())
}

/// Apply a separable filter with border and execution strategy control.
///
/// Runs the horizontal pass into a `f32` buffer of the same shape as `src`, then
/// the vertical pass over that buffer into the output. Rounding and saturation
/// happen once, at the end of the vertical pass.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel, odd length.
/// * `kernel_y` - The vertical kernel, odd length.
/// * `config` - The border mode and execution strategy.
pub fn separable_filter_with_config<T: PixelType>(
    src: &Image<T>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    config: &FilterConfig,
) -> Result<Image<T>, ImageError> {
    check_kernel_1d(kernel_x, "horizontal")?;
    check_kernel_1d(kernel_y, "vertical")?;

    let cols = src.cols();
    let rows = src.rows();
    let channels = src.num_channels();
    let stride = src.row_stride();
    let num_pixels = src.size().num_pixels();

    let col_lut = config.border.lookup_table(cols, kernel_x.len() / 2);
    let row_lut = config.border.lookup_table(rows, kernel_y.len() / 2);

    let src_data = src.as_slice();

    // Horizontal
    let mut temp = vec![0.0f32; src_data.len()];
    execute_rows(config.strategy, &mut temp, stride, num_pixels, |r, row_temp| {
        let row_src = &src_data[r * stride..(r + 1) * stride];
        for (c, temp_pixel) in row_temp.chunks_exact_mut(channels).enumerate() {
            let taps = &col_lut[c * kernel_x.len()..(c + 1) * kernel_x.len()];
            for (&x, &k) in taps.iter().zip(kernel_x) {
                let idx = x * channels;
                for (acc_val, &v) in temp_pixel.iter_mut().zip(&row_src[idx..idx + channels]) {
                    *acc_val += v.to_f32() * k;
                }
            }
        }
    })?;

    // Vertical
    let mut dst_data = vec![T::zero(); src_data.len()];
    execute_rows(config.strategy, &mut dst_data, stride, num_pixels, |r, row_dst| {
        let taps = &row_lut[r * kernel_y.len()..(r + 1) * kernel_y.len()];
        let mut acc = vec![0.0f32; stride];
        for (&y, &k) in taps.iter().zip(kernel_y) {
            let row_temp = &temp[y * stride..(y + 1) * stride];
            for (acc_val, &v) in acc.iter_mut().zip(row_temp) {
                *acc_val += v * k;
            }
        }
        for (dst_val, &acc_val) in row_dst.iter_mut().zip(acc.iter()) {
            *dst_val = T::from_f32(acc_val);
        }
    })?;

    Image::new(src.size(), channels, dst_data)
}
