use kernelkit_image::{Image, ImageError, PixelType};

use super::kernels::{self, FilterKind};
use super::{convolve_with_config, gaussian_blur_with_config, FilterConfig, GaussianParams};

/// Apply a catalog filter to an image.
///
/// [`FilterKind::GaussianBlur`] runs as a separable blur with
/// [`GaussianParams::default`]; every other filter convolves with its catalog
/// kernel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kind` - The filter to apply.
///
/// # Examples
///
/// ```
/// use kernelkit_image::Image;
/// use kernelkit_imgproc::filter::{apply_filter, kernels::FilterKind};
///
/// let src = Image::<u8>::from_size_val([4, 4].into(), 3, 100).unwrap();
///
/// for kind in FilterKind::ALL {
///     let dst = apply_filter(&src, kind).unwrap();
///     assert_eq!(dst.size(), src.size());
/// }
/// ```
pub fn apply_filter<T: PixelType>(src: &Image<T>, kind: FilterKind) -> Result<Image<T>, ImageError> {
    apply_filter_with_config(src, kind, &FilterConfig::default())
}

/// Apply a catalog filter to an image with border and execution strategy control.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kind` - The filter to apply.
/// * `config` - The border mode and execution strategy.
pub fn apply_filter_with_config<T: PixelType>(
    src: &Image<T>,
    kind: FilterKind,
    config: &FilterConfig,
) -> Result<Image<T>, ImageError> {
    log::trace!("applying {kind} to {}", src.size());
    match kind {
        FilterKind::GaussianBlur => {
            gaussian_blur_with_config(src, GaussianParams::default(), config)
        }
        _ => convolve_with_config(src, &kernels::kernel(kind), config),
    }
}

/// Apply a catalog filter to a raw interleaved 8-bit buffer.
///
/// The buffer is validated before anything is computed.
///
/// # Arguments
///
/// * `width` - The width of the image in pixels.
/// * `height` - The height of the image in pixels.
/// * `channels` - 3 for RGB, 4 for RGBA.
/// * `data` - The samples, row-major with interleaved channels and no row padding.
/// * `kind` - The filter to apply.
///
/// # Returns
///
/// The filtered samples, same length and layout as `data`.
///
/// # Errors
///
/// [`ImageError::InvalidDimensions`] or [`ImageError::BufferLengthMismatch`] if
/// the buffer does not describe a valid image.
pub fn apply_filter_raw(
    width: usize,
    height: usize,
    channels: usize,
    data: &[u8],
    kind: FilterKind,
) -> Result<Vec<u8>, ImageError> {
    let src = Image::from_raw(width, height, channels, data)?;
    Ok(apply_filter(&src, kind)?.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{convolve, gaussian_blur};

    #[test]
    fn test_dispatch_matches_engines() -> Result<(), ImageError> {
        let data = (0..6 * 5 * 4).map(|v| (v * 13 % 256) as u8).collect::<Vec<_>>();
        let src = Image::<u8>::from_raw(6, 5, 4, &data)?;

        for kind in FilterKind::ALL {
            let dst = apply_filter(&src, kind)?;
            let expected = match kind {
                FilterKind::GaussianBlur => gaussian_blur(&src, GaussianParams::default())?,
                _ => convolve(&src, &kernels::kernel(kind))?,
            };
            assert_eq!(dst, expected, "{kind}");
        }
        Ok(())
    }

    #[test]
    fn test_apply_filter_raw() -> Result<(), ImageError> {
        let data = vec![100u8; 4 * 4 * 3];
        let out = apply_filter_raw(4, 4, 3, &data, FilterKind::BoxBlur)?;
        assert_eq!(out, data);

        let out = apply_filter_raw(2, 1, 4, &[1, 2, 3, 4, 5, 6, 7, 8], FilterKind::Identity)?;
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        Ok(())
    }

    #[test]
    fn test_apply_filter_raw_validates_first() {
        assert_eq!(
            apply_filter_raw(0, 4, 3, &[], FilterKind::Sharpen),
            Err(ImageError::InvalidDimensions(0, 4, 3))
        );
        assert_eq!(
            apply_filter_raw(2, 2, 1, &[0; 4], FilterKind::Sharpen),
            Err(ImageError::InvalidDimensions(2, 2, 1))
        );
        assert_eq!(
            apply_filter_raw(2, 2, 3, &[0; 13], FilterKind::EdgeDetect),
            Err(ImageError::BufferLengthMismatch(13, 12))
        );
    }
}
