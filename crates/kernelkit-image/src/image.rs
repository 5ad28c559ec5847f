use num_traits::Zero;

use crate::error::ImageError;

/// Channel counts an [`Image`] can be built with: RGB and RGBA.
pub const SUPPORTED_CHANNELS: [usize; 2] = [3, 4];

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use kernelkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for the sample types an image can hold.
///
/// Filters accumulate in `f32` and convert back through [`PixelType::from_f32`],
/// which is where saturation happens for integer samples.
pub trait PixelType: Copy + Default + Zero + PartialEq + std::fmt::Debug + Send + Sync {
    /// Convert the sample to f32.
    fn to_f32(self) -> f32;

    /// Convert an accumulated f32 value back to the sample type.
    fn from_f32(val: f32) -> Self;
}

impl PixelType for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    /// Rounds to the nearest integer and saturates to `[0, 255]`.
    #[inline]
    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, 255.0) as u8
    }
}

impl PixelType for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(val: f32) -> Self {
        val
    }
}

/// Check that a buffer layout describes a valid image.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `channels` - The number of interleaved channels per pixel.
/// * `len` - The number of samples in the buffer.
///
/// # Errors
///
/// [`ImageError::InvalidDimensions`] if the width or height is zero, the
/// channel count is not in [`SUPPORTED_CHANNELS`] or the sample count does not
/// fit in a `usize`, and [`ImageError::BufferLengthMismatch`] if `len` is not
/// `width * height * channels`.
pub fn validate_layout(size: ImageSize, channels: usize, len: usize) -> Result<(), ImageError> {
    let expected = checked_len(size, channels)?;
    if len != expected {
        return Err(ImageError::BufferLengthMismatch(len, expected));
    }

    Ok(())
}

/// The number of samples of a valid layout, `width * height * channels`.
fn checked_len(size: ImageSize, channels: usize) -> Result<usize, ImageError> {
    let invalid = || ImageError::InvalidDimensions(size.width, size.height, channels);

    if size.width == 0 || size.height == 0 || !SUPPORTED_CHANNELS.contains(&channels) {
        return Err(invalid());
    }

    size.width
        .checked_mul(size.height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(invalid)
}

/// Represents an image with interleaved pixel data.
///
/// Samples are stored row-major with the channels of a pixel next to each other,
/// so the sample `c` of pixel `(x, y)` lives at `(y * width + x) * channels + c`.
/// There is no padding between rows.
///
/// An image never changes after construction; filters borrow it and return a
/// new image.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T = u8> {
    size: ImageSize,
    channels: usize,
    data: Vec<T>,
}

impl<T: PixelType> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels, 3 (RGB) or 4 (RGBA).
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the dimensions are invalid or the length of the pixel data does not
    /// match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use kernelkit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<T>) -> Result<Self, ImageError> {
        validate_layout(size, channels, data.len())?;
        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new image by copying a raw sample buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the image in pixels.
    /// * `height` - The height of the image in pixels.
    /// * `channels` - The number of channels, 3 (RGB) or 4 (RGBA).
    /// * `data` - The samples, `width * height * channels` of them.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: &[T],
    ) -> Result<Self, ImageError> {
        // validate before copying so a bad call never allocates
        let size = ImageSize { width, height };
        validate_layout(size, channels, data.len())?;
        Self::new(size, channels, data.to_vec())
    }

    /// Create a new image with every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kernelkit_image::Image;
    ///
    /// let image = Image::<u8>::from_size_val([4, 2].into(), 4, 7).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 4 * 2 * 4);
    /// assert!(image.as_slice().iter().all(|&v| v == 7));
    /// ```
    pub fn from_size_val(size: ImageSize, channels: usize, val: T) -> Result<Self, ImageError> {
        let len = checked_len(size, channels)?;
        Self::new(size, channels, vec![val; len])
    }

    /// Create a new image with every sample set to zero.
    pub fn zeros(size: ImageSize, channels: usize) -> Result<Self, ImageError> {
        Self::from_size_val(size, channels, T::zero())
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The number of columns, same as the width.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The number of rows, same as the height.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The number of interleaved channels per pixel.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// The number of samples in a single row.
    pub fn row_stride(&self) -> usize {
        self.size.width * self.channels
    }

    /// The samples of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the image and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a single sample of the image.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel of the sample.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.channels));
        }

        Ok(self.data[(y * self.width() + x) * self.channels + ch])
    }

    /// Get the channel samples of a single pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        let offset = (y * self.width() + x) * self.channels;
        Ok(&self.data[offset..offset + self.channels])
    }

    /// Cast the samples of the image to a different type.
    ///
    /// Goes through [`PixelType::from_f32`], so casting to `u8` rounds and saturates.
    pub fn cast<U: PixelType>(&self) -> Image<U> {
        Image {
            size: self.size,
            channels: self.channels,
            data: self.data.iter().map(|&v| U::from_f32(v.to_f32())).collect(),
        }
    }
}
