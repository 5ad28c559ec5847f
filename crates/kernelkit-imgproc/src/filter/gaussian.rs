use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use kernelkit_image::{Image, ImageError, PixelType};

use super::kernels::gaussian_kernel_1d;
use super::{separable_filter_with_config, FilterConfig};

/// The largest radius a gaussian blur accepts.
pub const MAX_GAUSSIAN_RADIUS: usize = 1 << 16;

/// Number of weight vectors kept before the cache is emptied.
const MAX_CACHED_WEIGHTS: usize = 64;

static GAUSSIAN_WEIGHTS: OnceLock<WeightCache> = OnceLock::new();

/// Weight vectors keyed by radius and the bits of sigma.
struct WeightCache {
    capacity: usize,
    entries: Mutex<HashMap<(usize, u32), Arc<[f32]>>>,
}

impl WeightCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, radius: usize, sigma: f32) -> Arc<[f32]> {
        // entries are never left half written, a poisoned lock still holds valid ones
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let key = (radius, sigma.to_bits());
        if let Some(weights) = entries.get(&key) {
            return weights.clone();
        }

        if entries.len() >= self.capacity {
            log::debug!("gaussian weight cache full, dropping {} entries", entries.len());
            entries.clear();
        }

        log::debug!("computing gaussian weights for radius {radius}, sigma {sigma}");
        let weights: Arc<[f32]> = Arc::from(gaussian_kernel_1d(radius, sigma));
        entries.insert(key, weights.clone());
        weights
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn cached_gaussian_weights(radius: usize, sigma: f32) -> Arc<[f32]> {
    GAUSSIAN_WEIGHTS
        .get_or_init(|| WeightCache::new(MAX_CACHED_WEIGHTS))
        .get(radius, sigma)
}

/// Parameters of a gaussian blur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParams {
    radius: usize,
    sigma: f32,
}

impl GaussianParams {
    /// Create new gaussian parameters.
    ///
    /// # Arguments
    ///
    /// * `radius` - The number of pixels the blur reaches on each side. Zero leaves the image unchanged.
    /// * `sigma` - The standard deviation of the gaussian, must be finite and positive.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidKernel`] if `sigma` is not finite and positive, or
    /// `radius` is larger than [`MAX_GAUSSIAN_RADIUS`].
    pub fn new(radius: usize, sigma: f32) -> Result<Self, ImageError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ImageError::InvalidKernel(format!(
                "gaussian sigma must be finite and positive, got {sigma}"
            )));
        }
        if radius > MAX_GAUSSIAN_RADIUS {
            return Err(ImageError::InvalidKernel(format!(
                "gaussian radius must be at most {MAX_GAUSSIAN_RADIUS}, got {radius}"
            )));
        }
        Ok(Self { radius, sigma })
    }

    /// Create parameters whose radius covers three standard deviations.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidKernel`] if `sigma` is not finite and positive, or
    /// the derived radius is larger than [`MAX_GAUSSIAN_RADIUS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use kernelkit_imgproc::filter::GaussianParams;
    ///
    /// let params = GaussianParams::from_sigma(1.5).unwrap();
    /// assert_eq!(params.radius(), 5);
    /// assert_eq!(params.kernel_size(), 11);
    /// ```
    pub fn from_sigma(sigma: f32) -> Result<Self, ImageError> {
        let params = Self::new(0, sigma)?;
        let radius = (3.0 * params.sigma).ceil();
        if radius > MAX_GAUSSIAN_RADIUS as f32 {
            return Err(ImageError::InvalidKernel(format!(
                "gaussian sigma {sigma} needs a radius above {MAX_GAUSSIAN_RADIUS}"
            )));
        }
        Self::new(radius as usize, sigma)
    }

    /// The radius of the blur in pixels.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The standard deviation of the gaussian.
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// The number of taps of the 1D kernel, `2 * radius + 1`.
    pub fn kernel_size(&self) -> usize {
        2 * self.radius + 1
    }

    /// The normalized 1D weights, shared by both passes.
    ///
    /// Computed on first use for each distinct (radius, sigma) pair and cached.
    /// The cache holds a bounded number of pairs and starts over once full, so
    /// sweeping sigma recomputes weights instead of growing memory.
    pub fn weights(&self) -> Arc<[f32]> {
        cached_gaussian_weights(self.radius, self.sigma)
    }
}

impl Default for GaussianParams {
    /// Radius 2 and sigma 1, a 5x5 blur.
    fn default() -> Self {
        Self {
            radius: 2,
            sigma: 1.0,
        }
    }
}

/// Blur an image using a gaussian blur filter
///
/// Runs a horizontal and then a vertical 1D pass with the same weights, which is
/// equivalent to a 2D convolution with their outer product at a cost linear in
/// the radius. Borders are replicated.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `params` - The radius and sigma of the blur.
///
/// # Returns
///
/// A new image with the same size and channel count as `src`.
///
/// # Examples
///
/// ```
/// use kernelkit_image::Image;
/// use kernelkit_imgproc::filter::{gaussian_blur, GaussianParams};
///
/// let src = Image::<u8>::from_size_val([8, 8].into(), 4, 42).unwrap();
/// let dst = gaussian_blur(&src, GaussianParams::new(3, 2.0).unwrap()).unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn gaussian_blur<T: PixelType>(
    src: &Image<T>,
    params: GaussianParams,
) -> Result<Image<T>, ImageError> {
    gaussian_blur_with_config(src, params, &FilterConfig::default())
}

/// Blur an image using a gaussian blur filter with border and execution strategy control.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `params` - The radius and sigma of the blur.
/// * `config` - The border mode and execution strategy.
pub fn gaussian_blur_with_config<T: PixelType>(
    src: &Image<T>,
    params: GaussianParams,
    config: &FilterConfig,
) -> Result<Image<T>, ImageError> {
    let weights = params.weights();

    // radius zero, or a sigma so small that every off-center weight underflowed
    if weights[params.radius] == 1.0 {
        log::trace!("degenerate gaussian {params:?}, copying {}", src.size());
        return Ok(src.clone());
    }

    separable_filter_with_config(src, &weights, &weights, config)
}
