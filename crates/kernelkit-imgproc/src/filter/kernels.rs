use kernelkit_image::ImageError;

use super::GaussianParams;

/// Identity kernel, a single unit weight.
pub const IDENTITY_1X1: [f32; 1] = [1.0];

/// The 8-connectivity laplacian used for edge detection.
#[rustfmt::skip]
pub const EDGE_DETECT_3X3: [f32; 9] = [
    -1.0, -1.0, -1.0,
    -1.0,  8.0, -1.0,
    -1.0, -1.0, -1.0,
];

/// Sharpen kernel: identity plus the negated 4-connectivity laplacian.
#[rustfmt::skip]
pub const SHARPEN_3X3: [f32; 9] = [
     0.0, -1.0,  0.0,
    -1.0,  5.0, -1.0,
     0.0, -1.0,  0.0,
];

/// Unnormalized box kernel, divide by 9.
pub const BOX_BLUR_3X3: [f32; 9] = [1.0; 9];

/// Unnormalized binomial kernel, divide by 16.
#[rustfmt::skip]
pub const SOFT_BLUR_3X3: [f32; 9] = [
    1.0, 2.0, 1.0,
    2.0, 4.0, 2.0,
    1.0, 2.0, 1.0,
];

/// A square 2D convolution kernel.
///
/// The weights are stored row-major with the center at index `(K * K - 1) / 2`.
/// The weighted sum of a neighborhood is divided by the divisor before it is
/// stored, so detection kernels use a divisor of 1 and let the output saturate.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
    divisor: f32,
}

impl Kernel {
    /// Create a new kernel.
    ///
    /// # Arguments
    ///
    /// * `size` - The side length K of the kernel, must be odd.
    /// * `weights` - The K * K weights in row-major order.
    /// * `divisor` - The normalization divisor, must be finite and non zero.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidKernel`] if any of the above does not hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use kernelkit_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::new(3, vec![1.0; 9], 9.0).unwrap();
    /// assert_eq!(kernel.radius(), 1);
    ///
    /// assert!(Kernel::new(2, vec![1.0; 4], 4.0).is_err());
    /// ```
    pub fn new(size: usize, weights: Vec<f32>, divisor: f32) -> Result<Self, ImageError> {
        if size % 2 == 0 {
            return Err(ImageError::InvalidKernel(format!(
                "kernel size must be odd, got {size}"
            )));
        }

        if weights.len() != size * size {
            return Err(ImageError::InvalidKernel(format!(
                "expected {} weights for a {size}x{size} kernel, got {}",
                size * size,
                weights.len()
            )));
        }

        if divisor == 0.0 || !divisor.is_finite() {
            return Err(ImageError::InvalidKernel(format!(
                "divisor must be finite and non zero, got {divisor}"
            )));
        }

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ImageError::InvalidKernel(
                "weights must be finite".to_string(),
            ));
        }

        Ok(Self {
            size,
            weights,
            divisor,
        })
    }

    /// Build the 2D form of a separable kernel.
    ///
    /// Weight `(x, y)` of the result is `kernel_x[x] * kernel_y[y]` and the
    /// divisor is 1.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidKernel`] if the two vectors differ in length or the
    /// length is even.
    pub fn from_outer_product(kernel_x: &[f32], kernel_y: &[f32]) -> Result<Self, ImageError> {
        if kernel_x.len() != kernel_y.len() {
            return Err(ImageError::InvalidKernel(format!(
                "separable kernels differ in length: {} and {}",
                kernel_x.len(),
                kernel_y.len()
            )));
        }
        Self::new(kernel_x.len(), outer_product(kernel_x, kernel_y), 1.0)
    }

    /// The side length K of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of pixels the kernel reaches on each side of its center.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// The weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The normalization divisor.
    pub fn divisor(&self) -> f32 {
        self.divisor
    }

    /// The weight at column `x` and row `y` of the kernel, if in range.
    pub fn weight(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.weights[y * self.size + x])
    }

    /// Whether convolving with this kernel leaves every sample unchanged.
    pub fn is_identity(&self) -> bool {
        let center = (self.weights.len() - 1) / 2;
        self.weights.iter().enumerate().all(|(i, &w)| {
            if i == center {
                w == self.divisor
            } else {
                w == 0.0
            }
        })
    }
}

fn outer_product(kernel_x: &[f32], kernel_y: &[f32]) -> Vec<f32> {
    kernel_y
        .iter()
        .flat_map(|&ky| kernel_x.iter().map(move |&kx| kx * ky))
        .collect()
}

/// The closed set of filters the catalog provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Leaves the image unchanged.
    Identity,
    /// Laplacian edge detection, flat regions go to black.
    EdgeDetect,
    /// Boosts the center pixel against its four neighbors.
    Sharpen,
    /// Unweighted 3x3 average.
    BoxBlur,
    /// 3x3 binomial average.
    SoftBlur,
    /// Separable gaussian blur with [`GaussianParams::default`].
    GaussianBlur,
}

impl FilterKind {
    /// Every filter, in presentation order.
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Identity,
        FilterKind::EdgeDetect,
        FilterKind::Sharpen,
        FilterKind::BoxBlur,
        FilterKind::SoftBlur,
        FilterKind::GaussianBlur,
    ];

    /// The name of the filter, as accepted by [`str::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Identity => "identity",
            FilterKind::EdgeDetect => "edge_detect",
            FilterKind::Sharpen => "sharpen",
            FilterKind::BoxBlur => "box_blur",
            FilterKind::SoftBlur => "soft_blur",
            FilterKind::GaussianBlur => "gaussian_blur",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter: {0}")]
pub struct ParseFilterKindError(String);

impl std::str::FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase().replace('-', "_");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ParseFilterKindError(s.to_string()))
    }
}

/// Look up the kernel of a filter.
///
/// Total over [`FilterKind`]. The gaussian entry is the 2D outer product of the
/// default gaussian weights; [`super::apply_filter`] runs it as two 1D passes
/// instead.
///
/// # Examples
///
/// ```
/// use kernelkit_imgproc::filter::kernels::{kernel, FilterKind};
///
/// let box_blur = kernel(FilterKind::BoxBlur);
/// assert_eq!(box_blur.size(), 3);
/// assert_eq!(box_blur.divisor(), 9.0);
/// ```
pub fn kernel(kind: FilterKind) -> Kernel {
    let (size, weights, divisor) = match kind {
        FilterKind::Identity => (1, IDENTITY_1X1.to_vec(), 1.0),
        FilterKind::EdgeDetect => (3, EDGE_DETECT_3X3.to_vec(), 1.0),
        FilterKind::Sharpen => (3, SHARPEN_3X3.to_vec(), 1.0),
        FilterKind::BoxBlur => (3, BOX_BLUR_3X3.to_vec(), 9.0),
        FilterKind::SoftBlur => (3, SOFT_BLUR_3X3.to_vec(), 16.0),
        FilterKind::GaussianBlur => {
            let params = GaussianParams::default();
            let weights = params.weights();
            (params.kernel_size(), outer_product(&weights, &weights), 1.0)
        }
    };

    Kernel {
        size,
        weights,
        divisor,
    }
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `radius` - The half size of the kernel, the kernel has `2 * radius + 1` taps.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one. As `sigma` goes to zero the
/// off-center weights underflow and the kernel collapses to a single unit weight.
pub fn gaussian_kernel_1d(radius: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(2 * radius + 1);

    let two_sigma_sq = 2.0 * sigma * sigma;

    // compute the kernel
    for i in -(radius as isize)..=radius as isize {
        if i == 0 {
            kernel.push(1.0);
            continue;
        }
        let x = i as f32;
        kernel.push((-(x * x) / two_sigma_sq).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}
