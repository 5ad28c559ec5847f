use argh::FromArgs;
use std::time::Instant;

use kernelkit::{
    image::{Image, ImageError},
    imgproc::{
        filter::{self, kernels::FilterKind, FilterConfig, GaussianParams},
        padding::PaddingMode,
        parallel::ExecutionStrategy,
    },
};

#[derive(FromArgs)]
/// Run a filter over a synthetic RGB gradient and report what it did
struct Args {
    /// the filter to apply: identity, edge_detect, sharpen, box_blur, soft_blur or gaussian_blur
    #[argh(option, short = 'f', default = "FilterKind::GaussianBlur")]
    filter: FilterKind,

    /// width of the synthetic image
    #[argh(option, default = "640")]
    width: usize,

    /// height of the synthetic image
    #[argh(option, default = "480")]
    height: usize,

    /// use 4 channels (RGBA) instead of 3
    #[argh(switch)]
    rgba: bool,

    /// gaussian radius, overrides the catalog default
    #[argh(option)]
    radius: Option<usize>,

    /// gaussian sigma, defaults to a third of the radius
    #[argh(option)]
    sigma: Option<f32>,

    /// border mode: replicate, reflect, reflect101 or wrap
    #[argh(option, default = "PaddingMode::Replicate")]
    border: PaddingMode,

    /// number of worker threads, 0 runs on the calling thread
    #[argh(option)]
    threads: Option<usize>,
}

/// Diagonal RGB gradient with a hard vertical edge in the middle.
fn synthetic_image(width: usize, height: usize, channels: usize) -> Result<Image<u8>, ImageError> {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            let r = (255 * x / width.max(1)) as u8;
            let g = (255 * y / height.max(1)) as u8;
            let b = if x < width / 2 { 32 } else { 224 };
            data.extend_from_slice(&[r, g, b]);
            if channels == 4 {
                data.push(255);
            }
        }
    }
    Image::from_raw(width, height, channels, &data)
}

fn channel_means(img: &Image<u8>) -> Vec<f64> {
    let channels = img.num_channels();
    let mut sums = vec![0u64; channels];
    for px in img.as_slice().chunks_exact(channels) {
        for (sum, &v) in sums.iter_mut().zip(px) {
            *sum += v as u64;
        }
    }
    let num_pixels = img.size().num_pixels() as f64;
    sums.into_iter().map(|s| s as f64 / num_pixels).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let strategy = match args.threads {
        None => ExecutionStrategy::Auto,
        Some(0) => ExecutionStrategy::Serial,
        Some(n) => ExecutionStrategy::Fixed(n),
    };
    let config = FilterConfig::default()
        .with_border(args.border)
        .with_strategy(strategy);

    let channels = if args.rgba { 4 } else { 3 };
    let src = synthetic_image(args.width, args.height, channels)?;
    log::info!(
        "input {} x {channels}, means {:?}",
        src.size(),
        channel_means(&src)
    );

    let start = Instant::now();
    let dst = match (args.filter, args.radius, args.sigma) {
        (FilterKind::GaussianBlur, Some(radius), sigma) => {
            let sigma = sigma.unwrap_or((radius as f32 / 3.0).max(0.5));
            let params = GaussianParams::new(radius, sigma)?;
            log::info!("gaussian blur, radius {radius}, sigma {sigma}");
            filter::gaussian_blur_with_config(&src, params, &config)?
        }
        (FilterKind::GaussianBlur, None, Some(sigma)) => {
            let params = GaussianParams::from_sigma(sigma)?;
            log::info!("gaussian blur, radius {}, sigma {sigma}", params.radius());
            filter::gaussian_blur_with_config(&src, params, &config)?
        }
        (kind, _, _) => filter::apply_filter_with_config(&src, kind, &config)?,
    };
    let elapsed = start.elapsed();

    log::info!(
        "{} with {} border took {:?}",
        args.filter,
        config.border,
        elapsed
    );
    log::info!(
        "output {} x {}, means {:?}",
        dst.size(),
        dst.num_channels(),
        channel_means(&dst)
    );

    println!(
        "{}: {} in {:.2} ms",
        args.filter,
        dst.size(),
        elapsed.as_secs_f64() * 1e3
    );

    Ok(())
}
