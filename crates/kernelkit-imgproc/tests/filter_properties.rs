use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use kernelkit_image::{Image, ImageError};
use kernelkit_imgproc::filter::{
    apply_filter, apply_filter_raw, convolve, convolve_with_config, gaussian_blur,
    gaussian_blur_with_config,
    kernels::{box_blur_kernel_1d, kernel, FilterKind, Kernel},
    separable_filter,
    FilterConfig, GaussianParams,
};
use kernelkit_imgproc::padding::PaddingMode;

fn random_image(rng: &mut StdRng, width: usize, height: usize, channels: usize) -> Image<u8> {
    let data = (0..width * height * channels)
        .map(|_| rng.random::<u8>())
        .collect::<Vec<_>>();
    Image::from_raw(width, height, channels, &data).expect("valid random image")
}

#[test]
fn identity_returns_the_input() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let width = rng.random_range(1..24);
        let height = rng.random_range(1..24);
        let channels = if rng.random_bool(0.5) { 3 } else { 4 };
        let src = random_image(&mut rng, width, height, channels);

        assert_eq!(apply_filter(&src, FilterKind::Identity)?, src);
    }
    Ok(())
}

#[test]
fn every_filter_preserves_dimensions() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(11);
    for (width, height) in [(1, 1), (1, 9), (9, 1), (2, 2), (13, 7)] {
        for channels in [3, 4] {
            let src = random_image(&mut rng, width, height, channels);
            for kind in FilterKind::ALL {
                let dst = apply_filter(&src, kind)?;
                assert_eq!(dst.width(), src.width(), "{kind}");
                assert_eq!(dst.height(), src.height(), "{kind}");
                assert_eq!(dst.num_channels(), src.num_channels(), "{kind}");
                assert_eq!(dst.as_slice().len(), src.as_slice().len(), "{kind}");
            }
        }
    }
    Ok(())
}

#[test]
fn detection_output_saturates_instead_of_wrapping() -> Result<(), ImageError> {
    // a white pixel in a black field, and the inverse
    let mut bright = vec![0u8; 3 * 3 * 3];
    bright[12..15].copy_from_slice(&[255, 255, 255]);
    let mut dark = vec![255u8; 3 * 3 * 3];
    dark[12..15].copy_from_slice(&[0, 0, 0]);

    // raw sum at the center is 8 * 255 = 2040
    let out = apply_filter_raw(3, 3, 3, &bright, FilterKind::EdgeDetect)?;
    assert_eq!(&out[12..15], &[255, 255, 255]);
    // raw sum at the neighbors is -255
    assert_eq!(&out[3..6], &[0, 0, 0]);

    // raw sum at the center is -2040
    let out = apply_filter_raw(3, 3, 3, &dark, FilterKind::EdgeDetect)?;
    assert_eq!(&out[12..15], &[0, 0, 0]);
    assert_eq!(&out[3..6], &[255, 255, 255]);
    Ok(())
}

#[test]
fn separable_gaussian_matches_2d_convolution() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(3);
    let src = random_image(&mut rng, 19, 14, 3);

    for (radius, sigma) in [(1, 0.8), (2, 1.2), (3, 2.0)] {
        let params = GaussianParams::new(radius, sigma)?;
        let weights = params.weights();
        let kernel_2d = Kernel::from_outer_product(&weights, &weights)?;

        let two_pass = gaussian_blur(&src, params)?;
        let brute_force = convolve(&src, &kernel_2d)?;

        for (&a, &b) in two_pass.as_slice().iter().zip(brute_force.as_slice()) {
            assert!(a.abs_diff(b) <= 1, "radius {radius}: {a} vs {b}");
        }

        // without the final rounding the two agree to float precision
        let src_f32 = src.cast::<f32>();
        let two_pass = gaussian_blur(&src_f32, params)?;
        let brute_force = convolve(&src_f32, &kernel_2d)?;
        for (&a, &b) in two_pass.as_slice().iter().zip(brute_force.as_slice()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-2);
        }
    }
    Ok(())
}

#[test]
fn separability_holds_for_every_border_mode() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(5);
    let src = random_image(&mut rng, 6, 5, 4).cast::<f32>();
    let params = GaussianParams::new(3, 1.5)?;
    let weights = params.weights();
    let kernel_2d = Kernel::from_outer_product(&weights, &weights)?;

    for border in [
        PaddingMode::Replicate,
        PaddingMode::Reflect,
        PaddingMode::Reflect101,
        PaddingMode::Wrap,
    ] {
        let config = FilterConfig::default().with_border(border);
        let two_pass = gaussian_blur_with_config(&src, params, &config)?;
        let brute_force = convolve_with_config(&src, &kernel_2d, &config)?;
        for (&a, &b) in two_pass.as_slice().iter().zip(brute_force.as_slice()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-2);
        }
    }
    Ok(())
}

#[test]
fn separable_box_matches_catalog_box_blur() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(29);
    let src = random_image(&mut rng, 9, 6, 3).cast::<f32>();

    let box_1d = box_blur_kernel_1d(3);
    let two_pass = separable_filter(&src, &box_1d, &box_1d)?;
    let brute_force = convolve(&src, &kernel(FilterKind::BoxBlur))?;
    for (&a, &b) in two_pass.as_slice().iter().zip(brute_force.as_slice()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-3);
    }
    Ok(())
}

#[test]
fn catalog_gaussian_kernel_matches_separable_dispatch() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(17);
    let src = random_image(&mut rng, 10, 10, 4);

    let dispatched = apply_filter(&src, FilterKind::GaussianBlur)?;
    let brute_force = convolve(&src, &kernel(FilterKind::GaussianBlur))?;
    for (&a, &b) in dispatched.as_slice().iter().zip(brute_force.as_slice()) {
        assert!(a.abs_diff(b) <= 1);
    }
    Ok(())
}

#[test]
fn gaussian_radius_zero_is_identity() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(23);
    let src = random_image(&mut rng, 8, 3, 4);
    assert_eq!(gaussian_blur(&src, GaussianParams::new(0, 1.0)?)?, src);
    Ok(())
}

#[test]
fn single_pixel_image_keeps_its_color() -> Result<(), ImageError> {
    let src = Image::<u8>::from_raw(1, 1, 3, &[17, 128, 250])?;
    for radius in 1..=8 {
        let params = GaussianParams::new(radius, 0.5 + radius as f32)?;
        assert_eq!(gaussian_blur(&src, params)?, src);
    }
    for kind in [FilterKind::BoxBlur, FilterKind::SoftBlur, FilterKind::GaussianBlur] {
        assert_eq!(apply_filter(&src, kind)?, src, "{kind}");
    }
    Ok(())
}

#[test]
fn uniform_buffer_is_a_box_blur_fixed_point() -> Result<(), ImageError> {
    let data = vec![100u8; 4 * 4 * 3];
    let out = apply_filter_raw(4, 4, 3, &data, FilterKind::BoxBlur)?;
    assert!(out.iter().all(|&v| v == 100));
    Ok(())
}

#[test]
fn edge_detect_golden_2x2() -> Result<(), ImageError> {
    #[rustfmt::skip]
    let data = [
        0, 0, 0,          255, 255, 255,
        255, 255, 255,    0, 0, 0,
    ];
    let out = apply_filter_raw(2, 2, 3, &data, FilterKind::EdgeDetect)?;

    #[rustfmt::skip]
    assert_eq!(
        out,
        vec![
            0, 0, 0,          255, 255, 255,
            255, 255, 255,    0, 0, 0,
        ]
    );
    Ok(())
}
