#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use kernelkit_image as image;

#[doc(inline)]
pub use kernelkit_imgproc as imgproc;
