//! Rendering of selected planes into raster frames.
//!
//! A [`Frame`] is produced either from a 2D intensity plane, which is
//! normalised to 8-bit grayscale and scaled according to the requested
//! [`Resolution`], or from an already decoded plain image. Frames can then
//! be handed to a display sink as they are, or serialized as PNG.
//!
//! [`Frame`]: ./struct.Frame.html
//! [`Resolution`]: ./struct.Resolution.html
use std::convert::TryFrom;
use std::io::Write;

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageEncoder, Luma};
use log::debug;
use ndarray::ArrayView2;

use crate::error::{NiicatError, Result};
use crate::selection::PlaneIndex;

/// Default resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 200;

/// Resolution at which one voxel maps to one output pixel.
const BASE_DPI: u32 = 100;

/// Largest width or height of a rendered frame, in pixels.
pub const MAX_FRAME_SIDE: u32 = 65_535;

/// Output pixel density of a rendered plane.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct Resolution(u32);

impl Default for Resolution {
    fn default() -> Self {
        Resolution(DEFAULT_DPI)
    }
}

impl Resolution {
    /// Create a resolution of `dpi` dots per inch.
    ///
    /// # Errors
    ///
    /// - `NiicatError::RenderFailure` if `dpi` is zero.
    pub fn new(dpi: u32) -> Result<Self> {
        if dpi == 0 {
            return Err(NiicatError::RenderFailure(
                "resolution must be at least 1 dpi".to_string(),
            ));
        }
        Ok(Resolution(dpi))
    }

    /// The resolution in dots per inch.
    pub fn dpi(self) -> u32 {
        self.0
    }

    /// Number of output pixels covering `len` voxels, rounded to the nearest
    /// pixel and never less than one.
    pub fn scaled(self, len: u32) -> u32 {
        let px = (u64::from(len) * u64::from(self.0) + u64::from(BASE_DPI / 2)) / u64::from(BASE_DPI);
        u32::try_from(px).unwrap_or(u32::MAX).max(1)
    }
}

/// A single rendered raster, ready to be displayed.
#[derive(Debug, Clone)]
pub struct Frame {
    image: DynamicImage,
    resolution: Resolution,
    origin: Option<PlaneIndex>,
}

impl Frame {
    /// Wrap a plain image into a frame, keeping its native size.
    pub fn from_image(image: DynamicImage, resolution: Resolution) -> Self {
        Frame {
            image,
            resolution,
            origin: None,
        }
    }

    /// Record the plane this frame was rendered from.
    pub fn with_origin(mut self, origin: PlaneIndex) -> Self {
        self.origin = Some(origin);
        self
    }

    /// The plane this frame was rendered from, if any.
    pub fn origin(&self) -> Option<&PlaneIndex> {
        self.origin.as_ref()
    }

    /// The resolution this frame was rendered at.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The rendered image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Move the rendered image out of the frame.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Encode the frame as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            self.image.as_bytes(),
            self.image.width(),
            self.image.height(),
            self.image.color(),
        )?;
        Ok(png)
    }

    /// Write the frame as PNG to the given stream. The image is encoded
    /// before writing, so nothing reaches `out` if encoding fails.
    pub fn write_png<W>(&self, mut out: W) -> Result<()>
    where
        W: Write,
    {
        let png = self.to_png()?;
        out.write_all(&png)?;
        out.flush()?;
        Ok(())
    }
}

/// Render a 2D plane into a grayscale frame.
///
/// The first plane axis runs left to right and the second one bottom to
/// top. Intensities are stretched linearly from the lowest to the highest
/// finite value in the plane; non-finite voxels and constant planes come out
/// black.
///
/// # Errors
///
/// - `NiicatError::RenderFailure` if the plane is empty, holds no finite
///   intensity, or would come out wider or taller than `MAX_FRAME_SIDE`
///   pixels at this resolution.
pub fn render(plane: ArrayView2<f32>, resolution: Resolution) -> Result<Frame> {
    let (nx, ny) = plane.dim();
    if nx == 0 || ny == 0 {
        return Err(NiicatError::RenderFailure(format!(
            "plane of size {}x{} is empty",
            nx, ny
        )));
    }
    let too_large = |_| NiicatError::RenderFailure(format!("plane of size {}x{} is too large", nx, ny));
    let width = u32::try_from(nx).map_err(too_large)?;
    let height = u32::try_from(ny).map_err(too_large)?;
    let (out_w, out_h) = (resolution.scaled(width), resolution.scaled(height));
    if out_w > MAX_FRAME_SIDE || out_h > MAX_FRAME_SIDE {
        return Err(NiicatError::RenderFailure(format!(
            "a {}x{} plane at {} dpi would be {}x{} pixels, the limit is {} per side",
            nx,
            ny,
            resolution.dpi(),
            out_w,
            out_h,
            MAX_FRAME_SIDE
        )));
    }

    let (lo, hi) = plane
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f32, f32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| NiicatError::RenderFailure("plane has no finite intensities".to_string()))?;
    let span = hi - lo;
    debug!("rendering {}x{} plane, intensity range [{}, {}]", nx, ny, lo, hi);

    let gray = GrayImage::from_fn(width, height, |x, y| {
        let v = plane[[x as usize, (height - 1 - y) as usize]];
        let level = if v.is_finite() && span > 0. {
            ((v - lo) / span * 255.).round() as u8
        } else {
            0
        };
        Luma([level])
    });

    let gray = if (out_w, out_h) == (width, height) {
        gray
    } else {
        imageops::resize(&gray, out_w, out_h, FilterType::Nearest)
    };

    Ok(Frame {
        image: DynamicImage::ImageLuma8(gray),
        resolution,
        origin: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn resolution_scaling() {
        let r = Resolution::default();
        assert_eq!(r.dpi(), 200);
        assert_eq!(r.scaled(5), 10);
        assert_eq!(Resolution::new(100).unwrap().scaled(64), 64);
        assert_eq!(Resolution::new(150).unwrap().scaled(3), 5);
        assert_eq!(Resolution::new(1).unwrap().scaled(3), 1);
        assert!(Resolution::new(0).is_err());
    }

    #[test]
    fn orientation_and_levels() {
        // plane[[x, y]]
        let plane = arr2(&[[0., 1.], [2., 4.]]);
        let frame = render(plane.view(), Resolution::new(100).unwrap()).unwrap();
        assert_eq!((frame.width(), frame.height()), (2, 2));
        let img = frame.image().to_luma8();
        // bottom-left pixel is plane[[0, 0]]
        assert_eq!(img.get_pixel(0, 1).0, [0]);
        // top-left is plane[[0, 1]]
        assert_eq!(img.get_pixel(0, 0).0, [64]);
        assert_eq!(img.get_pixel(1, 1).0, [128]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
    }

    #[test]
    fn size_follows_resolution() {
        let plane = Array2::<f32>::from_shape_fn((6, 4), |(x, y)| (x + y) as f32);
        let frame = render(plane.view(), Resolution::default()).unwrap();
        assert_eq!((frame.width(), frame.height()), (12, 8));
        let frame = render(plane.view(), Resolution::new(50).unwrap()).unwrap();
        assert_eq!((frame.width(), frame.height()), (3, 2));
    }

    #[test]
    fn oversized_frames_fail() {
        let plane = Array2::<f32>::from_shape_fn((300, 300), |(x, y)| (x + y) as f32);
        assert!(matches!(
            render(plane.view(), Resolution::new(u32::MAX).unwrap()),
            Err(NiicatError::RenderFailure(_))
        ));

        // 300 voxels at 21845 dpi is exactly the limit, one more is over
        let resolution = Resolution::new(21_845).unwrap();
        assert_eq!(resolution.scaled(300), MAX_FRAME_SIDE);
        let plane = Array2::<f32>::zeros((301, 1));
        assert!(matches!(
            render(plane.view(), resolution),
            Err(NiicatError::RenderFailure(_))
        ));
    }

    #[test]
    fn constant_and_nan_planes() {
        let plane = Array2::<f32>::from_elem((3, 3), 7.);
        let frame = render(plane.view(), Resolution::new(100).unwrap()).unwrap();
        assert!(frame.image().to_luma8().pixels().all(|p| p.0 == [0]));

        let mut plane = Array2::<f32>::from_elem((2, 2), 1.);
        plane[[0, 0]] = f32::NAN;
        plane[[1, 1]] = 3.;
        let frame = render(plane.view(), Resolution::new(100).unwrap()).unwrap();
        let img = frame.image().to_luma8();
        assert_eq!(img.get_pixel(0, 1).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);

        let plane = Array2::<f32>::from_elem((2, 2), f32::NAN);
        assert!(matches!(
            render(plane.view(), Resolution::default()),
            Err(NiicatError::RenderFailure(_))
        ));
    }

    #[test]
    fn empty_plane_fails() {
        let plane = Array2::<f32>::zeros((0, 4));
        assert!(matches!(
            render(plane.view(), Resolution::default()),
            Err(NiicatError::RenderFailure(_))
        ));
    }

    #[test]
    fn png_output() {
        let plane = Array2::<f32>::from_shape_fn((5, 3), |(x, y)| (x * y) as f32);
        let frame = render(plane.view(), Resolution::default()).unwrap();

        let mut out = Vec::new();
        frame.write_png(&mut out).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(out, frame.to_png().unwrap());

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (10, 6));
        assert_eq!(decoded.to_luma8(), frame.image().to_luma8());
    }
}
