//! Recognition and loading of input files.
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use log::{debug, warn};

use crate::error::{NiicatError, Result};
use crate::render::{Frame, Resolution};
use crate::selection::{Axis, Selection};
use crate::volume::Volume;

/// File name suffixes of NIfTI-1 files, single-file or header/image pairs.
const NIFTI_SUFFIXES: &[&str] = &[".nii", ".nii.gz", ".hdr", ".hdr.gz", ".img", ".img.gz"];

/// The kind of file given to the previewer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputKind {
    /// A NIfTI volume.
    Nifti,
    /// A raster image in the given format.
    Image(ImageFormat),
}

impl InputKind {
    /// Classify a path by its file name.
    ///
    /// # Errors
    ///
    /// - `NiicatError::UnsupportedInputFormat` if the name matches neither
    ///   a NIfTI file nor an image format known to the `image` crate.
    pub fn of<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if is_nifti_file(path) {
            return Ok(InputKind::Nifti);
        }
        ImageFormat::from_path(path)
            .map(InputKind::Image)
            .map_err(|_| NiicatError::UnsupportedInputFormat(path.to_path_buf()))
    }
}

/// Whether the path names a NIfTI file (".nii", ".hdr" or ".img", possibly
/// gzipped).
pub fn is_nifti_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .map(|name| NIFTI_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
        .unwrap_or(false)
}

/// A loaded input file.
#[derive(Debug, Clone)]
pub enum Input {
    /// A 3D or 4D NIfTI volume.
    Volume(Volume),
    /// A plain raster image.
    Image(DynamicImage),
}

impl Input {
    /// Load the file at `path`, deciding how to read it from its name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match InputKind::of(path)? {
            InputKind::Nifti => {
                debug!("reading {} as NIfTI", path.display());
                Volume::from_file(path).map(Input::Volume)
            }
            InputKind::Image(format) => {
                debug!("reading {} as {:?} image", path.display(), format);
                let image = image::open(path)?;
                Ok(Input::Image(image))
            }
        }
    }

    /// The number of axes of the loaded data. Plain images count as 2D.
    pub fn dimensionality(&self) -> usize {
        match self {
            Input::Volume(volume) => volume.dimensionality(),
            Input::Image(_) => 2,
        }
    }

    /// Produce the single frame to preview. Volumes are sliced according
    /// to `axis` and `selection`; plain images are shown as they are.
    pub fn frame(&self, axis: Axis, selection: Selection, resolution: Resolution) -> Result<Frame> {
        match self {
            Input::Volume(volume) => volume.frame(axis, selection, resolution),
            Input::Image(image) => {
                if selection != Selection::middle() {
                    warn!("slice and volume indices do not apply to plain images");
                }
                Ok(Frame::from_image(image.clone(), resolution))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn nifti_names() {
        for name in &[
            "brain.nii",
            "brain.nii.gz",
            "BRAIN.NII.GZ",
            "dir.d/minimal.hdr",
            "minimal.hdr.gz",
            "minimal.img",
            "minimal.img.gz",
        ] {
            assert!(is_nifti_file(name), "{} should be NIfTI", name);
            assert_eq!(InputKind::of(name).unwrap(), InputKind::Nifti);
        }
        assert!(!is_nifti_file("nii"));
        assert!(!is_nifti_file("brain.nii.bak"));
    }

    #[test]
    fn image_names() {
        assert_eq!(
            InputKind::of("photo.png").unwrap(),
            InputKind::Image(ImageFormat::Png)
        );
        assert_eq!(
            InputKind::of("photo.JPG").unwrap(),
            InputKind::Image(ImageFormat::Jpeg)
        );
    }

    #[test]
    fn unknown_names() {
        for name in &["notes.txt", "archive.gz", "no_extension"] {
            match InputKind::of(name) {
                Err(NiicatError::UnsupportedInputFormat(p)) => assert_eq!(p, PathBuf::from(name)),
                other => panic!("unexpected result {:?} for {}", other, name),
            }
        }
    }
}
