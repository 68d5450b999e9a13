//! Types for error handling go here.
use std::io::Error as IOError;
use std::path::PathBuf;
use std::process::ExitStatus;

use image::ImageError;
use nifti::NiftiError;
use quick_error::quick_error;

use crate::selection::Dimension;

quick_error! {
    /// Error type for all error variants originating from this crate.
    #[derive(Debug)]
    pub enum NiicatError {
        /// The input is neither a NIfTI file nor a recognised image format.
        UnsupportedInputFormat(path: PathBuf) {
            display("{} is neither a NIfTI file nor a supported image", path.display())
        }
        /// The volume has a number of dimensions this tool cannot show.
        UnsupportedDimensionality(ndim: usize) {
            display("expected a 3D or 4D volume, found {} dimensions", ndim)
        }
        /// Sequential display was requested for input that is not 4D.
        InvalidModeCombination(ndim: usize) {
            display("--movie requires a 4D NIfTI image, but the input has {} dimensions", ndim)
        }
        /// The external display helper could not be found.
        MissingExternalTool(name: String) {
            display("the command '{}' is not available in your PATH", name)
        }
        /// The external display helper ran but did not succeed.
        HelperFailed(name: String, status: ExitStatus) {
            display("'{}' exited unsuccessfully ({})", name, status)
        }
        /// An explicit index lies outside the bounds of its axis.
        IndexOutOfRange(dimension: Dimension, index: usize, extent: usize) {
            display("{} index {} is out of range (0..{})", dimension, index, extent)
        }
        /// The selected plane could not be turned into an image.
        RenderFailure(reason: String) {
            display("could not render frame: {}", reason)
        }
        /// Failure to read the NIfTI file.
        Nifti(err: NiftiError) {
            from()
            source(err)
            display("{}", err)
        }
        /// Failure to decode or encode a raster image.
        Image(err: ImageError) {
            from()
            source(err)
            display("{}", err)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

/// Alias type for results originating from this crate.
pub type Result<T> = ::std::result::Result<T, NiicatError>;
