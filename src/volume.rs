//! This module defines the volume type shown by the previewer, which
//! holds the voxel intensities of a NIfTI image as a dynamic `ndarray`.
//!
//! The affine scaling of the values (from the `scl_slope` and `scl_inter`
//! attributes) is applied on load, so every voxel is a plain `f32`
//! intensity. Only 3D and 4D volumes are accepted.

use std::path::{Path, PathBuf};

use log::debug;
use ndarray::{Array, Array2, ArrayD, Axis as ArrayAxis, Dimension as ArrayDimension, Ix2};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use crate::error::{NiicatError, Result};
use crate::render::{render, Frame, Resolution};
use crate::selection::{resolve, Axis, Dimension, PlaneIndex, Selection};

/// Position of the volume (time/series) axis.
const VOLUME_AXIS: usize = 3;

/// A 3D or 4D volume of scalar intensities, fully contained in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    data: ArrayD<f32>,
}

impl Volume {
    /// Read a volume from a NIfTI file. Compressed (".gz") files and
    /// header/image file pairs are handled by the `nifti` reader. A pair
    /// can be opened through either of its two files.
    ///
    /// # Errors
    ///
    /// - `NiicatError::Nifti` if the file cannot be read as NIfTI.
    /// - `NiicatError::UnsupportedDimensionality` if it is not 3D or 4D.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path = match header_of_image_file(path) {
            Some(header) => {
                debug!("reading header {} for {}", header.display(), path.display());
                header
            }
            None => path.to_path_buf(),
        };
        let object = ReaderOptions::new().read_file(&path)?;
        debug!("{}: dim = {:?}", path.display(), object.header().dim);
        let data = object.into_volume().into_ndarray::<f32>()?;
        Volume::from_array(data)
    }

    /// Wrap an existing array of intensities.
    pub fn from_array<D>(data: Array<f32, D>) -> Result<Self>
    where
        D: ArrayDimension,
    {
        match data.ndim() {
            3 | 4 => Ok(Volume {
                data: data.into_dyn(),
            }),
            n => Err(NiicatError::UnsupportedDimensionality(n)),
        }
    }

    /// The length of the volume along each axis.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// The number of axes, either 3 or 4.
    pub fn dimensionality(&self) -> usize {
        self.data.ndim()
    }

    /// The number of volumes along the 4th axis. A 3D volume holds one.
    pub fn num_volumes(&self) -> usize {
        self.shape().get(VOLUME_AXIS).copied().unwrap_or(1)
    }

    /// Resolve a selection against this volume's shape.
    pub fn select(&self, axis: Axis, selection: Selection) -> Result<PlaneIndex> {
        resolve(self.shape(), axis, selection)
    }

    /// Extract the plane at the given position. The two remaining spatial
    /// axes keep their relative order in the output.
    pub fn plane(&self, index: &PlaneIndex) -> Result<Array2<f32>> {
        let mut view = self.data.view();
        match (index.volume, self.dimensionality()) {
            (Some(v), 4) => {
                let extent = self.num_volumes();
                if v >= extent {
                    return Err(NiicatError::IndexOutOfRange(Dimension::Volume, v, extent));
                }
                view = view.index_axis_move(ArrayAxis(VOLUME_AXIS), v);
            }
            (None, 3) => {}
            (_, n) => return Err(NiicatError::UnsupportedDimensionality(n)),
        }

        let axis = index.axis.index();
        let extent = view.len_of(ArrayAxis(axis));
        if index.slice >= extent {
            return Err(NiicatError::IndexOutOfRange(
                Dimension::Slice(index.axis),
                index.slice,
                extent,
            ));
        }
        view.index_axis_move(ArrayAxis(axis), index.slice)
            .into_dimensionality::<Ix2>()
            .map(|plane| plane.to_owned())
            .map_err(|e| NiicatError::RenderFailure(e.to_string()))
    }

    /// Select, extract and render a single plane.
    pub fn frame(&self, axis: Axis, selection: Selection, resolution: Resolution) -> Result<Frame> {
        let index = self.select(axis, selection)?;
        let plane = self.plane(&index)?;
        Ok(render(plane.view(), resolution)?.with_origin(index))
    }
}

/// The header file paired with an ".img" or ".img.gz" data file, such as
/// "x.hdr.gz" for "x.img.gz". `None` for any other file name.
fn header_of_image_file(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let lower = name.to_ascii_lowercase();
    let (stem, gz) = if lower.ends_with(".img.gz") {
        (&name[..name.len() - 7], ".gz")
    } else if lower.ends_with(".img") {
        (&name[..name.len() - 4], "")
    } else {
        return None;
    };
    Some(path.with_file_name(format!("{}.hdr{}", stem, gz)))
}
