//! Selection of a single 2D plane from a 3D or 4D volume.
//!
//! A [`Selection`] holds what the user asked for, which may be nothing at
//! all. [`resolve`] turns it into a concrete [`PlaneIndex`] for a given
//! volume shape: absent indices default to the middle of their axis, while
//! explicit indices are used as they are, or rejected when they fall
//! outside the volume.
//!
//! [`Selection`]: ./struct.Selection.html
//! [`resolve`]: ./fn.resolve.html
//! [`PlaneIndex`]: ./struct.PlaneIndex.html
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{NiicatError, Result};

/// The spatial axis along which a slice is taken.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum Axis {
    /// Fixed first spatial axis (left-right).
    Sagittal,
    /// Fixed second spatial axis (posterior-anterior).
    Coronal,
    /// Fixed third spatial axis (inferior-superior).
    Axial,
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Axial
    }
}

impl Axis {
    /// All spatial axes, in array order.
    pub const ALL: [Axis; 3] = [Axis::Sagittal, Axis::Coronal, Axis::Axial];

    /// The position of this axis in the volume's shape.
    pub fn index(self) -> usize {
        match self {
            Axis::Sagittal => 0,
            Axis::Coronal => 1,
            Axis::Axial => 2,
        }
    }

    /// The lowercase name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Sagittal => "sagittal",
            Axis::Coronal => "coronal",
            Axis::Axial => "axial",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        Axis::ALL
            .iter()
            .copied()
            .find(|axis| axis.name().eq_ignore_ascii_case(s) || axis.index().to_string() == s)
            .ok_or_else(|| format!("unknown axis `{}`, expected sagittal, coronal or axial", s))
    }
}

/// The dimension an index refers to, used for error reporting.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dimension {
    /// A spatial slice along the given axis.
    Slice(Axis),
    /// The volume (4th) axis.
    Volume,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dimension::Slice(axis) => write!(f, "{} slice", axis),
            Dimension::Volume => f.write_str("volume"),
        }
    }
}

/// The indices requested by the user. `None` means "the middle one".
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Selection {
    /// Spatial slice index along the chosen axis.
    pub slice: Option<usize>,
    /// Index along the 4th axis.
    pub volume: Option<usize>,
}

impl Selection {
    /// A selection with neither index given.
    pub fn middle() -> Self {
        Selection::default()
    }

    /// Use the given slice index.
    pub fn with_slice(mut self, slice: usize) -> Self {
        self.slice = Some(slice);
        self
    }

    /// Use the given volume index.
    pub fn with_volume(mut self, volume: usize) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// A fully resolved plane position.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct PlaneIndex {
    /// The axis the slice is taken along.
    pub axis: Axis,
    /// Slice index along `axis`.
    pub slice: usize,
    /// Volume index, `None` for 3D volumes.
    pub volume: Option<usize>,
}

/// The default index for an axis of the given extent.
#[inline]
pub fn middle(extent: usize) -> usize {
    extent / 2
}

/// Pick an index along one dimension: the explicit one if it is in bounds,
/// the middle one if there is none.
fn pick(requested: Option<usize>, extent: usize, dimension: Dimension) -> Result<usize> {
    match requested {
        Some(index) if index < extent => Ok(index),
        Some(index) => Err(NiicatError::IndexOutOfRange(dimension, index, extent)),
        None if extent == 0 => Err(NiicatError::RenderFailure(format!(
            "the {} axis is empty",
            dimension
        ))),
        None => Ok(middle(extent)),
    }
}

/// Resolve a selection against a volume of the given shape.
///
/// # Errors
///
/// - `NiicatError::UnsupportedDimensionality` if `shape` is not 3D or 4D.
/// - `NiicatError::IndexOutOfRange` if an explicit index surpasses its axis.
///   A 3D volume counts as having a single volume, so only `Some(0)` is
///   accepted there as a volume index.
/// - `NiicatError::RenderFailure` if an axis to pick a default from is empty.
pub fn resolve(shape: &[usize], axis: Axis, selection: Selection) -> Result<PlaneIndex> {
    let volume = match *shape {
        [_, _, _] => {
            let _ = pick(selection.volume, 1, Dimension::Volume)?;
            None
        }
        [_, _, _, num_volumes] => Some(pick(selection.volume, num_volumes, Dimension::Volume)?),
        _ => return Err(NiicatError::UnsupportedDimensionality(shape.len())),
    };
    let slice = pick(selection.slice, shape[axis.index()], Dimension::Slice(axis))?;

    debug!(
        "selected {} slice {} of volume {:?} (shape {:?})",
        axis, slice, volume, shape
    );
    Ok(PlaneIndex {
        axis,
        slice,
        volume,
    })
}
