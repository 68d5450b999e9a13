#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ndarray::{Array, Array3, Array4, Dimension, RemoveAxis};
use nifti::writer::WriterOptions;
use niicat::{Frame, PlaneIndex, Result, Sink};

/// Write `data` as a NIfTI file named `name` inside `dir`.
pub fn write_volume<D>(dir: &Path, name: &str, data: &Array<f32, D>) -> PathBuf
where
    D: Dimension + RemoveAxis,
{
    let path = dir.join(name);
    WriterOptions::new(&path).write_nifti(data).unwrap();
    path
}

/// A 3D volume where every voxel encodes its own coordinates.
pub fn coords_3d(shape: (usize, usize, usize)) -> Array3<f32> {
    Array3::from_shape_fn(shape, |(i, j, k)| (i * 10_000 + j * 100 + k) as f32)
}

/// A 4D volume where every voxel encodes its spatial coordinates plus a
/// large offset per volume.
pub fn coords_4d(shape: (usize, usize, usize, usize)) -> Array4<f32> {
    Array4::from_shape_fn(shape, |(i, j, k, t)| {
        (t * 1_000_000 + i * 10_000 + j * 100 + k) as f32
    })
}

/// A sink keeping the origin and size of every frame it is shown.
#[derive(Debug, Default)]
pub struct Recorder {
    pub shown: Vec<(Option<PlaneIndex>, u32, u32)>,
}

impl Sink for Recorder {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.shown
            .push((frame.origin().copied(), frame.width(), frame.height()));
        Ok(())
    }
}
