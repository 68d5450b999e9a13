//! Terminal previews of NIfTI-1 volumes and plain images.
//!
//! A preview is a single 2D plane taken from a 3D or 4D volume, rendered to
//! a grayscale raster and handed to a terminal graphics backend. Without
//! explicit indices, the middle slice of the middle volume is shown.
//!
//! # Example
//!
//! ```no_run
//! use niicat::{Axis, Backend, Input, Resolution, Selection, Sink};
//! # use niicat::Result;
//!
//! # fn run() -> Result<()> {
//! let input = Input::open("bold.nii.gz")?;
//! let frame = input.frame(Axis::Axial, Selection::middle().with_slice(12), Resolution::default())?;
//! let mut sink = Backend::Sixel.sink(None)?;
//! sink.show(&frame)?;
//! # Ok(())
//! # }
//! ```
//!
//! Every volume of a 4D image can also be shown in turn with a [`Movie`].
//! [`Preview`] runs either mode from a set of options, as the `niicat`
//! binary does.
//!
//! [`Movie`]: ./movie/struct.Movie.html
//! [`Preview`]: ./preview/struct.Preview.html
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

pub mod display;
pub mod error;
pub mod input;
pub mod movie;
pub mod preview;
pub mod render;
pub mod selection;
pub mod volume;

pub use crate::display::{pipe_to_helper, Backend, ExternalHelper, Sink, SixelSink};
pub use crate::error::{NiicatError, Result};
pub use crate::input::{Input, InputKind};
pub use crate::movie::{Announced, Movie};
pub use crate::preview::Preview;
pub use crate::render::{render, Frame, Resolution};
pub use crate::selection::{resolve, Axis, PlaneIndex, Selection};
pub use crate::volume::Volume;
