//! A complete preview run: from a loaded input to frames on a sink.
//!
//! [`Preview`] gathers the options of the command line tool. The sink is
//! only opened once the options are known to fit the input, and before the
//! first frame is rendered, so a missing helper fails early.
//!
//! [`Preview`]: ./struct.Preview.html
use std::io::Write;
use std::time::Duration;

use log::debug;

use crate::display::Sink;
use crate::error::{NiicatError, Result};
use crate::input::Input;
use crate::movie::{Announced, Movie};
use crate::render::Resolution;
use crate::selection::{Axis, Selection};

/// Options for previewing an input, either as a single frame or as a movie
/// over all volumes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Preview {
    axis: Axis,
    selection: Selection,
    resolution: Resolution,
    movie: Option<Duration>,
}

impl Default for Preview {
    fn default() -> Self {
        Preview::new(Axis::default())
    }
}

impl Preview {
    /// A single frame of the middle slice along `axis`.
    pub fn new(axis: Axis) -> Self {
        Preview {
            axis,
            selection: Selection::middle(),
            resolution: Resolution::default(),
            movie: None,
        }
    }

    /// Show the given slice and volume.
    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Render frames at this resolution.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Play every volume in turn, pausing `delay` between frames. The
    /// volume index of the selection is ignored.
    pub fn movie(mut self, delay: Duration) -> Self {
        self.movie = Some(delay);
        self
    }

    /// Show `input` on the sink returned by `open_sink`. In movie mode,
    /// progress lines are written to `out`. Returns the number of frames
    /// shown.
    ///
    /// # Errors
    ///
    /// - `NiicatError::InvalidModeCombination` for a movie of anything but
    ///   a 4D volume, before the sink is opened.
    /// - Any error from `open_sink`, before a frame is rendered.
    /// - Any error from rendering or showing a frame.
    pub fn run<F, S, W>(&self, input: &Input, open_sink: F, out: W) -> Result<usize>
    where
        F: FnOnce() -> Result<S>,
        S: Sink,
        W: Write,
    {
        match self.movie {
            Some(delay) => {
                let volume = match input {
                    Input::Volume(volume) if volume.dimensionality() == 4 => volume,
                    other => {
                        return Err(NiicatError::InvalidModeCombination(
                            other.dimensionality(),
                        ))
                    }
                };
                let mut sink = Announced::new(open_sink()?, out);
                debug!("playing {} volumes", volume.num_volumes());
                Movie::new(self.axis)
                    .slice(self.selection.slice)
                    .resolution(self.resolution)
                    .delay(delay)
                    .play(volume, &mut sink)
            }
            None => {
                let mut sink = open_sink()?;
                let frame = input.frame(self.axis, self.selection, self.resolution)?;
                sink.show(&frame)?;
                Ok(1)
            }
        }
    }
}
