//! Sequential display of every volume of a 4D image, as a flip-book.
use std::io::Write;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::display::Sink;
use crate::error::{NiicatError, Result};
use crate::render::{Frame, Resolution};
use crate::selection::{Axis, Selection};
use crate::volume::Volume;

/// Default pause between two frames.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Clears the screen and moves the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Settings for playing a 4D volume frame by frame.
///
/// The spatial slice stays the same for the whole sequence while the volume
/// index runs from first to last.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Movie {
    axis: Axis,
    slice: Option<usize>,
    resolution: Resolution,
    delay: Duration,
}

impl Default for Movie {
    fn default() -> Self {
        Movie::new(Axis::default())
    }
}

impl Movie {
    /// A movie of middle slices along `axis`.
    pub fn new(axis: Axis) -> Self {
        Movie {
            axis,
            slice: None,
            resolution: Resolution::default(),
            delay: DEFAULT_DELAY,
        }
    }

    /// Show this slice instead of the middle one.
    pub fn slice(mut self, slice: Option<usize>) -> Self {
        self.slice = slice;
        self
    }

    /// Render frames at this resolution.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Pause this long between frames.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Render and show every volume in order. Returns the number of frames
    /// shown.
    ///
    /// # Errors
    ///
    /// - `NiicatError::InvalidModeCombination` if the volume is not 4D. No
    ///   frame is rendered in that case.
    /// - Any error from selecting, rendering or showing a frame, which stops
    ///   the sequence there.
    pub fn play<S>(&self, volume: &Volume, sink: &mut S) -> Result<usize>
    where
        S: Sink + ?Sized,
    {
        if volume.dimensionality() != 4 {
            return Err(NiicatError::InvalidModeCombination(volume.dimensionality()));
        }

        let total = volume.num_volumes();
        for v in 0..total {
            if v > 0 && self.delay > Duration::from_secs(0) {
                thread::sleep(self.delay);
            }
            let selection = Selection {
                slice: self.slice,
                volume: Some(v),
            };
            let frame = volume.frame(self.axis, selection, self.resolution)?;
            debug!("showing frame {}/{}", v + 1, total);
            sink.begin(v, total)?;
            sink.show(&frame)?;
        }
        Ok(total)
    }
}

/// A sink wrapper which clears the terminal and prints the position in the
/// sequence before every frame.
#[derive(Debug)]
pub struct Announced<S, W> {
    inner: S,
    out: W,
}

impl<S, W> Announced<S, W>
where
    S: Sink,
    W: Write,
{
    /// Wrap `inner`, writing announcements to `out`.
    pub fn new(inner: S, out: W) -> Self {
        Announced { inner, out }
    }

    /// Take back the wrapped sink and stream.
    pub fn into_inner(self) -> (S, W) {
        (self.inner, self.out)
    }
}

impl<S, W> Sink for Announced<S, W>
where
    S: Sink,
    W: Write,
{
    fn begin(&mut self, position: usize, total: usize) -> Result<()> {
        write!(self.out, "{}", CLEAR_SCREEN)?;
        writeln!(self.out, "Displaying Volume {}/{}", position + 1, total)?;
        self.out.flush()?;
        self.inner.begin(position, total)
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.inner.show(frame)
    }
}
