//! Built-in sixel output.
use std::convert::TryFrom;
use std::io::Write;

use icy_sixel::{sixel_string, DiffusionMethod, MethodForLargest, MethodForRep, PixelFormat, Quality};
use log::debug;

use super::Sink;
use crate::error::{NiicatError, Result};
use crate::render::Frame;

/// A sink writing frames as sixel escape sequences to a stream, usually
/// the standard output of a sixel-capable terminal.
#[derive(Debug)]
pub struct SixelSink<W> {
    out: W,
}

impl<W> SixelSink<W>
where
    W: Write,
{
    /// Create a sink writing to `out`.
    pub fn new(out: W) -> Self {
        SixelSink { out }
    }

    /// Retrieve the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Encode a frame as a sixel escape sequence.
pub fn encode(frame: &Frame) -> Result<String> {
    let rgb = frame.image().to_rgb8();
    let too_large = |_| NiicatError::RenderFailure("frame too large for sixel output".to_string());
    let width = i32::try_from(rgb.width()).map_err(too_large)?;
    let height = i32::try_from(rgb.height()).map_err(too_large)?;
    sixel_string(
        rgb.as_raw(),
        width,
        height,
        PixelFormat::RGB888,
        DiffusionMethod::Stucki,
        MethodForLargest::Auto,
        MethodForRep::Auto,
        Quality::HIGH,
    )
    .map_err(|e| NiicatError::RenderFailure(e.to_string()))
}

impl<W> Sink for SixelSink<W>
where
    W: Write,
{
    fn show(&mut self, frame: &Frame) -> Result<()> {
        let sixel = encode(frame)?;
        debug!("writing {} bytes of sixel data", sixel.len());
        self.out.write_all(sixel.as_bytes())?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, Resolution};
    use ndarray::Array2;

    #[test]
    fn writes_one_sequence_per_frame() {
        let plane = Array2::<f32>::from_shape_fn((8, 6), |(x, y)| (x * y) as f32);
        let frame = render(plane.view(), Resolution::default()).unwrap();

        let mut sink = SixelSink::new(Vec::new());
        sink.show(&frame).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("\x1bP"), "not a DCS sequence: {:?}", &out[..8]);
        assert!(out.trim_end().ends_with("\x1b\\"));
        assert_eq!(out.matches("\x1bP").count(), 1);
    }
}
