//! This module defines where rendered frames go: the [`Sink`] trait and
//! the terminal backends implementing it.
//!
//! Two kinds of backends exist. External helpers (`imgcat`, `img2sixel`)
//! receive each frame as PNG bytes on their standard input and take care
//! of talking to the terminal themselves. The in-process sixel backend
//! encodes the frame and writes the escape sequence directly.
//!
//! [`Sink`]: ./trait.Sink.html

pub mod helper;
pub mod sixel;

pub use self::helper::{pipe_to_helper, ExternalHelper};
pub use self::sixel::SixelSink;

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::error::Result;
use crate::render::Frame;

/// A consumer of rendered frames.
pub trait Sink {
    /// Called before each frame of a sequence, with the 0-based position of
    /// the upcoming frame and the length of the sequence.
    fn begin(&mut self, _position: usize, _total: usize) -> Result<()> {
        Ok(())
    }

    /// Display a single frame.
    fn show(&mut self, frame: &Frame) -> Result<()>;
}

impl<'a, S> Sink for &'a mut S
where
    S: Sink + ?Sized,
{
    fn begin(&mut self, position: usize, total: usize) -> Result<()> {
        (**self).begin(position, total)
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        (**self).show(frame)
    }
}

impl<S> Sink for Box<S>
where
    S: Sink + ?Sized,
{
    fn begin(&mut self, position: usize, total: usize) -> Result<()> {
        (**self).begin(position, total)
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        (**self).show(frame)
    }
}

/// The terminal graphics backend to display frames with.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum Backend {
    /// iTerm2's `imgcat` (inline image protocol).
    Imgcat,
    /// libsixel's `img2sixel`.
    Img2sixel,
    /// Built-in sixel encoder, no external program needed.
    Sixel,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Imgcat
    }
}

impl Backend {
    /// All backends, in the order they are listed to the user.
    pub const ALL: [Backend; 3] = [Backend::Imgcat, Backend::Img2sixel, Backend::Sixel];

    /// The name of the backend as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Imgcat => "imgcat",
            Backend::Img2sixel => "img2sixel",
            Backend::Sixel => "sixel",
        }
    }

    /// The external program this backend runs, if any.
    pub fn helper_name(self) -> Option<&'static str> {
        match self {
            Backend::Imgcat => Some("imgcat"),
            Backend::Img2sixel => Some("img2sixel"),
            Backend::Sixel => None,
        }
    }

    /// Set up a sink for this backend. For helper backends, `program`
    /// replaces the default helper name and may be a path to the program.
    ///
    /// # Errors
    ///
    /// - `NiicatError::MissingExternalTool` if the helper cannot be found.
    pub fn sink(self, program: Option<&Path>) -> Result<Box<dyn Sink>> {
        match (self.helper_name(), program) {
            (Some(_), Some(program)) => Ok(Box::new(ExternalHelper::locate(program)?)),
            (Some(name), None) => Ok(Box::new(ExternalHelper::locate(name)?)),
            (None, program) => {
                if let Some(program) = program {
                    warn!(
                        "the {} backend does not run a helper, ignoring {}",
                        self,
                        program.display()
                    );
                }
                Ok(Box::new(SixelSink::new(io::stdout())))
            }
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        Backend::ALL
            .iter()
            .copied()
            .find(|backend| backend.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown backend `{}`, expected one of imgcat, img2sixel, sixel",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        for backend in Backend::ALL.iter() {
            assert_eq!(backend.name().parse::<Backend>(), Ok(*backend));
            assert_eq!(backend.to_string(), backend.name());
        }
        assert_eq!("IMGCAT".parse::<Backend>(), Ok(Backend::Imgcat));
        assert!("kitty".parse::<Backend>().is_err());
        assert_eq!(Backend::default(), Backend::Imgcat);
    }

    #[test]
    fn helpers() {
        assert_eq!(Backend::Imgcat.helper_name(), Some("imgcat"));
        assert_eq!(Backend::Img2sixel.helper_name(), Some("img2sixel"));
        assert_eq!(Backend::Sixel.helper_name(), None);
    }
}
