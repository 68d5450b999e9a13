//! External terminal image helpers.
//!
//! A helper is a program that reads an encoded image on its standard input
//! and prints it to the terminal, such as iTerm2's `imgcat` or libsixel's
//! `img2sixel`. Helpers are looked up on `PATH` before use, so that an
//! absent program is reported as `NiicatError::MissingExternalTool` instead
//! of a failing shell command.
use std::env;
use std::ffi::OsStr;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use super::Sink;
use crate::error::{NiicatError, Result};
use crate::render::Frame;

/// An external program which displays images piped into it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExternalHelper {
    name: String,
    program: PathBuf,
}

impl ExternalHelper {
    /// Find a helper program. A bare name is searched for in the directories
    /// of the `PATH` environment variable, while anything with a directory
    /// component is taken as a path to the program.
    ///
    /// # Errors
    ///
    /// - `NiicatError::MissingExternalTool` if no executable file is found.
    pub fn locate<P: AsRef<Path>>(program: P) -> Result<Self> {
        let search_path = env::var_os("PATH").unwrap_or_default();
        Self::locate_in(program, search_path)
    }

    /// Find a helper program, searching the given list of directories
    /// (in the platform's `PATH` format) for bare names.
    pub fn locate_in<P, S>(program: P, search_path: S) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref();
        let name = program.display().to_string();

        let found = if program.components().count() > 1 {
            Some(program.to_path_buf()).filter(|p| is_executable(p))
        } else {
            env::split_paths(&search_path)
                .filter(|dir| !dir.as_os_str().is_empty())
                .flat_map(|dir| candidates(&dir, program))
                .find(|p| is_executable(p))
        };

        match found {
            Some(program) => {
                debug!("using {} at {}", name, program.display());
                Ok(ExternalHelper { name, program })
            }
            None => Err(NiicatError::MissingExternalTool(name)),
        }
    }

    /// The name the helper was looked up with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved path to the helper program.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the helper once with `bytes` on its standard input and wait for
    /// it to finish.
    ///
    /// # Errors
    ///
    /// - `NiicatError::MissingExternalTool` if the program disappeared.
    /// - `NiicatError::HelperFailed` if it exits with a non-zero status.
    /// - `NiicatError::Io` on any other failure to run it.
    pub fn pipe(&self, bytes: &[u8]) -> Result<()> {
        info!("piping {} bytes into {}", bytes.len(), self.name);
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                IoErrorKind::NotFound => NiicatError::MissingExternalTool(self.name.clone()),
                _ => NiicatError::from(e),
            })?;

        // stdin is closed when dropped at the end of this statement
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(bytes),
            None => Ok(()),
        };
        let status = child.wait()?;
        if !status.success() {
            return Err(NiicatError::HelperFailed(self.name.clone(), status));
        }
        match written {
            // the helper may stop reading once it has what it needs
            Err(ref e) if e.kind() == IoErrorKind::BrokenPipe => Ok(()),
            Err(e) => Err(e.into()),
            Ok(()) => Ok(()),
        }
    }
}

impl Sink for ExternalHelper {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        let png = frame.to_png()?;
        self.pipe(&png)
    }
}

/// Look up the helper `name` on `PATH` and pipe `bytes` into it.
pub fn pipe_to_helper(bytes: &[u8], name: &str) -> Result<()> {
    ExternalHelper::locate(name)?.pipe(bytes)
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let mut out = vec![dir.join(program)];
    if program.extension().is_none() {
        for ext in &["exe", "bat", "cmd"] {
            out.push(dir.join(program).with_extension(ext));
        }
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
