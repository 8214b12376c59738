//! Input sources: named files or standard input, read as one stream of lines.

use crate::error::{ReportError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A source of benchmark output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `-` means standard input, anything else is a file path.
    pub fn from_arg(arg: impl AsRef<Path>) -> Self {
        let arg = arg.as_ref();
        if arg == Path::new("-") {
            Input::Stdin
        } else {
            Input::File(arg.to_path_buf())
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> PathBuf {
        match self {
            Input::Stdin => PathBuf::from("<stdin>"),
            Input::File(path) => path.clone(),
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Input::Stdin => Ok(Box::new(io::stdin().lock())),
            Input::File(path) => {
                let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Read every input in order as a single stream of lines.
///
/// Inputs are opened lazily; a file that cannot be opened shows up as an error at
/// its position in the stream.
pub fn read_lines(inputs: Vec<Input>) -> impl Iterator<Item = Result<String>> {
    inputs.into_iter().flat_map(|input| {
        let name = input.name();
        let lines: Box<dyn Iterator<Item = Result<String>>> = match input.open() {
            Ok(reader) => Box::new(
                reader
                    .lines()
                    .map(move |line| line.map_err(|e| ReportError::io(name.clone(), e))),
            ),
            Err(e) => Box::new(std::iter::once(Err(e))),
        };
        lines
    })
}
