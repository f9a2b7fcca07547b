//! Interactive collection of job fields not given on the command line

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::error::{Result, JpgScaleError};

pub const SOURCE_PROMPT: &str = "Enter the path to the input JPG image: ";
pub const DESTINATION_PROMPT: &str =
    "Enter the path to save the resized image (including the .jpg filename): ";
pub const PERCENTAGE_PROMPT: &str = "Enter the resizing percentage (e.g., 50 for 50%): ";

pub const NOT_A_NUMBER: &str = "Invalid input. Please enter a numerical value for the percentage.";
pub const OUT_OF_RANGE: &str =
    "The resizing percentage must be greater than 0 and less than 100 for proper reduction.";

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for the source image path
    pub fn source_path(&mut self) -> Result<PathBuf> {
        self.ask(SOURCE_PROMPT).map(PathBuf::from)
    }

    /// Ask for the destination path
    pub fn destination_path(&mut self) -> Result<PathBuf> {
        self.ask(DESTINATION_PROMPT).map(PathBuf::from)
    }

    /// Ask until the reply is a number strictly between 0 and 100
    pub fn percentage(&mut self) -> Result<f64> {
        loop {
            let reply = self.ask(PERCENTAGE_PROMPT)?;
            match reply.trim().parse::<f64>() {
                Ok(value) if value > 0.0 && value < 100.0 => return Ok(value),
                Ok(value) => {
                    debug!("Rejected percentage {}", value);
                    writeln!(self.output, "{}", OUT_OF_RANGE)?;
                }
                Err(_) => {
                    debug!("Rejected non-numeric percentage {:?}", reply);
                    writeln!(self.output, "{}", NOT_A_NUMBER)?;
                }
            }
        }
    }

    /// Print `prompt` and read one line without its line ending
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(JpgScaleError::invalid_argument(
                "Input ended before all prompts were answered",
            ));
        }
        // Paths may legitimately start or end with spaces
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
