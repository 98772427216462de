use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Interactive source selection. `None` means the user backed out.
pub trait SourcePicker {
    fn pick_folder(&mut self) -> Option<PathBuf>;
    fn pick_files(&mut self) -> Option<Vec<PathBuf>>;
}

/// Line-based picker for the terminal.
///
/// A folder is one line; files are one per line, finished by a blank line.
/// A blank first answer or end of input cancels.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, text: &str) {
        if let Err(e) = write!(self.output, "{text}").and_then(|_| self.output.flush()) {
            log::warn!("failed to write prompt: {e}");
        }
    }

    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let line = line.trim();
                (!line.is_empty()).then(|| line.to_string())
            }
            Err(e) => {
                log::warn!("failed to read selection: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> SourcePicker for PromptPicker<R, W> {
    fn pick_folder(&mut self) -> Option<PathBuf> {
        self.prompt("Folder to import (blank to cancel): ");
        self.next_line().map(PathBuf::from)
    }

    fn pick_files(&mut self) -> Option<Vec<PathBuf>> {
        self.prompt("Files to import, one per line (blank line to finish):\n");
        let files: Vec<PathBuf> = std::iter::from_fn(|| self.next_line())
            .map(PathBuf::from)
            .collect();
        (!files.is_empty()).then_some(files)
    }
}
