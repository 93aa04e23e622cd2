// src/ui/console.rs

//! User-facing console output.
//!
//! Everything the user is meant to read goes through here; diagnostics go
//! through the `log` macros instead.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Write};

use crate::ui::Palette;

/// Coloured line printer and prompt reader over an input and an output.
pub struct Console {
    palette: Palette,
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
}

impl Console {
    pub fn new(palette: Palette, input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            palette,
            input: RefCell::new(Box::new(input)),
            output: RefCell::new(Box::new(output)),
        }
    }

    /// Console on the process's stdin and stdout.
    pub fn stdio(palette: Palette) -> Self {
        Self::new(palette, BufReader::new(io::stdin()), io::stdout())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn emit(&self, text: &str, newline: bool) {
        let mut out = self.output.borrow_mut();
        let written = if newline {
            writeln!(out, "{text}")
        } else {
            write!(out, "{text}")
        };
        if let Err(e) = written.and_then(|()| out.flush()) {
            log::warn!("Failed to write output: {}", e);
        }
    }

    fn painted(&self, code: &str, message: &str) {
        self.emit(&self.palette.paint(code, message), true);
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        self.emit("", true);
        self.painted(self.palette.header, title);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.painted(self.palette.green, message);
    }

    /// Print a neutral status message
    pub fn info(&self, message: &str) {
        self.painted(self.palette.cyan, message);
    }

    /// Print a warning
    pub fn warn(&self, message: &str) {
        self.painted(self.palette.warning, message);
    }

    /// Print a failure
    pub fn fail(&self, message: &str) {
        self.painted(self.palette.fail, message);
    }

    /// Print de-emphasized text
    pub fn dim(&self, message: &str) {
        self.painted(self.palette.dim, message);
    }

    /// Print pre-rendered text as is
    pub fn block(&self, text: &str) {
        self.emit(text, true);
    }

    /// Ask for one line of input. `None` at end of input.
    pub fn prompt(&self, label: &str) -> Option<String> {
        self.emit(label, false);

        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    /// Output sink whose contents stay readable after the console takes it.
    #[derive(Clone, Default)]
    pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

    impl SharedOutput {
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::testing::SharedOutput;
    use super::*;

    #[test]
    fn test_prompt_reads_trimmed_lines_until_eof() {
        let out = SharedOutput::default();
        let console = Console::new(Palette::plain(), Cursor::new("  3 \nyes\n"), out.clone());

        assert_eq!(console.prompt("> ").as_deref(), Some("3"));
        assert_eq!(console.prompt("? ").as_deref(), Some("yes"));
        assert_eq!(console.prompt("> "), None);
        assert_eq!(out.text(), "> ? > ");
    }

    #[test]
    fn test_messages_are_painted() {
        let out = SharedOutput::default();
        let console = Console::new(Palette::ansi(), Cursor::new(""), out.clone());

        console.fail("boom");
        assert_eq!(out.text(), "\x1b[91mboom\x1b[0m\n");
    }
}
