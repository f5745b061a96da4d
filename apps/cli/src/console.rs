//! # Console
//!
//! Line-oriented prompting over any reader and writer.
//!
//! ```text
//! ┌────────────┐   ask("\tEnter Hotel ID: ")   ┌──────────────┐
//! │  handler   │ ────────────────────────────► │   Prompter   │ ──► stdout
//! │            │ ◄──────────────────────────── │ (BufRead +   │ ◄── stdin
//! └────────────┘        "3" / InputClosed      │    Write)    │
//!                                              └──────────────┘
//! ```
//!
//! The binary wires it to stdin/stdout; tests use a `Cursor` and a
//! `Vec<u8>` so whole sessions can be scripted.

use std::io::{BufRead, Write};

use hotel_core::error::ValidationResult;
use hotel_core::validation::parse_choice;

use crate::error::{CliError, CliResult};

const ANSI_RESET: &str = "\u{1b}[0m";

/// Banner colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Red => "\u{1b}[31m",
            Color::Green => "\u{1b}[32m",
            Color::Yellow => "\u{1b}[33m",
            Color::Cyan => "\u{1b}[36m",
        }
    }
}

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Prompter {
            input,
            output,
            color,
        }
    }

    /// Reads one line without its line ending.
    ///
    /// ## Errors
    /// * `CliError::InputClosed` - End of input
    pub fn read_line(&mut self) -> CliResult<String> {
        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(line)
    }

    /// Prints `prompt` without a newline and reads the answer.
    pub fn ask(&mut self, prompt: &str) -> CliResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> ValidationResult<T>,
    ) -> CliResult<T> {
        loop {
            let answer = self.ask(prompt)?;

            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let message = format!("\t{}", e);
                    self.banner(Color::Red, &message)?;
                }
            }
        }
    }

    /// Reads a menu choice; anything but a number is rejected in place.
    pub fn read_choice(&mut self) -> CliResult<u32> {
        loop {
            let answer = self.ask("Please make your choice: ")?;

            match parse_choice(&answer) {
                Ok(choice) => return Ok(choice),
                Err(_) => self.banner(Color::Red, "Your input is invalid!")?,
            }
        }
    }

    /// Prints a line.
    pub fn say(&mut self, text: &str) -> CliResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints already formatted text as is.
    pub fn print(&mut self, text: &str) -> CliResult<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Prints a colored line.
    pub fn banner(&mut self, color: Color, text: &str) -> CliResult<()> {
        let line = self.paint(color, text);
        self.say(&line)
    }

    /// Wraps `text` in the color's escape codes when colors are on.
    pub fn paint(&self, color: Color, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color.code(), text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    /// Returns the reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Prints the welcome banner.
pub fn greeting<R: BufRead, W: Write>(console: &mut Prompter<R, W>) -> CliResult<()> {
    const ART: [&str; 7] = [
        r"         ___       ___       ___       ___       ___   ",
        r"        /\__\     /\  \     /\  \     /\  \     /\__\  ",
        r"       /:/__/_   /::\  \    \:\  \   /::\  \   /:/  /  ",
        r"      /::\/\__\ /:/\:\__\   /::\__\ /::\:\__\ /:/__/   ",
        r"      \/\::/  / \:\/:/  /  /:/\/__/ \:\:\/  / \:\  \   ",
        r"        /:/  /   \::/  /   \/__/     \:\/  /   \:\__\  ",
        r"        \/__/     \/__/               \/__/     \/__/  ",
    ];

    console.say("\n\n")?;
    console.banner(
        Color::Yellow,
        "======================= Welcome To =======================",
    )?;
    for line in ART {
        console.banner(Color::Cyan, line)?;
    }
    console.say("")?;
    console.banner(
        Color::Yellow,
        "                Database Management System                ",
    )?;
    console.banner(
        Color::Yellow,
        "==========================================================",
    )
}
