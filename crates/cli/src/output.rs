//! CLI output formatting utilities.
//!
//! Colored status lines for the terminal. Results go to stdout, warnings and
//! errors to stderr.

use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const INFO: &str = "•";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

/// Prints a root's build diagnostics as a delimited block on stderr.
pub fn print_warnings(root: &str, warnings: &str) {
  eprint!("{}", warnings_block(root, warnings));
}

fn warnings_block(root: &str, warnings: &str) -> String {
  let mut block = format!("---start Warnings---\nWarnings for: {}\n{}", root, warnings);
  if !warnings.ends_with('\n') {
    block.push('\n');
  }
  block.push_str("---End warnings---\n");
  block
}
