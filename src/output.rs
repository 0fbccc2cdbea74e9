//! Console status messages.
//!
//! Informational lines go to stdout in bright cyan, errors to stderr in
//! bright red. Color is only applied when the stream is a terminal so that
//! package-manager logs stay plain text.

use std::io::{self, Write};

use console::{style, Color, Term};

fn paint(text: &str, color: Color, is_tty: bool) -> String {
    if is_tty {
        style(text).fg(color).bright().to_string()
    } else {
        text.to_string()
    }
}

pub fn info_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{}", paint(msg, Color::Cyan, is_tty));
}

pub fn error_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{}", paint(&format!("ERROR: {msg}"), Color::Red, is_tty));
}

pub fn info(msg: &str) {
    info_to_with_tty(&mut io::stdout(), msg, Term::stdout().is_term());
}

pub fn error(msg: &str) {
    error_to_with_tty(&mut io::stderr(), msg, Term::stderr().is_term());
}
