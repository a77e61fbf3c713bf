/// Console output for the CLI
///
/// Every line goes through one labelled printer: status lines carry the program prefix,
/// warnings and errors a coloured label. Output is serialized so lines never interleave.
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

lazy_static! {
    static ref CONSOLE: Mutex<()> = Mutex::new(());
}

/// Kind of console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Status,
    Warning,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Status => "grua-report",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    fn color(self) -> Option<term::color::Color> {
        match self {
            Level::Status => None,
            Level::Warning => Some(term::color::BRIGHT_YELLOW),
            Level::Error => Some(term::color::BRIGHT_RED),
        }
    }
}

/// The line as printed when the terminal has no colour support
pub fn plain_line(level: Level, msg: &str) -> String {
    format!("{}: {}", level.label(), msg)
}

/// Write `label` in bold colour; false when the terminal can't do it
fn write_colored(label: &str, fg: term::color::Color) -> bool {
    let Some(mut t) = term::stdout() else {
        return false;
    };
    if t.fg(fg).is_err() {
        return false;
    }
    let _ = t.attr(term::Attr::Bold);
    let written = write!(t, "{}", label).is_ok();
    let _ = t.reset();
    written
}

/// Print one labelled line
pub fn emit(level: Level, msg: &str) {
    let _guard = CONSOLE.lock();

    if level == Level::Error {
        println!();
    }
    match level.color() {
        Some(fg) if write_colored(level.label(), fg) => println!(": {}", msg),
        _ => println!("{}", plain_line(level, msg)),
    }
    if level == Level::Error {
        println!();
    }
}

pub fn status(s: &str) {
    emit(Level::Status, s);
}

pub fn print_warning(msg: &str) {
    emit(Level::Warning, msg);
}

pub fn print_error(msg: &str) {
    emit(Level::Error, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        assert_eq!(plain_line(Level::Status, "Report written"), "grua-report: Report written");
        assert_eq!(plain_line(Level::Warning, "El informe no contiene registros"), "warning: El informe no contiene registros");
        assert_eq!(plain_line(Level::Error, "Formato no disponible"), "error: Formato no disponible");
    }

    #[test]
    fn test_only_problems_are_colored() {
        assert!(Level::Status.color().is_none());
        assert!(Level::Warning.color().is_some());
        assert!(Level::Error.color().is_some());
    }
}
