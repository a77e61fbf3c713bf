/// Console formatting module - Pure rendering concerns
///
/// This module handles the `--preview` output of the CLI:
/// - Box-drawn table layout sized to the terminal
/// - Color terminal output
/// - Text truncation and padding
///
/// It accepts an already formatted [`ReportData`] and renders its display strings; no value
/// formatting happens here. The width helpers are shared with the document renderer, which
/// shortens cell text with the same rules.
///
/// ## Output Flexibility
///
/// `TableWriter` writes to any `std::io::Write` destination:
/// - Console (stdout) with optional colors
/// - String buffers (for tests)
/// - Files
use crate::report::ReportData;
use std::io::{self, Write};
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a preview column may get before its text is shortened
pub const MAX_COLUMN_WIDTH: usize = 40;
/// Columns are never shrunk below this width
pub const MIN_COLUMN_WIDTH: usize = 6;

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Write formatted text, optionally with color
    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            if let Some(ref mut t) = term::stdout() {
                let _ = t.fg(color);
                let _ = t.write_all(text.as_bytes());
                let _ = t.reset();
                Ok(())
            } else {
                write!(self.writer, "{}", text)
            }
        } else {
            write!(self.writer, "{}", text)
        }
    }

    fn writeln(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write a horizontal border using the given corner/junction characters
    fn write_border(&mut self, widths: &[usize], left: char, mid: char, right: char) -> io::Result<()> {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        writeln!(self.writer, "{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    /// Write one table row; numeric columns are right-aligned
    fn write_row(&mut self, cells: &[String], widths: &[usize], right_align: &[bool], color: Color) -> io::Result<()> {
        let displays: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(right_align)
            .map(|((cell, &width), &right)| {
                if right { pad_left(&truncate_to_width(cell, width), width) } else { truncate_with_padding(cell, width) }
            })
            .collect();

        let row = format!("│ {} │", displays.join(" │ "));
        self.write_colored(&row, color)?;
        self.writeln()
    }

    /// Write the title block and a box table of the first `max_rows` rows
    pub fn write_preview(&mut self, data: &ReportData, max_rows: usize, terminal_width: usize) -> io::Result<()> {
        writeln!(self.writer, "{}", data.title)?;
        if let Some(subtitle) = &data.subtitle {
            writeln!(self.writer, "{}", subtitle)?;
        }

        if data.columns.is_empty() {
            return writeln!(self.writer, "(sin columnas)");
        }

        let shown: Vec<Vec<String>> = data.rows.iter().take(max_rows).map(|row| data.display_row(row)).collect();
        let headers: Vec<String> = data.columns.iter().map(|c| c.header.clone()).collect();
        let widths = plan_column_widths(&headers, &shown, terminal_width);
        let right_align: Vec<bool> = data.columns.iter().map(|c| c.kind.is_numeric()).collect();
        let left_align = vec![false; widths.len()];

        self.write_border(&widths, '┌', '┬', '┐')?;
        self.write_row(&headers, &widths, &left_align, term::color::BRIGHT_CYAN)?;
        self.write_border(&widths, '├', '┼', '┤')?;
        for cells in &shown {
            self.write_row(cells, &widths, &right_align, term::color::WHITE)?;
        }
        self.write_border(&widths, '└', '┴', '┘')?;

        if data.rows.is_empty() {
            writeln!(self.writer, "Sin registros")?;
        } else if data.rows.len() > shown.len() {
            writeln!(self.writer, "... {} de {} filas mostradas", shown.len(), data.rows.len())?;
        } else {
            writeln!(self.writer, "{} filas", data.rows.len())?;
        }
        Ok(())
    }
}

/// Fit column widths to the terminal.
///
/// Each column starts at the widest of its header and shown cells (capped at
/// [`MAX_COLUMN_WIDTH`]); the widest columns are then narrowed one step at a time until the
/// table fits or every column is at [`MIN_COLUMN_WIDTH`].
pub fn plan_column_widths(headers: &[String], rows: &[Vec<String>], terminal_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest_cell = rows.iter().filter_map(|r| r.get(i)).map(|c| display_width(c)).max().unwrap_or(0);
            display_width(header).max(widest_cell).clamp(1, MAX_COLUMN_WIDTH)
        })
        .collect();

    // "│ " + " │ " between columns + " │"
    let chrome = 3 * widths.len() + 1;
    let available = terminal_width.saturating_sub(chrome);
    let mut total: usize = widths.iter().sum();

    while total > available {
        let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if widest <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[idx] -= 1;
        total -= 1;
    }
    widths
}

/// Print a preview table to stdout, sized to the terminal unless a width is given
pub fn print_preview(data: &ReportData, max_rows: usize, width_override: Option<usize>) {
    let width = width_override.unwrap_or_else(get_terminal_width);
    let mut writer = TableWriter::new(io::stdout(), true);
    let _ = writer.write_preview(data, max_rows, width);
}

/// Get terminal width or default to 120
pub fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        120 // Default width
    }
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Shorten a string to at most `width` display columns, ending in "..." when cut
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }

    // Reserve space for "..."
    let target_width = if width >= 3 { width - 3 } else { width };
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + c_width > target_width {
            break;
        }
        result.push(c);
        current_width += c_width;
    }

    if width >= 3 {
        result.push_str("...");
    }
    result
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let mut result = truncate_to_width(s, width);
    let current_width = display_width(&result);
    if current_width < width {
        result.push_str(&" ".repeat(width - current_width));
    }
    result
}

/// Right-align a string within `width` display columns
pub fn pad_left(s: &str, width: usize) -> String {
    let current_width = display_width(s);
    if current_width >= width { s.to_string() } else { format!("{}{}", " ".repeat(width - current_width), s) }
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
