//! Terminal output helpers: coloured notes and a plain aligned table.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Colour unless `NO_COLOR` is set or the terminal is dumb.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// Left-aligned table; every cell is plain text.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let separators: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let separators: Vec<&str> = separators.iter().map(String::as_str).collect();

    let mut out = line(headers);
    out.push_str(&line(&separators));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns() {
        let table = render_table(
            &["ROLE", "CAPS"],
            &[
                vec!["VIEWER".into(), "5".into()],
                vec!["SUPER_ADMIN".into(), "17".into()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "  ROLE         CAPS");
        assert_eq!(lines[1], "  -----------  ----");
        assert_eq!(lines[2], "  VIEWER       5");
        assert_eq!(lines[3], "  SUPER_ADMIN  17");
    }
}
