//! Plain-text rendering of accounts and messages for the terminal.

use crate::{Account, MessageDetail, MessageSummary};
use chrono::{DateTime, Utc};
use crossterm::style::{StyledContent, Stylize};
use crossterm::tty::IsTty;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub const NO_SUBJECT: &str = "(No subject)";
pub const NO_CONTENT: &str = "(No content)";
pub const NO_MESSAGES: &str = "No messages found";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HEADERS: [&str; 4] = ["ID", "From", "Subject", "Date"];
const COLUMN_GAP: &str = "  ";

/// Colors for terminal output.
///
/// With color off every helper returns the text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub const PLAIN: Theme = Theme { color: false };
    pub const COLOR: Theme = Theme { color: true };

    /// Color only when stdout is a terminal.
    pub fn for_stdout() -> Self {
        Self {
            color: io::stdout().is_tty(),
        }
    }

    fn paint(self, content: StyledContent<&str>) -> String {
        if self.color {
            content.to_string()
        } else {
            content.content().to_string()
        }
    }

    pub fn error(self, text: &str) -> String {
        self.paint(text.red())
    }

    pub fn success(self, text: &str) -> String {
        self.paint(text.green())
    }

    pub fn warning(self, text: &str) -> String {
        self.paint(text.yellow())
    }

    pub fn title(self, text: &str) -> String {
        self.paint(text.bold().blue())
    }

    pub fn heading(self, text: &str) -> String {
        self.paint(text.bold().cyan())
    }

    pub fn emphasis(self, text: &str) -> String {
        self.paint(text.bold())
    }

    fn table_header(self, text: &str) -> String {
        self.paint(text.bold().magenta())
    }

    fn dim(self, text: &str) -> String {
        self.paint(text.dim())
    }
}

/// Format an ISO-8601 timestamp as UTC `YYYY-MM-DD HH:MM:SS`.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Replace control characters so a cell stays on one line.
fn cell_text(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Print the credentials of a freshly created account.
pub fn render_account<W: Write>(out: &mut W, account: &Account, theme: Theme) -> io::Result<()> {
    writeln!(out, "{}", theme.success("Account created successfully!"))?;
    writeln!(out, "Email: {}", account.address)?;
    writeln!(out, "Password: {}", account.password)
}

/// Print the inbox as an aligned table, or the "no messages" line when empty.
pub fn render_listing<W: Write>(
    out: &mut W,
    messages: &[MessageSummary],
    theme: Theme,
) -> io::Result<()> {
    if messages.is_empty() {
        return writeln!(out, "{}", theme.warning(NO_MESSAGES));
    }

    let rows: Vec<[String; 4]> = messages
        .iter()
        .map(|msg| {
            [
                cell_text(&msg.id),
                cell_text(&msg.from.address),
                cell_text(or_placeholder(msg.subject.as_deref(), NO_SUBJECT)),
                cell_text(&format_timestamp(&msg.created_at)),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    write_row(out, &HEADERS, &widths, |_, cell| theme.table_header(cell))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths, |_, cell| cell.to_string())?;
    for row in &rows {
        write_row(out, row, &widths, |column, cell| match column {
            0 => theme.dim(cell),
            _ => cell.to_string(),
        })?;
    }
    Ok(())
}

/// Write one padded row; `paint` styles a cell after its width is measured.
fn write_row<W, S, F>(out: &mut W, cells: &[S], widths: &[usize; 4], paint: F) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
    F: Fn(usize, &str) -> String,
{
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(&paint(i, cell));
        // The last column is not padded.
        if i + 1 < widths.len() {
            line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
        }
    }
    writeln!(out, "{line}")
}

/// Print one message as labeled lines.
pub fn render_detail<W: Write>(out: &mut W, message: &MessageDetail) -> io::Result<()> {
    writeln!(out, "From: {}", message.from.address)?;
    writeln!(out, "Subject: {}", or_placeholder(message.subject.as_deref(), NO_SUBJECT))?;
    writeln!(out, "Content:")?;
    writeln!(out, "{}", or_placeholder(message.text.as_deref(), NO_CONTENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sender;

    fn summary(id: &str, subject: Option<&str>, created_at: &str) -> MessageSummary {
        MessageSummary {
            id: id.to_string(),
            from: Sender {
                address: "sender@example.org".to_string(),
                name: None,
            },
            subject: subject.map(str::to_string),
            created_at: created_at.to_string(),
        }
    }

    fn rendered(messages: &[MessageSummary]) -> String {
        let mut out = Vec::new();
        render_listing(&mut out, messages, Theme::PLAIN).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn timestamp_with_zulu_suffix() {
        assert_eq!(format_timestamp("2024-01-15T10:30:00Z"), "2024-01-15 10:30:00");
    }

    #[test]
    fn timestamp_with_offset_is_normalized_to_utc() {
        assert_eq!(
            format_timestamp("2024-01-15T12:30:00+02:00"),
            "2024-01-15 10:30:00"
        );
    }

    #[test]
    fn malformed_timestamp_passes_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn empty_listing_is_not_a_table() {
        let text = rendered(&[]);
        assert_eq!(text, "No messages found\n");
        assert!(!text.contains("Subject"));
    }

    #[test]
    fn listing_shows_placeholder_and_date() {
        let text = rendered(&[summary("65a4f1", None, "2024-01-15T10:30:00Z")]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].contains("sender@example.org"));
        assert!(lines[2].contains(NO_SUBJECT));
        assert!(lines[2].ends_with("2024-01-15 10:30:00"));
    }

    #[test]
    fn empty_subject_also_uses_placeholder() {
        let text = rendered(&[summary("1", Some(""), "2024-01-15T10:30:00Z")]);
        assert!(text.contains(NO_SUBJECT));
    }

    #[test]
    fn columns_align_on_display_width() {
        let text = rendered(&[
            summary("1", Some("héllo wörld"), "2024-01-15T10:30:00Z"),
            summary("2", Some("plain"), "2024-01-16T08:00:00Z"),
        ]);
        let date_cols: Vec<usize> = text
            .lines()
            .skip(2)
            .map(|line| {
                let idx = line.find("2024-").unwrap();
                line[..idx].width()
            })
            .collect();
        assert_eq!(date_cols[0], date_cols[1]);
    }

    #[test]
    fn detail_placeholders() {
        let message = MessageDetail {
            id: None,
            from: Sender {
                address: "a@b.c".to_string(),
                name: None,
            },
            subject: None,
            text: None,
        };
        let mut out = Vec::new();
        render_detail(&mut out, &message).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "From: a@b.c\nSubject: (No subject)\nContent:\n(No content)\n"
        );
    }

    #[test]
    fn control_characters_stay_in_their_cell() {
        let text = rendered(&[
            summary("1", Some("line one\nline\ttwo\r"), "2024-01-15T10:30:00Z"),
            summary("2", Some("plain"), "2024-01-16T08:00:00Z"),
        ]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("line one line two"));
        assert!(!text.contains('\t'));

        let date_cols: Vec<usize> = lines[2..]
            .iter()
            .map(|line| line[..line.find("2024-").unwrap()].width())
            .collect();
        assert_eq!(date_cols[0], date_cols[1]);
    }

    #[test]
    fn plain_theme_emits_no_escapes() {
        assert_eq!(Theme::PLAIN.error("Message not found"), "Message not found");
        assert_eq!(Theme::default(), Theme::PLAIN);
    }

    #[test]
    fn color_theme_wraps_text() {
        let painted = Theme::COLOR.emphasis("Message not found");
        assert!(painted.contains("Message not found"));
        assert!(painted.starts_with('\u{1b}'));
    }

    #[test]
    fn colored_table_keeps_alignment() {
        let messages = [
            summary("1", Some("héllo"), "2024-01-15T10:30:00Z"),
            summary("22", Some("plain subject"), "2024-01-16T08:00:00Z"),
        ];
        let mut out = Vec::new();
        render_listing(&mut out, &messages, Theme::COLOR).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains('\u{1b}'));
        let plain = rendered(&messages);
        let strip = |line: &str| {
            let mut s = String::new();
            let mut in_escape = false;
            for c in line.chars() {
                match (in_escape, c) {
                    (false, '\u{1b}') => in_escape = true,
                    (true, 'm') => in_escape = false,
                    (false, c) => s.push(c),
                    _ => {}
                }
            }
            s
        };
        let stripped: Vec<String> = text.lines().map(strip).collect();
        let expected: Vec<&str> = plain.lines().collect();
        assert_eq!(stripped, expected);
    }

    #[test]
    fn account_lines() {
        let account = Account {
            address: "abc@x.test".to_string(),
            password: "Pw".to_string(),
        };
        let mut out = Vec::new();
        render_account(&mut out, &account, Theme::PLAIN).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Email: abc@x.test"));
        assert!(text.contains("Password: Pw"));
    }
}
