//! Text output for the CLI. `render_*` functions build strings so they can be
//! tested; `print_*` functions write them out.

use colored::*;
use logscope::commands::{CmdMessage, MessageLevel};
use logscope::error::Result;
use logscope::form::{FieldState, LiveForm, SettingsState};
use logscope::highlight::RowStyle;
use logscope::row::{DisplayRow, EntryDetail};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";
const SELECTED_MARKER: &str = "(•)";
const UNSELECTED_MARKER: &str = "( )";

pub fn render_table(headers: &[String], rows: &[DisplayRow]) -> String {
    if rows.is_empty() {
        return "No entries found.\n".to_string();
    }

    let cells: Vec<[String; 6]> = rows.iter().map(DisplayRow::cells).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();
    let header_line = join_padded(headers.iter().map(String::as_str), &widths);
    output.push_str(&format!("{}\n", header_line.bold()));

    for (row, cells) in rows.iter().zip(cells.iter()) {
        let line = join_padded(cells.iter().map(String::as_str), &widths);
        let styled = match row.style {
            RowStyle::Plain => line.normal(),
            RowStyle::Alert => line.red().bold(),
            RowStyle::Notice => line.green().bold(),
        };
        output.push_str(&format!("{}\n", styled));
    }
    output
}

/// Pads every cell but the last to its column width.
fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let cells: Vec<&str> = cells.collect();
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == last {
                cell.to_string()
            } else {
                format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width())))
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

pub fn render_rows_json(rows: &[DisplayRow]) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(rows)?))
}

pub fn render_detail(detail: &EntryDetail) -> String {
    let mut output = String::new();
    for (i, (title, text)) in detail.sections().into_iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{}\n{}\n", format!("{}:", title).bold(), text));
    }
    output
}

pub fn render_detail_json(detail: &EntryDetail) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(detail)?))
}

pub fn render_form(form: &LiveForm) -> String {
    let mut output = String::new();
    if let Some(title) = &form.title {
        output.push_str(&format!("{}\n", title.bold()));
    }
    for section in &form.sections {
        if let Some(title) = &section.title {
            output.push_str(&format!("{}\n", format!("[{}]", title).yellow()));
        }
        for field in &section.fields {
            let name = format!("({})", field.name).dimmed();
            match &field.state {
                FieldState::Text { value } => {
                    output.push_str(&format!("  {} {}: {:?}\n", field.label, name, value));
                }
                FieldState::Checkbox { checked } => {
                    let mark = if *checked { "[x]" } else { "[ ]" };
                    output.push_str(&format!("  {} {} {}\n", mark, field.label, name));
                }
                FieldState::Select { choices, selected }
                | FieldState::Radio { choices, selected } => {
                    output.push_str(&format!("  {} {}:\n", field.label, name));
                    for (i, choice) in choices.iter().enumerate() {
                        let marker = if *selected == Some(i) {
                            SELECTED_MARKER
                        } else {
                            UNSELECTED_MARKER
                        };
                        let line = format!("    {} {} = {}", marker, choice.label, choice.value);
                        if choice.disabled {
                            output.push_str(&format!("{}\n", format!("{} [disabled]", line).dimmed()));
                        } else {
                            output.push_str(&format!("{}\n", line));
                        }
                    }
                }
            }
        }
    }
    output
}

pub fn render_settings_json(settings: &SettingsState) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(settings)?))
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let styled = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", styled)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

/// Messages go to stderr when stdout carries machine-readable output.
pub fn eprint_messages(messages: &[CmdMessage]) {
    eprint!("{}", render_messages(messages));
}
