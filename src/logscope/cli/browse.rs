//! Line-oriented interactive session.
//!
//! Each input line is one action, mirroring the controls of a table
//! inspector: a search box, filter toggles, header clicks, row selection and
//! an options dialog. Mistakes are reported and the session carries on; only
//! I/O failures end it early.

use super::commands::parse_assignment;
use super::render::{
    render_detail, render_form, render_messages, render_settings_json, render_table,
};
use logscope::api::InspectorApi;
use logscope::commands::{CmdMessage, CmdResult};
use logscope::error::{LogscopeError, Result};
use logscope::form::{parse_bool, LiveForm};
use logscope::sort::Column;
use logscope::window::TimeWindow;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Actions:
  search [TEXT]            filter commands by text (empty clears)
  issues [on|off]          only show issues
  hl-issues [on|off]       mark issue rows
  hl-pattern [on|off]      mark pattern rows
  sort COLUMN              click a column header
  window PRESET            1h, 6h, 24h, 7d, 30d or all
  window START..END        custom range, an empty side stays open
  rows                     show the table again
  show N                   full outputs of row N
  options                  open the options form
  set NAME=VALUE           edit a field of the open form
  accept | cancel          close the form, keeping or dropping edits
  settings                 show the current settings
  help                     this text
  quit                     leave
";

/// What a single action produced.
enum Outcome {
    Output(String),
    Quit,
}

struct Session<'a> {
    api: &'a mut InspectorApi,
    form: Option<LiveForm>,
}

pub fn run<R: BufRead, W: Write>(api: &mut InspectorApi, input: R, out: &mut W) -> Result<()> {
    let mut session = Session { api, form: None };
    let initial = session.api.view();
    write!(out, "{}", render_view(&initial))?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(action = line, "browse action");
        match session.dispatch(line) {
            Ok(Outcome::Output(text)) => write!(out, "{}", text)?,
            Ok(Outcome::Quit) => break,
            Err(err) => write!(out, "{}", render_messages(&[CmdMessage::error(err.to_string())]))?,
        }
        out.flush()?;
    }
    Ok(())
}

impl Session<'_> {
    fn dispatch(&mut self, line: &str) -> Result<Outcome> {
        let (action, rest) = match line.split_once(char::is_whitespace) {
            Some((action, rest)) => (action, rest.trim()),
            None => (line, ""),
        };

        let output = match action {
            "search" => render_view(&self.api.set_query(rest)),
            "issues" => {
                let on = toggle(rest, self.api.view_state().flags.issues_only)?;
                render_view(&self.api.set_issues_only(on))
            }
            "hl-issues" => {
                let on = toggle(rest, self.api.view_state().flags.highlight_issues)?;
                render_view(&self.api.set_highlight_issues(on))
            }
            "hl-pattern" => {
                let on = toggle(rest, self.api.view_state().flags.highlight_pattern)?;
                render_view(&self.api.set_highlight_pattern(on))
            }
            "sort" => {
                let column: Column = rest.parse()?;
                render_view(&self.api.toggle_sort(column))
            }
            "window" => render_view(&self.api.set_time_window(parse_window(rest)?)),
            "rows" => render_view(&self.api.view()),
            "show" => {
                let index: usize = rest
                    .parse()
                    .map_err(|_| LogscopeError::Api(format!("Invalid row number: {}", rest)))?;
                let result = self.api.detail(index)?;
                result.detail.as_ref().map(render_detail).unwrap_or_default()
            }
            "options" => {
                let form = self.api.open_options()?;
                let text = render_form(&form);
                self.form = Some(form);
                text
            }
            "set" => {
                let form = self.open_form()?;
                let (name, value) = parse_assignment(rest)?;
                form.edit(name, value)?;
                render_form(form)
            }
            "accept" => {
                let form = self.take_form()?;
                let result = self.api.submit_options(&form)?;
                render_messages(&result.messages)
            }
            "cancel" => {
                let form = self.take_form()?;
                render_messages(&self.api.cancel_options(form).messages)
            }
            "settings" => render_settings_json(self.api.current_settings())?,
            "help" => HELP.to_string(),
            "quit" | "exit" => return Ok(Outcome::Quit),
            other => {
                return Err(LogscopeError::Api(format!(
                    "Unknown action: {} (try `help`)",
                    other
                )))
            }
        };
        Ok(Outcome::Output(output))
    }

    fn open_form(&mut self) -> Result<&mut LiveForm> {
        self.form
            .as_mut()
            .ok_or_else(|| LogscopeError::Api("No options form is open".into()))
    }

    fn take_form(&mut self) -> Result<LiveForm> {
        self.form
            .take()
            .ok_or_else(|| LogscopeError::Api("No options form is open".into()))
    }
}

fn render_view(result: &CmdResult) -> String {
    format!(
        "{}{}",
        render_table(&result.headers, &result.rows),
        render_messages(&result.messages)
    )
}

/// No argument flips the current value.
fn toggle(arg: &str, current: bool) -> Result<bool> {
    if arg.is_empty() {
        return Ok(!current);
    }
    parse_bool(arg).ok_or_else(|| LogscopeError::Api(format!("Expected on or off, got: {}", arg)))
}

/// A preset, or `START..END` where either bound may hold spaces or be empty.
fn parse_window(arg: &str) -> Result<TimeWindow> {
    match arg.split_once("..") {
        Some((start, end)) => TimeWindow::custom(bound(start), bound(end)),
        None if !arg.is_empty() => arg.parse(),
        None => Err(LogscopeError::Api(
            "Usage: window PRESET | window START..END".into(),
        )),
    }
}

fn bound(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}
