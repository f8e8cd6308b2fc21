use super::browse;
use super::render::{
    eprint_messages, print_messages, render_detail, render_detail_json, render_form,
    render_rows_json, render_settings_json, render_table,
};
use super::setup::{Cli, Commands, ViewArgs};
use clap::Parser;
use logscope::api::InspectorApi;
use logscope::commands::{CmdMessage, MessageLevel};
use logscope::config::{InspectorConfig, CONFIG_FILENAME};
use logscope::error::{LogscopeError, Result};
use logscope::form::FormDefinition;
use logscope::sort::Column;
use logscope::store::fs::JsonlFile;
use logscope::window::TimeWindow;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

struct AppContext {
    config: InspectorConfig,
    form: FormDefinition,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_file.as_deref())?;
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::List {
            logfile,
            view,
            json,
        } => handle_list(&ctx, &logfile, &view, json),
        Commands::Show {
            logfile,
            index,
            view,
            json,
        } => handle_show(&ctx, &logfile, index, &view, json),
        Commands::Options { set, cancel } => handle_options(&ctx, &set, cancel),
        Commands::Browse { logfile, view } => handle_browse(&ctx, &logfile, &view),
    }
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config = InspectorConfig::load(&config_path)?;
    if let Some(max_lines) = cli.max_lines {
        config.max_lines = max_lines;
    }
    if let Some(form) = &cli.form {
        config.form_definition = Some(form.clone());
    }
    debug!(config = %config_path.display(), max_lines = config.max_lines, "configuration loaded");

    let form = load_form(&config)?;
    Ok(AppContext { config, form })
}

/// An absent implicit definition means an empty form; a named one must load.
fn load_form(config: &InspectorConfig) -> Result<FormDefinition> {
    let (path, explicit) = config.form_path();
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no form definition, using an empty form");
        return Ok(FormDefinition::default());
    }
    let form = FormDefinition::load(&path)?;
    info!(path = %path.display(), fields = form.fields().count(), "form definition loaded");
    Ok(form)
}

/// Opens a session on `logfile`. Load failures are reported, not fatal.
fn open_session(ctx: &AppContext, logfile: &Path, json: bool) -> InspectorApi {
    let source = JsonlFile::new(logfile);
    let (api, result) = InspectorApi::open(&source, ctx.config.max_lines, ctx.form.clone());
    if json {
        eprint_messages(&result.messages);
    } else {
        print_messages(&result.messages);
    }
    api
}

/// Replays the view flags against a fresh session, in the order a user
/// would set them. Returns the warnings raised on the way.
pub(super) fn apply_view_args(api: &mut InspectorApi, args: &ViewArgs) -> Result<Vec<CmdMessage>> {
    if let Some(query) = &args.query {
        api.set_query(query);
    }
    api.set_issues_only(args.issues_only);
    api.set_highlight_issues(args.highlight_issues);
    api.set_highlight_pattern(args.highlight_pattern);

    if args.since.is_some() || args.until.is_some() {
        let window = TimeWindow::custom(args.since.as_deref(), args.until.as_deref())?;
        api.set_time_window(window);
    } else if let Some(preset) = &args.window {
        api.set_time_window(preset.parse()?);
    }

    let mut warnings = Vec::new();
    for label in &args.sort {
        let column: Column = label.parse()?;
        let result = api.toggle_sort(column);
        warnings.extend(
            result
                .messages
                .into_iter()
                .filter(|m| m.level == MessageLevel::Warning),
        );
    }
    Ok(warnings)
}

fn handle_list(ctx: &AppContext, logfile: &Path, view: &ViewArgs, json: bool) -> Result<()> {
    let mut api = open_session(ctx, logfile, json);
    let warnings = apply_view_args(&mut api, view)?;
    let result = api.view();

    if json {
        print!("{}", render_rows_json(&result.rows)?);
        eprint_messages(&warnings);
    } else {
        print!("{}", render_table(&result.headers, &result.rows));
        print_messages(&warnings);
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_show(
    ctx: &AppContext,
    logfile: &Path,
    index: usize,
    view: &ViewArgs,
    json: bool,
) -> Result<()> {
    let mut api = open_session(ctx, logfile, json);
    let warnings = apply_view_args(&mut api, view)?;
    let result = api.detail(index)?;

    if let Some(detail) = &result.detail {
        if json {
            print!("{}", render_detail_json(detail)?);
        } else {
            print!("{}", render_detail(detail));
        }
    }
    eprint_messages(&warnings);
    Ok(())
}

fn handle_options(ctx: &AppContext, edits: &[String], cancel: bool) -> Result<()> {
    let mut api = InspectorApi::new(Default::default(), ctx.form.clone());
    let mut form = api.open_options()?;

    for edit in edits {
        let (name, value) = parse_assignment(edit)?;
        form.edit(name, value)?;
    }
    print!("{}", render_form(&form));

    let result = if cancel {
        api.cancel_options(form)
    } else {
        api.submit_options(&form)?
    };
    print_messages(&result.messages);
    print!("{}", render_settings_json(api.current_settings())?);
    Ok(())
}

fn handle_browse(ctx: &AppContext, logfile: &Path, view: &ViewArgs) -> Result<()> {
    let mut api = open_session(ctx, logfile, false);
    let warnings = apply_view_args(&mut api, view)?;
    print_messages(&warnings);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    browse::run(&mut api, stdin.lock(), &mut stdout)
}

pub(super) fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| LogscopeError::Api(format!("Expected NAME=VALUE, got: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_split_on_the_first_equals() {
        assert_eq!(parse_assignment("user=a=b").unwrap(), ("user", "a=b"));
        assert_eq!(parse_assignment("user=").unwrap(), ("user", ""));
        assert!(parse_assignment("user").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
