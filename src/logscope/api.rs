//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every inspector operation, whichever UI drives it.
//!
//! `InspectorApi` owns all mutable session state:
//!
//! - the [`EntryStore`] (read-only once loaded)
//! - the [`ViewState`]: query text, time window, highlight toggles, sort
//! - the [`FormDefinition`] and the current [`SettingsState`]
//!
//! Every state change returns a fresh [`CmdResult`] with the recomputed rows,
//! so clients re-render from the result instead of patching their own copy.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: filtering, sorting and forms live in their modules
//! - **Presentation**: no stdout, no colors, no table layout
//!
//! ## Time
//!
//! Relative time windows are anchored at the local wall clock unless a fixed
//! reference time is set with [`InspectorApi::with_reference_time`].

use crate::commands::{self, CmdMessage, CmdResult, ViewState};
use crate::error::Result;
use crate::form::{compute_defaults, FormDefinition, LiveForm, SettingsState};
use crate::sort::Column;
use crate::store::{EntrySource, EntryStore};
use crate::window::TimeWindow;
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

pub struct InspectorApi {
    store: EntryStore,
    view: ViewState,
    form: FormDefinition,
    settings: SettingsState,
    reference_time: Option<NaiveDateTime>,
}

impl InspectorApi {
    /// Starts a session; settings begin at the form's defaults.
    pub fn new(store: EntryStore, form: FormDefinition) -> Self {
        let settings = compute_defaults(&form);
        Self {
            store,
            view: ViewState::default(),
            form,
            settings,
            reference_time: None,
        }
    }

    /// Loads `source` and starts a session. A load failure is reported in the
    /// returned result and leaves the session with an empty store.
    pub fn open<S: EntrySource>(
        source: &S,
        max_lines: usize,
        form: FormDefinition,
    ) -> (Self, CmdResult) {
        let (store, err) = EntryStore::load_or_empty(source, max_lines);
        let mut result = CmdResult::default();
        if let Some(err) = err {
            result.add_message(CmdMessage::error(format!(
                "Could not load {}: {}",
                source.describe(),
                err
            )));
        }
        (Self::new(store, form), result)
    }

    pub fn with_reference_time(mut self, now: NaiveDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    fn now(&self) -> NaiveDateTime {
        self.reference_time
            .unwrap_or_else(|| Local::now().naive_local())
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn current_settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn view(&self) -> CmdResult {
        commands::view::run(&self.store, &self.view, self.now())
    }

    pub fn set_query(&mut self, text: &str) -> CmdResult {
        debug!(query = text, "query changed");
        self.view.query.text = text.to_string();
        self.view()
    }

    pub fn set_issues_only(&mut self, on: bool) -> CmdResult {
        debug!(on, "issues only");
        self.view.flags.issues_only = on;
        self.view()
    }

    pub fn set_highlight_issues(&mut self, on: bool) -> CmdResult {
        debug!(on, "highlight issues");
        self.view.flags.highlight_issues = on;
        self.view()
    }

    pub fn set_highlight_pattern(&mut self, on: bool) -> CmdResult {
        debug!(on, "highlight pattern");
        self.view.flags.highlight_pattern = on;
        self.view()
    }

    pub fn set_time_window(&mut self, window: TimeWindow) -> CmdResult {
        debug!(window = %window, "time window changed");
        self.view.query.window = window;
        self.view()
    }

    /// A header click on `column`.
    pub fn toggle_sort(&mut self, column: Column) -> CmdResult {
        if !self.view.sort.toggle(column) {
            return self
                .view()
                .with_message(CmdMessage::warning(format!(
                    "Column {} is not sortable",
                    column
                )));
        }
        debug!(
            column = %column,
            descending = self.view.sort.descending,
            "sort toggled"
        );
        self.view()
    }

    /// Full detail of the row at 1-based `index` in the current view.
    pub fn detail(&self, index: usize) -> Result<CmdResult> {
        commands::detail::run(&self.store, &self.view, self.now(), index)
    }

    /// A live form seeded from the current settings. Fails when the
    /// definition names an unsupported field type.
    pub fn open_options(&self) -> Result<LiveForm> {
        commands::options::open(&self.form, &self.settings)
    }

    pub fn submit_options(&mut self, form: &LiveForm) -> Result<CmdResult> {
        let result = commands::options::submit(&self.form, form)?;
        if let Some(settings) = &result.settings {
            self.settings = settings.clone();
            info!(fields = self.settings.len(), "options updated");
        }
        Ok(result)
    }

    pub fn cancel_options(&self, form: LiveForm) -> CmdResult {
        debug!("options cancelled");
        commands::options::cancel(form)
    }

    pub fn settings(&self) -> CmdResult {
        CmdResult::default().with_settings(self.settings.clone())
    }
}
