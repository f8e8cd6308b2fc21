use crate::commands::{sorted_view, CmdMessage, CmdResult, ViewState};
use crate::row::build_rows;
use crate::store::EntryStore;
use chrono::NaiveDateTime;

pub fn run(store: &EntryStore, state: &ViewState, now: NaiveDateTime) -> CmdResult {
    let sorted = sorted_view(store, state, now);
    let rows = build_rows(&sorted, &state.flags);
    let summary = format!("{} of {} entries", rows.len(), store.len());

    CmdResult::default()
        .with_table(state.sort.headers(), rows)
        .with_message(CmdMessage::info(summary))
}
