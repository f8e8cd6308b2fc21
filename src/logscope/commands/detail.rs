use crate::commands::{sorted_view, CmdResult, ViewState};
use crate::error::{LogscopeError, Result};
use crate::row::EntryDetail;
use crate::store::EntryStore;
use chrono::NaiveDateTime;

/// Detail view for the row at 1-based `index` of the current view.
pub fn run(
    store: &EntryStore,
    state: &ViewState,
    now: NaiveDateTime,
    index: usize,
) -> Result<CmdResult> {
    let sorted = sorted_view(store, state, now);
    let entry = index
        .checked_sub(1)
        .and_then(|i| sorted.get(i))
        .ok_or_else(|| {
            LogscopeError::Api(format!("Row {} is not in the current view", index))
        })?;

    Ok(CmdResult::default().with_detail(EntryDetail::from_entry(index, entry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::Column;
    use crate::store::memory::InMemorySource;
    use crate::test_utils::{fixed_now, SAMPLE_LOG};

    fn store() -> EntryStore {
        EntryStore::load(&InMemorySource::from_text(SAMPLE_LOG), 0).unwrap()
    }

    #[test]
    fn follows_the_sorted_view() {
        let mut state = ViewState::default();
        state.sort.toggle(Column::Line);
        let result = run(&store(), &state, fixed_now(), 1).unwrap();
        let detail = result.detail.unwrap();
        assert_eq!(detail.command, "ct 0.5");
        assert_eq!(detail.result.as_deref(), Some("done"));
        assert_eq!(detail.stdout, None);
    }

    #[test]
    fn follows_the_filtered_view() {
        let mut state = ViewState::default();
        state.query.text = "www".into();
        let result = run(&store(), &state, fixed_now(), 1).unwrap();
        assert_eq!(
            result.detail.unwrap().command,
            "fetch('http://www.example.org')"
        );
    }

    #[test]
    fn out_of_range_rows_are_errors() {
        let state = ViewState::default();
        assert!(run(&store(), &state, fixed_now(), 0).is_err());
        assert!(run(&store(), &state, fixed_now(), 4).is_err());
        assert!(run(&EntryStore::default(), &state, fixed_now(), 1).is_err());
    }
}
