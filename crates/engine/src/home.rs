//! The home screen: entry form, name filter and the expense log behind them.
//!
//! Every operation catches its own failure and turns it into a [`Notice`],
//! so the screen stays usable after any error. Operations return `true`
//! when they changed something.
use crate::{
    Choice, Clipboard, DEFAULT_CURRENCY_SYMBOL, EngineError, Entry, EntryLog, GroupedView, Notice,
    Notifier, Storage, export_report,
};

pub struct Home<S, N> {
    log: EntryLog<S>,
    notifier: N,
    currency_symbol: String,
    /// Draft of the name field.
    pub name: String,
    /// Draft of the cost field, as typed.
    pub cost: String,
    filter: String,
}

impl<S: Storage, N: Notifier> Home<S, N> {
    pub fn new(log: EntryLog<S>, notifier: N) -> Self {
        Self {
            log,
            notifier,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            name: String::new(),
            cost: String::new(),
            filter: String::new(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn entries(&self) -> &[Entry] {
        self.log.entries()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// The grouped view for the current filter, rebuilt on every call.
    pub fn grouped_view(&self) -> GroupedView {
        self.log.grouped_view(&self.filter)
    }

    /// Reads the persisted entries. Also used for pull-to-refresh.
    pub async fn load_entries(&mut self) -> bool {
        match self.log.load().await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("{err}");
                self.notify("Error", "Failed to load data.");
                false
            }
        }
    }

    pub async fn refresh(&mut self) -> bool {
        self.load_entries().await
    }

    /// Adds an entry from the draft fields and clears them on success.
    pub async fn add_entry(&mut self) -> bool {
        match self.log.add_entry(&self.name, &self.cost).await {
            Ok(_) => {
                self.name.clear();
                self.cost.clear();
                true
            }
            Err(err @ EngineError::Validation(_)) => {
                tracing::warn!("{err}");
                self.notify("Invalid input", "Please enter a valid name and cost.");
                false
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.notify("Error", "Failed to save data.");
                false
            }
        }
    }

    /// Asks for confirmation, then removes `entry`.
    pub async fn remove_entry(&mut self, entry: &Entry) -> bool {
        let prompt = Notice::new(
            "Confirm Deletion",
            format!("Are you sure you want to delete {}'s entry", entry.name),
        );
        if self.notifier.confirm(&prompt) == Choice::Cancel {
            tracing::debug!("cancel pressed");
            return false;
        }

        match self.log.remove_entry(entry.id).await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("delete entry error: {err}");
                self.notify("Error", "Failed to delete the entry.");
                false
            }
        }
    }

    /// Asks for confirmation, then empties the log.
    pub async fn remove_all(&mut self) -> bool {
        let prompt = Notice::new(
            "Confirm Deletion",
            "Are you sure you want to delete all entries?",
        );
        if self.notifier.confirm(&prompt) == Choice::Cancel {
            tracing::debug!("cancel pressed");
            return false;
        }

        match self.log.remove_all().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("delete all entries error: {err}");
                self.notify("Error", "Failed to delete all entries.");
                false
            }
        }
    }

    /// The report of the current view, as copied by [`copy_records`](Self::copy_records).
    pub fn report(&self) -> String {
        export_report(&self.grouped_view(), &self.currency_symbol)
    }

    /// Hands the report of the current view to `clipboard`.
    pub async fn copy_records<C: Clipboard>(&self, clipboard: &C) -> bool {
        let content = self.report();
        match clipboard.set_text(&content).await {
            Ok(()) => {
                self.notify("Copied!", "Entries copied!");
                true
            }
            Err(err) => {
                tracing::warn!("copy failed: {err}");
                self.notify("Error", "Failed to copy the content.");
                false
            }
        }
    }

    fn notify(&self, title: &str, message: &str) {
        self.notifier.notify(&Notice::new(title, message));
    }
}
