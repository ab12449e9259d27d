//! Domain core of Spendbook: the expense log with its date-grouped view and
//! report, and the keypad calculator.
//!
//! Nothing here knows about a UI. Storage, clipboard and notifications are
//! collaborators passed in by the front end.
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

pub use calculator::{Calculator, Key};
pub use cost::parse_cost;
pub use entry::Entry;
pub use error::EngineError;
pub use expr::{EvalError, Operator, evaluate, format_number};
pub use grouping::{DateGroup, DateKey, GroupedView};
pub use home::Home;
pub use notify::{Choice, Notice, Notifier};
pub use report::{Clipboard, ClipboardError, DEFAULT_CURRENCY_SYMBOL, export_report};
pub use storage::{JsonFileStorage, MemoryStorage, Storage, StorageError};

mod calculator;
mod cost;
mod entry;
mod error;
mod expr;
mod grouping;
mod home;
mod notify;
mod report;
mod storage;

type ResultEngine<T> = Result<T, EngineError>;

/// Storage key the serialized collection lives under.
pub const ENTRIES_KEY: &str = "entries";

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// The expense log: an insertion-ordered collection of [`Entry`], persisted
/// in full on every change.
///
/// Every mutation writes first and only touches memory once the storage
/// acknowledged, so a failed write leaves the in-memory collection equal to
/// what is persisted.
pub struct EntryLog<S> {
    storage: S,
    clock: Box<dyn Clock>,
    timezone: Tz,
    entries: Vec<Entry>,
}

impl<S: Storage> EntryLog<S> {
    /// Return a builder for `EntryLog`. Help to build the struct.
    pub fn builder(storage: S) -> EntryLogBuilder<S> {
        EntryLogBuilder {
            storage,
            clock: Box::new(SystemClock),
            timezone: Tz::UTC,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// An absent blob is an empty log. On failure the current collection is
    /// kept. Records without an id are given one, and the migrated
    /// collection is written back so the ids hold across loads. Returns the
    /// number of loaded entries.
    pub async fn load(&mut self) -> ResultEngine<usize> {
        let blob = self
            .storage
            .read(ENTRIES_KEY)
            .await
            .map_err(|err| EngineError::PersistenceRead(err.to_string()))?;

        let mut entries = match blob {
            Some(blob) => serde_json::from_str::<Vec<Entry>>(&blob)
                .map_err(|err| EngineError::PersistenceRead(err.to_string()))?,
            None => Vec::new(),
        };

        let mut migrated = 0;
        for entry in entries.iter_mut().filter(|entry| entry.id.is_nil()) {
            entry.id = Uuid::new_v4();
            migrated += 1;
        }
        if migrated > 0 {
            match self.persist(&entries).await {
                Ok(()) => tracing::info!("assigned ids to {migrated} stored entries"),
                // ids stay valid for this session only
                Err(err) => tracing::warn!("could not store assigned ids: {err}"),
            }
        }

        tracing::debug!("loaded {} entries", entries.len());
        self.entries = entries;
        Ok(self.entries.len())
    }

    /// Validates the form input, then appends a new entry dated now.
    pub async fn add_entry(&mut self, name: &str, cost: &str) -> ResultEngine<Entry> {
        let name = cost::parse_name(name)?;
        let cost = cost::parse_cost(cost)?;

        let entry = Entry::new(name, cost, self.clock.now());
        let mut updated = self.entries.clone();
        updated.push(entry.clone());

        self.persist(&updated).await?;
        self.entries = updated;

        tracing::info!("added entry {} ({})", entry.id, entry.name);
        Ok(entry)
    }

    /// Removes the entry with `id`. Returns the removed entry.
    pub async fn remove_entry(&mut self, id: Uuid) -> ResultEngine<Entry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| EngineError::EntryNotFound(id.to_string()))?;

        let mut updated = self.entries.clone();
        let removed = updated.remove(position);

        self.persist(&updated).await?;
        self.entries = updated;

        tracing::info!("removed entry {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Drops the persisted collection and empties the log.
    pub async fn remove_all(&mut self) -> ResultEngine<()> {
        self.storage
            .remove(ENTRIES_KEY)
            .await
            .map_err(|err| EngineError::PersistenceWrite(err.to_string()))?;
        self.entries.clear();

        tracing::info!("removed all entries");
        Ok(())
    }

    /// Entries whose name contains `filter`, grouped by day, newest first.
    pub fn grouped_view(&self, filter: &str) -> GroupedView {
        GroupedView::build(&self.entries, filter, &self.timezone)
    }

    async fn persist(&self, entries: &[Entry]) -> ResultEngine<()> {
        let blob = serde_json::to_string(entries)
            .map_err(|err| EngineError::PersistenceWrite(err.to_string()))?;
        self.storage
            .write(ENTRIES_KEY, blob)
            .await
            .map_err(|err| EngineError::PersistenceWrite(err.to_string()))
    }
}

pub struct EntryLogBuilder<S> {
    storage: S,
    clock: Box<dyn Clock>,
    timezone: Tz,
}

impl<S: Storage> EntryLogBuilder<S> {
    /// Pass the clock used to date new entries
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Timezone whose calendar days the grouped view is keyed on
    pub fn timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Construct an empty `EntryLog`; call [`EntryLog::load`] to read the
    /// persisted collection.
    pub fn build(self) -> EntryLog<S> {
        EntryLog {
            storage: self.storage,
            clock: self.clock,
            timezone: self.timezone,
            entries: Vec::new(),
        }
    }
}
