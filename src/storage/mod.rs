//! JSON file storage for entries
//!
//! The store owns a single `entries.json` file holding every entry and the
//! next id to assign. Queries read the in-memory entry slice as an
//! immutable snapshot; mutations go through [`EntryStore::add`],
//! [`EntryStore::delete`] and [`EntryStore::change`]. Every save lands on
//! disk completely or not at all: the data is written to a sibling temp
//! file, synced, then renamed over the target.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Entry, EntryId, Money};

/// On-disk layout of the entry database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    /// Next id to assign; ids are never reused after deletion
    next_id: u64,
    entries: Vec<Entry>,
}

/// Optional per-field replacements for [`EntryStore::change`]
///
/// `tags` replaces the whole tag list, it never merges.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub name: Option<String>,
    pub cost: Option<Money>,
    pub date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

impl EntryChanges {
    /// Whether any field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cost.is_none() && self.date.is_none() && self.tags.is_none()
    }
}

/// Check whether a file parses as an entry database
fn is_store_file(path: &Path) -> bool {
    fs::read(path)
        .ok()
        .map(|bytes| serde_json::from_slice::<StoreData>(&bytes).is_ok())
        .unwrap_or(false)
}

/// The entry database
#[derive(Debug)]
pub struct EntryStore {
    paths: ExpensePaths,
    data: StoreData,
}

impl EntryStore {
    /// Open an existing store
    ///
    /// Errors with a hint to run `setup` when the database file is missing
    /// or unreadable.
    pub fn open(paths: ExpensePaths) -> ExpenseResult<Self> {
        let file = paths.entries_file();
        if !file.exists() {
            return Err(ExpenseError::Storage(format!(
                "{} does not exist. Run \"expenses setup\".",
                file.display()
            )));
        }

        let bytes = fs::read(&file)
            .map_err(|e| ExpenseError::Io(format!("Failed to read {}: {}", file.display(), e)))?;
        let data: StoreData = serde_json::from_slice(&bytes).map_err(|_| {
            ExpenseError::Storage(format!(
                "{} exists, but is not a valid database. Run \"expenses setup\".",
                file.display()
            ))
        })?;

        Ok(Self { paths, data })
    }

    /// Create the store file, backing up any existing file first
    ///
    /// An existing valid database is left untouched unless `overwrite` is
    /// set; the previous file (valid or not) is copied to `entries.json.bak`
    /// before anything is written.
    pub fn create(paths: ExpensePaths, overwrite: bool) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        let file = paths.entries_file();

        if file.exists() {
            fs::copy(&file, paths.backup_file()).map_err(|e| {
                ExpenseError::Storage(format!("Failed to back up {}: {}", file.display(), e))
            })?;

            if !overwrite && is_store_file(&file) {
                return Err(ExpenseError::Storage(format!(
                    "{} already exists and is a database. Use --overwrite to recreate it.",
                    file.display()
                )));
            }
        }

        let store = Self {
            paths,
            data: StoreData::default(),
        };
        store.save()?;
        Ok(store)
    }

    /// Persist the store to disk
    ///
    /// Writes `entries.tmp` next to the target, syncs it, and renames it
    /// into place so a crash mid-write never leaves a corrupt database.
    pub fn save(&self) -> ExpenseResult<()> {
        let target = self.paths.entries_file();
        let temp = target.with_extension("tmp");

        let json = serde_json::to_vec_pretty(&self.data)?;

        let mut file = fs::File::create(&temp).map_err(|e| {
            ExpenseError::Storage(format!("Failed to write {}: {}", temp.display(), e))
        })?;
        file.write_all(&json)
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                ExpenseError::Storage(format!("Failed to write {}: {}", temp.display(), e))
            })?;

        fs::rename(&temp, &target).map_err(|e| {
            let _ = fs::remove_file(&temp);
            ExpenseError::Storage(format!("Failed to replace {}: {}", target.display(), e))
        })
    }

    /// The immutable snapshot of all entries, in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.data.entries
    }

    /// Look up an entry by id
    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.data
            .entries
            .iter()
            .find(|e| e.id == EntryId::from_raw(id))
    }

    /// Add a new entry and persist the store
    pub fn add(
        &mut self,
        name: impl Into<String>,
        cost: Money,
        date: NaiveDate,
        tags: Vec<String>,
    ) -> ExpenseResult<Entry> {
        let name = name.into();
        if name.is_empty() {
            return Err(ExpenseError::Validation(
                "Entry name must not be empty".into(),
            ));
        }

        let entry = Entry::new(EntryId::from_raw(self.data.next_id), name, cost, date, tags);
        self.data.next_id += 1;
        self.data.entries.push(entry.clone());
        self.save()?;
        Ok(entry)
    }

    /// Delete an entry by id and persist the store
    pub fn delete(&mut self, id: u64) -> ExpenseResult<Entry> {
        let pos = self
            .data
            .entries
            .iter()
            .position(|e| e.id == EntryId::from_raw(id))
            .ok_or(ExpenseError::NotFound(id))?;

        let removed = self.data.entries.remove(pos);
        self.save()?;
        Ok(removed)
    }

    /// Replace individual fields of an entry and persist the store
    pub fn change(&mut self, id: u64, changes: EntryChanges) -> ExpenseResult<Entry> {
        if changes.is_empty() {
            return Err(ExpenseError::Validation("Nothing to change".into()));
        }
        if let Some(name) = &changes.name {
            if name.is_empty() {
                return Err(ExpenseError::Validation(
                    "Entry name must not be empty".into(),
                ));
            }
        }

        let entry = self
            .data
            .entries
            .iter_mut()
            .find(|e| e.id == EntryId::from_raw(id))
            .ok_or(ExpenseError::NotFound(id))?;

        if let Some(name) = changes.name {
            entry.name = name;
        }
        if let Some(cost) = changes.cost {
            entry.cost = cost;
        }
        if let Some(date) = changes.date {
            entry.date = date;
        }
        if let Some(tags) = changes.tags {
            entry.tags = tags;
        }

        let changed = entry.clone();
        self.save()?;
        Ok(changed)
    }
}
