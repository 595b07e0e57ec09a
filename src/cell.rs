//! Compute-once cells for lazily loaded resources.
//!
//! A [`LoadCell`] moves through `Unpopulated -> Loading -> Populated`. The
//! loader runs outside the lock; callers that arrive while a load is in
//! flight wait for it and receive its outcome, success or failure. Success is
//! permanent. Failure returns the cell to `Unpopulated`, so the next caller
//! that did not wait on the failed attempt loads again.
//!
//! A loader must not call back into the cell it is populating; that caller
//! would wait on its own attempt forever.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Unpopulated,
    Loading,
    Populated,
}

#[derive(Debug)]
enum Slot<T> {
    Unpopulated,
    Loading,
    Populated(T),
}

#[derive(Debug)]
struct Inner<T, E> {
    slot: Slot<T>,
    // Monotonic id of the most recent attempt.
    attempt: u64,
    // Outcome of the most recent failed attempt, kept for its waiters.
    last_failure: Option<(u64, E)>,
    // Callers parked on `settled`; tests wait on it to order their threads.
    #[cfg(test)]
    waiters: usize,
}

#[derive(Debug)]
/// Single slot populated at most once by a successful load.
pub struct LoadCell<T, E> {
    inner: Mutex<Inner<T, E>>,
    settled: Condvar,
}

impl<T: Clone, E: Clone> Default for LoadCell<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, E: Clone> LoadCell<T, E> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                slot: Slot::Unpopulated,
                attempt: 0,
                last_failure: None,
                #[cfg(test)]
                waiters: 0,
            }),
            settled: Condvar::new(),
        }
    }

    pub fn state(&self) -> CellState {
        match self.lock().slot {
            Slot::Unpopulated => CellState::Unpopulated,
            Slot::Loading => CellState::Loading,
            Slot::Populated(_) => CellState::Populated,
        }
    }

    /// The loaded value, if a load has succeeded.
    pub fn get(&self) -> Option<T> {
        match &self.lock().slot {
            Slot::Populated(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Return the loaded value, running `load` if no load has succeeded yet.
    ///
    /// Values are handed out by clone, so `T` is normally an `Arc` or other
    /// cheap handle. Concurrent callers share a single in-flight `load`.
    /// Errors are not cached beyond the callers that waited on the failing
    /// attempt.
    pub fn get_or_try_load<F>(&self, load: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut inner = self.lock();
        loop {
            let awaited = match &inner.slot {
                Slot::Populated(value) => return Ok(value.clone()),
                Slot::Unpopulated => break,
                Slot::Loading => inner.attempt,
            };
            #[cfg(test)]
            {
                inner.waiters += 1;
            }
            inner = self
                .settled
                .wait_while(inner, |state| {
                    matches!(state.slot, Slot::Loading) && state.attempt == awaited
                })
                .unwrap_or_else(PoisonError::into_inner);
            #[cfg(test)]
            {
                inner.waiters -= 1;
            }
            if let Slot::Populated(value) = &inner.slot {
                return Ok(value.clone());
            }
            if let Some((failed, err)) = &inner.last_failure {
                if *failed == awaited {
                    return Err(err.clone());
                }
            }
            // The awaited attempt was abandoned or superseded; look again.
        }

        inner.attempt += 1;
        let attempt = inner.attempt;
        inner.slot = Slot::Loading;
        drop(inner);

        let mut guard = AttemptGuard {
            cell: self,
            finished: false,
        };
        let outcome = load();
        guard.finished = true;

        let mut inner = self.lock();
        let result = match outcome {
            Ok(value) => {
                inner.slot = Slot::Populated(value.clone());
                inner.last_failure = None;
                Ok(value)
            }
            Err(err) => {
                inner.slot = Slot::Unpopulated;
                inner.last_failure = Some((attempt, err.clone()));
                Err(err)
            }
        };
        drop(inner);
        self.settled.notify_all();
        result
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Returns the cell to `Unpopulated` if the loader unwinds.
struct AttemptGuard<'a, T: Clone, E: Clone> {
    cell: &'a LoadCell<T, E>,
    finished: bool,
}

impl<T: Clone, E: Clone> Drop for AttemptGuard<'_, T, E> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut inner = self.cell.lock();
        inner.slot = Slot::Unpopulated;
        drop(inner);
        self.cell.settled.notify_all();
    }
}

#[derive(Debug)]
/// Independent [`LoadCell`]s addressed by key.
///
/// The key map is locked only long enough to find or create a cell, so loads
/// for different keys never wait on each other.
pub struct KeyedCells<K, T, E> {
    cells: Mutex<HashMap<K, Arc<LoadCell<T, E>>>>,
}

impl<K: Eq + Hash, T: Clone, E: Clone> Default for KeyedCells<K, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, T: Clone, E: Clone> KeyedCells<K, T, E> {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    pub fn cell(&self, key: K) -> Arc<LoadCell<T, E>> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key).or_default())
    }

    pub fn get_or_try_load<F>(&self, key: K, load: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.cell(key).get_or_try_load(load)
    }

    /// Number of keys whose value has been loaded.
    pub fn populated(&self) -> usize {
        let cells: Vec<_> = self
            .cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        cells
            .iter()
            .filter(|cell| cell.state() == CellState::Populated)
            .count()
    }
}
