// src/parallel/mod.rs

//! Fans a unit-indexed workload across a fixed pool of OS worker threads and
//! merges their measurement outcomes into one shared table.
//!
//! The pool lives for one `run` call: spawn, work, join. The only shared
//! mutable structure is the [`MeasurementTable`], guarded by a single mutex
//! held just around each record, never around the work itself. Anything else
//! a worker needs (a state vector, in particular) should be its own private
//! copy.

use crate::core::QvecError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::thread;

/// Occurrence counts per measured value.
///
/// Writable only by the executor while workers run; callers receive it
/// read-only after every worker has joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementTable {
    counts: HashMap<u64, u64>,
}

impl MeasurementTable {
    /// Creates an empty table. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `value`. (Internal visibility)
    pub(crate) fn record(&mut self, value: u64) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Occurrences of `value`; zero when it never appeared.
    pub fn count(&self, value: u64) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Total number of recorded occurrences across all values.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct values recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Read-only view of the value -> count map.
    pub fn counts(&self) -> &HashMap<u64, u64> {
        &self.counts
    }
}

impl fmt::Display for MeasurementTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Results:")?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes were recorded.")?;
        } else {
            // Sort by value for consistent and readable output
            let mut sorted: Vec<_> = self.counts.iter().collect();
            sorted.sort_by_key(|(value, _)| *value);
            for (value, count) in sorted {
                writeln!(f, "  {}: {}", value, count)?;
            }
        }
        Ok(())
    }
}

/// Partitions `total_units` of work across a fixed number of worker threads.
///
/// Units are assigned as contiguous chunks of `total_units / worker_count`,
/// with the remainder spread one extra unit over the first workers so every
/// unit is covered exactly once. Each worker runs its units in order and
/// records each outcome under the shared lock; a worker that hits an error
/// abandons its remaining units without disturbing the others. After joining
/// everything, `run` either hands back the complete table or reports the full
/// failure set — never a silently partial result.
#[derive(Debug, Clone, Copy)]
pub struct ParallelExecutor {
    worker_count: usize,
}

impl ParallelExecutor {
    /// Creates an executor with a fixed worker count.
    pub fn new(worker_count: usize) -> Result<Self, QvecError> {
        if worker_count == 0 {
            return Err(QvecError::InvalidOperation {
                message: "executor needs at least one worker".to_string(),
            });
        }
        Ok(Self { worker_count })
    }

    /// Number of worker threads spawned per run.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Runs `work` for every unit index in [0, total_units) and aggregates
    /// the returned values into a [`MeasurementTable`].
    ///
    /// # Errors
    /// `WorkerFailure` when any worker fails to spawn, panics, or returns an
    /// error; the message lists every failed worker.
    pub fn run<F>(&self, total_units: usize, work: F) -> Result<MeasurementTable, QvecError>
    where
        F: Fn(usize) -> Result<u64, QvecError> + Sync,
    {
        let table = Mutex::new(MeasurementTable::new());
        let base = total_units / self.worker_count;
        let remainder = total_units % self.worker_count;

        let failures: Vec<String> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.worker_count);
            let mut failures = Vec::new();
            let mut start = 0usize;

            for worker in 0..self.worker_count {
                // The first `remainder` workers absorb one extra unit each.
                let chunk = base + usize::from(worker < remainder);
                let range = start..start + chunk;
                start += chunk;
                if range.is_empty() {
                    continue;
                }

                let work = &work;
                let table = &table;
                let spawned = thread::Builder::new()
                    .name(format!("qvec-worker-{}", worker))
                    .spawn_scoped(scope, move || -> Result<(), QvecError> {
                        for unit in range {
                            let value = work(unit)?;
                            let mut guard =
                                table.lock().map_err(|_| QvecError::WorkerFailure {
                                    message: "result table lock poisoned".to_string(),
                                })?;
                            guard.record(value);
                        }
                        Ok(())
                    });

                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => failures.push(format!("worker {} failed to spawn: {}", worker, e)),
                }
            }

            for (worker, handle) in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => failures.push(format!("worker {}: {}", worker, e)),
                    Err(_) => failures.push(format!("worker {} panicked", worker)),
                }
            }
            failures
        });

        if failures.is_empty() {
            Ok(table
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()))
        } else {
            Err(QvecError::WorkerFailure { message: failures.join("; ") })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_covers_every_unit() -> Result<(), QvecError> {
        let executor = ParallelExecutor::new(4)?;
        let table = executor.run(16, |unit| Ok(unit as u64))?;
        assert_eq!(table.total(), 16);
        for unit in 0..16 {
            assert_eq!(table.count(unit), 1, "unit {} missing", unit);
        }
        Ok(())
    }

    #[test]
    fn remainder_units_are_not_dropped() -> Result<(), QvecError> {
        // 15 units over 4 workers: chunks of 4, 4, 4, 3. The reference
        // implementation's integer-division split would process only 12.
        let executor = ParallelExecutor::new(4)?;
        let table = executor.run(15, |unit| Ok(unit as u64))?;
        assert_eq!(table.total(), 15);
        assert_eq!(table.count(14), 1);
        Ok(())
    }

    #[test]
    fn more_workers_than_units_is_fine() -> Result<(), QvecError> {
        let executor = ParallelExecutor::new(8)?;
        let table = executor.run(3, |unit| Ok(unit as u64))?;
        assert_eq!(table.total(), 3);
        Ok(())
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(
            ParallelExecutor::new(0),
            Err(QvecError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn worker_error_fails_the_whole_run() -> Result<(), QvecError> {
        let executor = ParallelExecutor::new(4)?;
        let outcome = executor.run(16, |unit| {
            if unit == 5 {
                Err(QvecError::ArithmeticDomain { message: "poisoned unit".to_string() })
            } else {
                Ok(unit as u64)
            }
        });
        match outcome {
            Err(QvecError::WorkerFailure { message }) => {
                assert!(message.contains("poisoned unit"), "message was: {}", message);
            }
            other => panic!("expected WorkerFailure, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn duplicate_values_accumulate_counts() -> Result<(), QvecError> {
        let executor = ParallelExecutor::new(2)?;
        let table = executor.run(10, |_| Ok(3))?;
        assert_eq!(table.count(3), 10);
        assert_eq!(table.len(), 1);
        Ok(())
    }
}
