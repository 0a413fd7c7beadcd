//! Parallel batch cleaning.
//!
//! A single [`Engine::process`] call is a plain depth-first walk on the calling thread. When
//! there are many independent records to clean (rows of an export, NDJSON lines, queued
//! events), [`ExecutionEngine`] spreads them over a rayon pool and provides:
//!
//! - Chunked execution with position-preserving output
//! - Throttling of in-flight chunks
//! - Real-time metrics + observer hooks for monitoring
//!
//! Parallelism is across records only. Each record is still cleaned by one synchronous
//! [`Engine::process`] call on a single worker thread, so handlers never see concurrent
//! calls for parts of the same record.

mod observer;
mod semaphore;

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::error::{CleanError, CleanResult};
use crate::processing::Engine;
use crate::types::Value;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of records per chunk.
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks, on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = available_threads();
        Self {
            num_threads: Some(n),
            chunk_size: 1_024,
            max_in_flight_chunks: n,
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Cleans batches of independent records in parallel with a shared [`Engine`].
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    cleaner: Engine,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create an engine that cleans with `cleaner`.
    ///
    /// Fails with [`CleanError::Configuration`] if `chunk_size`, `max_in_flight_chunks` or
    /// `num_threads` is zero, or if the thread pool cannot be built.
    pub fn new(cleaner: Engine, opts: ExecutionOptions) -> CleanResult<Self> {
        if opts.chunk_size == 0 {
            return Err(CleanError::configuration("chunk_size must be > 0"));
        }
        if opts.max_in_flight_chunks == 0 {
            return Err(CleanError::configuration("max_in_flight_chunks must be > 0"));
        }
        if opts.num_threads == Some(0) {
            return Err(CleanError::configuration(
                "num_threads must be > 0 when set",
            ));
        }

        let n_threads = opts.num_threads.unwrap_or_else(available_threads);
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("clean-worker-{i}"))
            .build()
            .map_err(|e| CleanError::configuration(format!("failed to build thread pool: {e}")))?;

        Ok(Self {
            pool,
            opts,
            cleaner,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events.
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// The engine each record is cleaned with.
    pub fn cleaner(&self) -> &Engine {
        &self.cleaner
    }

    /// Clean every record. Output position `i` holds the result for `records[i]`
    /// (`None` when the record cleaned away).
    ///
    /// The first handler error stops the run and is returned unchanged.
    pub fn clean_batch(&self, records: &[Value]) -> CleanResult<Vec<Option<Value>>> {
        self.pool.install(|| self.clean_batch_impl(records))
    }

    /// Like [`Self::clean_batch`], but drops records that cleaned away.
    pub fn clean_batch_compact(&self, records: &[Value]) -> CleanResult<Vec<Value>> {
        Ok(self.clean_batch(records)?.into_iter().flatten().collect())
    }

    fn clean_batch_impl(&self, records: &[Value]) -> CleanResult<Vec<Option<Value>>> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            records: records.len(),
        });
        debug!(
            records = records.len(),
            chunk_size = self.opts.chunk_size,
            "starting batch clean"
        );

        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let per_chunk: CleanResult<Vec<Vec<Option<Value>>>> =
            chunk_ranges(records.len(), self.opts.chunk_size)
                .into_par_iter()
                .map(|range| {
                    let permit = sem.acquire();
                    if permit.waited > Duration::ZERO {
                        self.metrics.on_throttle_wait(permit.waited);
                        self.emit(ExecutionEvent::ThrottleWaited {
                            duration: permit.waited,
                        });
                    }

                    self.metrics.on_chunk_start();
                    self.emit(ExecutionEvent::ChunkStarted {
                        start_record: range.start,
                        record_count: range.len(),
                    });

                    let result = self.clean_chunk(&records[range]);
                    self.metrics.on_chunk_end();
                    if let Ok(out) = &result {
                        let kept = out.iter().filter(|r| r.is_some()).count();
                        self.emit(ExecutionEvent::ChunkFinished {
                            kept,
                            dropped: out.len() - kept,
                        });
                    }
                    result
                })
                .collect();

        self.metrics.end_run(start.elapsed());
        match per_chunk {
            Ok(chunks) => {
                let out: Vec<Option<Value>> = chunks.into_iter().flatten().collect();
                let snapshot = self.metrics.snapshot();
                debug!(
                    records = snapshot.records_processed,
                    dropped = snapshot.records_dropped,
                    "finished batch clean"
                );
                self.emit(ExecutionEvent::RunFinished {
                    elapsed: start.elapsed(),
                    metrics: snapshot,
                });
                Ok(out)
            }
            Err(e) => {
                warn!(error = %e, "batch clean failed");
                self.emit(ExecutionEvent::RunFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn clean_chunk(&self, records: &[Value]) -> CleanResult<Vec<Option<Value>>> {
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let cleaned = self.cleaner.process(record)?;
            self.metrics.on_record(cleaned.is_some());
            out.push(cleaned);
        }
        Ok(out)
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    (0..len)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(len))
        .collect()
}
