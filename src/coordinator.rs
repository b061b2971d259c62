//! Search coordination: aggregates worker events until the target is reached.

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::worker::{PoolEvent, VanityResult, WorkerEvent, WorkerPool};

/// Upper bound on how long the event loop blocks before re-checking the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("all workers exited after {found} of {target} matches")]
    WorkersExited { found: usize, target: usize },
}

/// Receives live updates from the coordinator.
pub trait SearchObserver {
    /// Called at most once per report interval.
    fn on_progress(&mut self, total_generated: u64, keys_per_second: f64);

    /// Called once per accepted match, `index` starting at 1.
    fn on_result(&mut self, index: usize, result: &VanityResult);
}

/// Observer that ignores every update.
#[derive(Debug, Default)]
pub struct SilentObserver;

impl SearchObserver for SilentObserver {
    fn on_progress(&mut self, _total_generated: u64, _keys_per_second: f64) {}

    fn on_result(&mut self, _index: usize, _result: &VanityResult) {}
}

/// Final statistics of a search.
#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub results: Vec<VanityResult>,
    /// Attempts reported by workers; excludes each worker's final partial batch.
    pub total_generated: u64,
    pub elapsed: Duration,
    /// True when the search ended on the stop flag rather than the target count.
    pub interrupted: bool,
}

impl SearchSummary {
    /// Average generation rate over the whole search.
    pub fn keys_per_second(&self) -> f64 {
        rate(self.total_generated, self.elapsed)
    }
}

fn rate(total: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        total as f64 / secs
    } else {
        0.0
    }
}

/// Single-threaded owner of the search counters.
pub struct Coordinator {
    config: SearchConfig,
    stop_flag: Arc<AtomicBool>,
}

impl Coordinator {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the flag that, once set, ends the search early (e.g. on Ctrl-C).
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Spawns the workers and processes their events until `target_count`
    /// matches are found or the stop flag is set. Workers are stopped and
    /// joined before this returns.
    pub fn run<O: SearchObserver>(&self, observer: &mut O) -> Result<SearchSummary, SearchError> {
        let target = self.config.target_count;
        let report_interval = self.config.report_interval;

        let mut pool =
            WorkerPool::spawn_with_stop_flag(self.config.clone(), self.stop_flag.clone())?;
        let start = Instant::now();
        let mut last_report = start;
        let mut total_generated: u64 = 0;
        let mut results: Vec<VanityResult> = Vec::with_capacity(target);

        let outcome = loop {
            if results.len() >= target {
                break Ok(false);
            }
            if pool.is_stopped() {
                break Ok(true);
            }

            match pool.next_event(POLL_INTERVAL) {
                PoolEvent::Worker(WorkerEvent::Progress(count)) => {
                    total_generated += count;
                    if last_report.elapsed() >= report_interval {
                        last_report = Instant::now();
                        let keys_per_second = rate(total_generated, start.elapsed());
                        observer.on_progress(total_generated, keys_per_second);
                    }
                }
                PoolEvent::Worker(WorkerEvent::Found(result)) => {
                    results.push(result);
                    let index = results.len();
                    info!(index, worker = results[index - 1].worker_id, "match found");
                    observer.on_result(index, &results[index - 1]);
                }
                PoolEvent::Idle => {}
                PoolEvent::Exhausted => {
                    break Err(SearchError::WorkersExited {
                        found: results.len(),
                        target,
                    });
                }
            }
        };

        pool.shutdown();
        let elapsed = start.elapsed();
        debug!(total_generated, found = results.len(), "search finished");

        let interrupted = outcome?;
        Ok(SearchSummary {
            results,
            total_generated,
            elapsed,
            interrupted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Pattern;
    use std::sync::atomic::Ordering;
    use std::thread;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<u64>,
        indices: Vec<usize>,
    }

    impl SearchObserver for Recorder {
        fn on_progress(&mut self, total_generated: u64, _keys_per_second: f64) {
            self.progress.push(total_generated);
        }

        fn on_result(&mut self, index: usize, _result: &VanityResult) {
            self.indices.push(index);
        }
    }

    #[test]
    fn test_stops_at_target_count() {
        let config = SearchConfig::new(Pattern::new(Some("a".into()), None), false, 3, 2);
        let mut recorder = Recorder::default();
        let summary = Coordinator::new(config).run(&mut recorder).unwrap();

        assert_eq!(summary.results.len(), 3);
        assert_eq!(recorder.indices, vec![1, 2, 3]);
        assert!(!summary.interrupted);
        assert!(summary.results.iter().all(|r| r.address().starts_with('a')));
        assert_eq!(summary.total_generated % 1000, 0);
    }

    #[test]
    fn test_progress_totals_are_monotonic() {
        let config = SearchConfig {
            report_interval: Duration::from_millis(0),
            ..SearchConfig::new(Pattern::new(Some("abc".into()), None), false, 1, 2)
        };
        let mut recorder = Recorder::default();
        let summary = Coordinator::new(config).run(&mut recorder).unwrap();

        assert!(recorder.progress.windows(2).all(|w| w[0] < w[1]));
        if let Some(last) = recorder.progress.last() {
            assert!(*last <= summary.total_generated);
        }
    }

    #[test]
    fn test_progress_is_throttled_to_report_interval() {
        let interval = Duration::from_millis(200);
        let config = SearchConfig {
            report_interval: interval,
            ..SearchConfig::new(Pattern::new(Some("ffffffffff".into()), None), false, 1, 2)
        };
        let coordinator = Coordinator::new(config);
        let stop_flag = coordinator.stop_flag();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(1500));
            stop_flag.store(true, Ordering::Relaxed);
        });

        let mut recorder = Recorder::default();
        let summary = coordinator.run(&mut recorder).unwrap();
        stopper.join().unwrap();

        assert!(summary.interrupted);
        let allowed = summary.elapsed.as_millis() / interval.as_millis() + 1;
        assert!(
            recorder.progress.len() as u128 <= allowed,
            "{} progress updates in {:?}",
            recorder.progress.len(),
            summary.elapsed
        );
    }

    #[test]
    fn test_preset_stop_flag_interrupts() {
        let pattern = Pattern::new(Some("ffffffffff".into()), None);
        let coordinator = Coordinator::new(SearchConfig::new(pattern, false, 1, 1));
        coordinator.stop_flag().store(true, Ordering::Relaxed);

        let summary = coordinator.run(&mut SilentObserver).unwrap();
        assert!(summary.interrupted);
        assert!(summary.results.is_empty());
    }

    #[test]
    fn test_keys_per_second() {
        let summary = SearchSummary {
            results: Vec::new(),
            total_generated: 5000,
            elapsed: Duration::from_secs(2),
            interrupted: false,
        };
        assert_eq!(summary.keys_per_second(), 2500.0);
    }
}
