use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Receives integer percent notifications as synthesis advances.
///
/// Closures qualify: `&|percent: u32| { .. }`. Calls are serialized by the
/// engine, so implementations need no locking of their own.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, percent: u32);
}

impl<F> ProgressObserver for F
where
    F: Fn(u32) + Send + Sync,
{
    fn on_progress(&self, percent: u32) {
        self(percent);
    }
}

/// Aggregates per-worker pixel counts into percent callbacks.
///
/// Workers add completed pixels in fixed chunks; when the integer percent
/// advances, the observer runs under the percent mutex so callbacks never
/// overlap. A run that quits early makes the percent jump, and a very
/// small estimate can push it past 100.
pub(crate) struct ProgressMonitor<'a> {
    estimated_total: u64,
    completed: AtomicU64,
    prior_percent: Mutex<u32>,
    observer: &'a dyn ProgressObserver,
}

impl<'a> ProgressMonitor<'a> {
    pub fn new(estimated_total: u64, observer: &'a dyn ProgressObserver) -> Self {
        Self {
            estimated_total: estimated_total.max(1),
            completed: AtomicU64::new(0),
            prior_percent: Mutex::new(0),
            observer,
        }
    }

    /// Record `pixels` more completed pixels.
    pub fn add(&self, pixels: u64) {
        if pixels == 0 {
            return;
        }
        let completed = self.completed.fetch_add(pixels, Ordering::Relaxed) + pixels;
        let percent = (completed as f64 / self.estimated_total as f64 * 100.0) as u32;
        let mut prior = self.prior_percent.lock().unwrap();
        if percent > *prior {
            self.observer.on_progress(percent);
            *prior = percent;
        }
    }
}
