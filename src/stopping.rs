use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/**
cooperative stop signal. Colorers poll it once per round (vertex selection,
color class or generation) and abort with `ColoringError::Stopped` when it fires.
*/
pub trait StoppingCriterion {
    /// returns true if the search should stop
    fn is_finished(&self) -> bool;
}

/// never stops
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverStoppingCriterion;

impl StoppingCriterion for NeverStoppingCriterion {
    fn is_finished(&self) -> bool { false }
}

/// stops once the time limit (in seconds) is exceeded
#[derive(Debug, Clone)]
pub struct TimeStoppingCriterion {
    t_start: Instant,
    time_limit: f32,
}

impl TimeStoppingCriterion {
    /// starts the clock now
    pub fn new(time_limit: f32) -> Self {
        Self { t_start: Instant::now(), time_limit }
    }
}

impl StoppingCriterion for TimeStoppingCriterion {
    fn is_finished(&self) -> bool {
        self.t_start.elapsed().as_secs_f32() > self.time_limit
    }
}

/// stop signal that can be raised from another thread
#[derive(Debug, Default, Clone)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// creates a flag that is not raised
    pub fn new() -> Self { Self::default() }

    /// raises the flag (every clone observes it)
    pub fn cancel(&self) { self.cancelled.store(true, Ordering::Relaxed); }
}

impl StoppingCriterion for CancelFlag {
    fn is_finished(&self) -> bool { self.cancelled.load(Ordering::Relaxed) }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!other.is_finished());
        flag.cancel();
        assert!(other.is_finished());
    }

    #[test]
    fn test_time_criterion() {
        assert!(!TimeStoppingCriterion::new(60.).is_finished());
        assert!(TimeStoppingCriterion::new(-1.).is_finished());
        assert!(!NeverStoppingCriterion.is_finished());
    }
}
