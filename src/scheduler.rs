use std::time::{Duration, Instant};

/// Fixed-delay step timer: the next step is due `delay` after the previous
/// step *finished*, so a slow frame stretches the cadence instead of queueing
/// catch-up steps.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_due: Option<Instant>,
}

impl Scheduler {
    pub fn start(&mut self, now: Instant, initial_delay: Duration) {
        self.next_due = Some(now + initial_delay);
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.next_due, Some(due) if now >= due)
    }

    /// How long to wait before the next step; `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    pub fn reschedule(&mut self, completed_at: Instant, delay: Duration) {
        if self.next_due.is_some() {
            self.next_due = Some(completed_at + delay);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(220);

    #[test]
    fn first_step_waits_for_initial_delay() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::default();
        scheduler.start(t0, Duration::from_millis(120));
        assert!(!scheduler.is_due(t0));
        assert_eq!(scheduler.time_until_due(t0), Some(Duration::from_millis(120)));
        assert!(scheduler.is_due(t0 + Duration::from_millis(120)));
    }

    #[test]
    fn slow_step_pushes_next_due_without_backlog() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::default();
        scheduler.start(t0, DELAY);

        // The step started on time but took a full second to finish.
        let finished = t0 + DELAY + Duration::from_secs(1);
        scheduler.reschedule(finished, DELAY);

        assert!(!scheduler.is_due(finished));
        assert!(!scheduler.is_due(finished + DELAY - Duration::from_millis(1)));
        assert!(scheduler.is_due(finished + DELAY));
    }

    #[test]
    fn cancelled_scheduler_never_fires() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::default();
        scheduler.start(t0, DELAY);
        scheduler.cancel();
        assert!(!scheduler.is_armed());
        assert!(!scheduler.is_due(t0 + Duration::from_secs(60)));
        assert_eq!(scheduler.time_until_due(t0), None);

        scheduler.reschedule(t0, DELAY);
        assert!(!scheduler.is_armed());
    }
}
