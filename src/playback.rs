//! Playback controller: a two-state machine (idle / playing) driving the
//! progressive reveal of a series, either by timed ticks or by direct user
//! scrubbing. Scheduling is modeled as an explicit pending-tick deadline so
//! `stop()` cancels cleanly and a cancelled tick can never fire.

use std::time::{Duration, Instant};

/// Tick cadence while playing: ~3 steps per second, slow enough that each
/// year registers.
pub const TICK_INTERVAL: Duration = Duration::from_millis(333);

#[derive(Debug, Clone)]
pub struct PlaybackController {
    current_index: usize,
    /// Deadline of the scheduled tick. `Some` means playing; clearing it is
    /// the cancellation.
    pending_tick: Option<Instant>,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        PlaybackController {
            current_index: 0,
            pending_tick: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.pending_tick.is_some()
    }

    /// Deadline of the next tick, for repaint scheduling.
    pub fn next_tick(&self) -> Option<Instant> {
        self.pending_tick
    }

    /// Start the animation from index 0. A no-op while already playing and
    /// on an empty series; the first tick is due immediately.
    pub fn play(&mut self, now: Instant, series_len: usize) {
        if self.is_playing() || series_len == 0 {
            return;
        }
        self.current_index = 0;
        self.pending_tick = Some(now);
    }

    /// Cancel the pending tick. A no-op while idle.
    pub fn stop(&mut self) {
        self.pending_tick = None;
    }

    /// Advance the animation if its tick is due. Returns the index to
    /// render, or `None` when idle or not yet due. The step revealing the
    /// last index is terminal: playback stops, it does not loop.
    pub fn poll(&mut self, now: Instant, series_len: usize) -> Option<usize> {
        let due = self.pending_tick?;
        if now < due {
            return None;
        }
        if self.current_index >= series_len {
            // Series shrank under us; nothing left to reveal.
            self.pending_tick = None;
            return None;
        }
        let index = self.current_index;
        if index + 1 >= series_len {
            self.pending_tick = None;
        } else {
            self.current_index = index + 1;
            self.pending_tick = Some(due + TICK_INTERVAL);
        }
        Some(index)
    }

    /// Direct scrub to `index`, clamped into range. Rejected while playing
    /// so manual input cannot race the animation tick.
    pub fn set_index(&mut self, index: usize, series_len: usize) -> bool {
        if self.is_playing() || series_len == 0 {
            return false;
        }
        self.current_index = index.min(series_len - 1);
        true
    }

    pub fn step_back(&mut self, series_len: usize) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.set_index(self.current_index - 1, series_len)
    }

    pub fn step_forward(&mut self, series_len: usize) -> bool {
        if series_len == 0 || self.current_index + 1 >= series_len {
            return false;
        }
        self.set_index(self.current_index + 1, series_len)
    }

    pub fn home(&mut self, series_len: usize) -> bool {
        self.set_index(0, series_len)
    }

    pub fn end(&mut self, series_len: usize) -> bool {
        if series_len == 0 {
            return false;
        }
        self.set_index(series_len - 1, series_len)
    }

    /// Re-fit the index after the series changed length (filter switch).
    /// An index past the new end clamps to the new last point.
    pub fn clamp_to(&mut self, series_len: usize) {
        if series_len == 0 {
            self.current_index = 0;
        } else if self.current_index >= series_len {
            self.current_index = series_len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(pb: &mut PlaybackController, len: usize) -> Vec<usize> {
        // Simulated clock: jump straight to each deadline.
        let mut steps = Vec::new();
        while let Some(due) = pb.next_tick() {
            if let Some(idx) = pb.poll(due, len) {
                steps.push(idx);
            }
        }
        steps
    }

    #[test]
    fn play_reveals_every_index_then_stops() {
        let mut pb = PlaybackController::new();
        pb.play(Instant::now(), 5);
        assert!(pb.is_playing());
        let steps = drain(&mut pb, 5);
        assert_eq!(steps, vec![0, 1, 2, 3, 4]);
        assert!(!pb.is_playing());
        assert_eq!(pb.current_index(), 4);
        // Terminal: nothing further fires.
        assert_eq!(pb.poll(Instant::now() + TICK_INTERVAL, 5), None);
    }

    #[test]
    fn tick_not_due_does_not_fire() {
        let mut pb = PlaybackController::new();
        let t0 = Instant::now();
        pb.play(t0, 3);
        assert_eq!(pb.poll(t0, 3), Some(0));
        // Next tick is 333 ms out; polling early yields nothing.
        assert_eq!(pb.poll(t0 + Duration::from_millis(100), 3), None);
        assert_eq!(pb.poll(t0 + TICK_INTERVAL, 3), Some(1));
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut pb = PlaybackController::new();
        let t0 = Instant::now();
        pb.play(t0, 10);
        assert_eq!(pb.poll(t0, 10), Some(0));
        pb.stop();
        assert!(!pb.is_playing());
        // A long-overdue poll after stop never yields a stale step.
        assert_eq!(pb.poll(t0 + Duration::from_secs(60), 10), None);
        // stop while idle is a no-op.
        pb.stop();
        assert_eq!(pb.current_index(), 1);
    }

    #[test]
    fn play_is_idempotent_while_playing() {
        let mut pb = PlaybackController::new();
        let t0 = Instant::now();
        pb.play(t0, 5);
        pb.poll(t0, 5);
        pb.poll(t0 + TICK_INTERVAL, 5);
        assert_eq!(pb.current_index(), 2);
        // A second play() must not rewind to zero.
        pb.play(t0 + TICK_INTERVAL, 5);
        assert_eq!(pb.current_index(), 2);
    }

    #[test]
    fn play_on_empty_series_is_a_no_op() {
        let mut pb = PlaybackController::new();
        pb.play(Instant::now(), 0);
        assert!(!pb.is_playing());
    }

    #[test]
    fn scrubbing_rejected_while_playing() {
        let mut pb = PlaybackController::new();
        pb.play(Instant::now(), 5);
        assert!(!pb.set_index(3, 5));
        pb.stop();
        assert!(pb.set_index(3, 5));
        assert_eq!(pb.current_index(), 3);
    }

    #[test]
    fn home_end_and_arrow_clamping() {
        let mut pb = PlaybackController::new();
        assert!(pb.end(4));
        assert_eq!(pb.current_index(), 3);
        // ArrowRight at the last index is a no-op.
        assert!(!pb.step_forward(4));
        assert_eq!(pb.current_index(), 3);
        assert!(pb.home(4));
        assert_eq!(pb.current_index(), 0);
        // ArrowLeft at index 0 is a no-op.
        assert!(!pb.step_back(4));
        assert_eq!(pb.current_index(), 0);
        assert!(pb.step_forward(4));
        assert_eq!(pb.current_index(), 1);
    }

    #[test]
    fn clamp_after_series_shrinks() {
        let mut pb = PlaybackController::new();
        pb.set_index(9, 10);
        pb.clamp_to(4);
        assert_eq!(pb.current_index(), 3);
        pb.clamp_to(0);
        assert_eq!(pb.current_index(), 0);
    }
}
