/*!
 * One-Shot Gate
 *
 * Monotonic wake signal built on parking_lot::Mutex + Condvar.
 *
 * A gate starts `Unset` and moves at most once, to either `Set` or
 * `Failed`. Every waiter blocked on it is released by that transition,
 * and the mutex hand-off gives waiters a happens-before edge with the
 * thread that opened it.
 */

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Observable state of a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Unset,
    Set,
    /// Opened because a notification-side predicate check failed
    Failed(String),
}

impl GateState {
    #[inline]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// One-shot, thread-safe signal owned by a single wait call
#[derive(Debug)]
pub struct Gate {
    state: Mutex<GateState>,
    condvar: Condvar,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::Unset),
            condvar: Condvar::new(),
        }
    }

    /// Open the gate as satisfied
    ///
    /// Returns `true` if this call performed the transition.
    pub fn set(&self) -> bool {
        self.open(GateState::Set)
    }

    /// Open the gate with a failure reason
    ///
    /// Returns `true` if this call performed the transition.
    pub fn fail(&self, reason: impl Into<String>) -> bool {
        self.open(GateState::Failed(reason.into()))
    }

    fn open(&self, next: GateState) -> bool {
        let mut state = self.state.lock();
        if state.is_open() {
            return false;
        }
        *state = next;
        drop(state);

        self.condvar.notify_all();
        true
    }

    /// Snapshot of the current state
    #[inline]
    pub fn state(&self) -> GateState {
        self.state.lock().clone()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state.lock().is_open()
    }

    /// Block until the gate opens or `deadline` passes
    ///
    /// Returns the state observed on wake; `Unset` means the deadline won.
    pub fn wait_until(&self, deadline: Instant) -> GateState {
        let mut state = self.state.lock();
        while !state.is_open() {
            if self.condvar.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.clone()
    }

    /// Block until the gate opens or `timeout` elapses
    pub fn wait_for(&self, timeout: Duration) -> GateState {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_until(deadline),
            None => {
                let mut state = self.state.lock();
                while !state.is_open() {
                    self.condvar.wait(&mut state);
                }
                state.clone()
            }
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_gate_is_monotonic() {
        let gate = Gate::new();
        assert_eq!(gate.state(), GateState::Unset);

        assert!(gate.set());
        assert!(!gate.set());
        assert!(!gate.fail("late"));
        assert_eq!(gate.state(), GateState::Set);
    }

    #[test]
    fn test_gate_failure_sticks() {
        let gate = Gate::new();
        assert!(gate.fail("bad read"));
        assert!(!gate.set());
        assert_eq!(gate.state(), GateState::Failed("bad read".into()));
    }

    #[test]
    fn test_gate_wait_times_out() {
        let gate = Gate::new();
        let start = Instant::now();

        let state = gate.wait_for(Duration::from_millis(50));

        assert_eq!(state, GateState::Unset);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_gate_wakes_waiter() {
        let gate = Arc::new(Gate::new());
        let gate_clone = gate.clone();

        let handle = thread::spawn(move || gate_clone.wait_for(Duration::from_secs(5)));

        // Give thread time to block
        thread::sleep(Duration::from_millis(50));
        gate.set();

        assert_eq!(handle.join().unwrap(), GateState::Set);
    }

    #[test]
    fn test_open_gate_returns_immediately() {
        let gate = Gate::new();
        gate.set();

        let start = Instant::now();
        assert_eq!(gate.wait_for(Duration::from_secs(5)), GateState::Set);
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
