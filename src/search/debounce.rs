use std::time::{Duration, Instant};

/// Identifies one armed timer. Re-arming the debouncer invalidates every
/// earlier handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

struct Armed<T> {
    handle: TimerHandle,
    deadline: Instant,
    value: T,
}

/// Trailing-edge debouncer. Only the last value passed to [`Debouncer::call`]
/// within a burst is ever returned from [`Debouncer::poll`], once `window`
/// has passed without another call.
pub struct Debouncer<T> {
    window: Duration,
    armed: Option<Armed<T>>,
    next_handle: u64,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed: None,
            next_handle: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Cancels the armed timer, if any, and arms a new one for `value`.
    pub fn call(&mut self, value: T, now: Instant) -> TimerHandle {
        if let Some(previous) = self.armed.take() {
            log::trace!("Debounce timer {:?} superseded", previous.handle);
        }

        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.armed = Some(Armed {
            handle,
            deadline: now + self.window,
            value,
        });
        handle
    }

    /// Returns the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let expired = self.armed.as_ref().is_some_and(|armed| armed.deadline <= now);
        if expired {
            self.armed.take().map(|armed| armed.value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|armed| armed.value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|armed| armed.deadline)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.armed.as_ref().is_some_and(|armed| armed.handle == handle)
    }
}
