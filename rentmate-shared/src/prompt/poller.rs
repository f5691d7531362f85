use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, AbortHandle, Abortable};
use futures::{FutureExt, pin_mut, select};
use tracing::debug;

use super::hydration::Hydration;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Fixed-interval schedule bounded by a total timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    interval: Duration,
    timeout: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PollSchedule {
    /// `None` when `interval` is zero.
    pub fn new(interval: Duration, timeout: Duration) -> Option<Self> {
        (!interval.is_zero()).then_some(Self { interval, timeout })
    }

    /// Delay between two checks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time after which no further check runs.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of full intervals that fit in the timeout.
    pub fn max_ticks(&self) -> u32 {
        let ticks = self.timeout.as_nanos() / self.interval.as_nanos().max(1);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Time left between the last full interval and the timeout.
    pub fn remainder(&self) -> Duration {
        self.timeout
            .saturating_sub(self.interval.saturating_mul(self.max_ticks()))
    }
}

/// Result of one trigger check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// The prompt was opened; polling is done.
    Opened,
    /// User data has not arrived yet; check again later.
    Continue,
    /// Nothing left to wait for: the prompt is already open or the trigger
    /// flags are gone.
    Stop,
}

/// How a polling run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A check opened the prompt.
    Opened,
    /// A check found nothing left to wait for.
    Stopped,
    /// The timeout elapsed without the prompt opening.
    TimedOut,
    /// The handle cancelled the poll.
    Cancelled,
}

/// Handle to a running poll. Dropping it cancels the poll.
#[derive(Debug)]
pub struct PollerHandle {
    abort: AbortHandle,
    active: Rc<Cell<bool>>,
}

impl PollerHandle {
    /// Stops the poll at its next wake-up.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the polling future still holds its timer.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

// Flips the shared flag when the polling future finishes or is dropped.
struct ActiveGuard(Rc<Cell<bool>>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Re-checks the login/signup trigger while auth data hydrates.
///
/// The poll races a [`Hydration`] signal against a fixed-interval fallback:
/// whichever comes first runs the check, and the fallback gives up silently
/// once the schedule's timeout has elapsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerPoller {
    schedule: PollSchedule,
}

impl TriggerPoller {
    /// A poller following `schedule`.
    pub fn new(schedule: PollSchedule) -> Self {
        Self { schedule }
    }

    /// The schedule this poller follows.
    pub fn schedule(&self) -> PollSchedule {
        self.schedule
    }

    /// Builds the polling future and the handle controlling it. The caller
    /// spawns the future on its executor; `sleep` supplies the platform
    /// timer.
    pub fn start<C, S, F>(
        &self,
        hydration: &Hydration,
        check: C,
        sleep: S,
    ) -> (PollerHandle, impl Future<Output = PollOutcome> + 'static)
    where
        C: FnMut() -> PollStep + 'static,
        S: FnMut(Duration) -> F + 'static,
        F: Future<Output = ()> + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        let active = Rc::new(Cell::new(true));
        let guard = ActiveGuard(Rc::clone(&active));
        let run = poll_loop(self.schedule, hydration.wait(), check, sleep);

        let polling = async move {
            let _guard = guard;
            let outcome = Abortable::new(run, registration)
                .await
                .unwrap_or(PollOutcome::Cancelled);
            debug!(?outcome, "trigger poll finished");
            outcome
        };

        (PollerHandle { abort, active }, polling)
    }
}

async fn poll_loop<H, C, S, F>(
    schedule: PollSchedule,
    hydrated: H,
    mut check: C,
    mut sleep: S,
) -> PollOutcome
where
    H: Future<Output = bool>,
    C: FnMut() -> PollStep,
    S: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    // A signal whose owners all went away never fires; the timer takes over.
    let hydrated = async move {
        if !hydrated.await {
            future::pending::<()>().await;
        }
    }
    .fuse();
    pin_mut!(hydrated);

    for _ in 0..schedule.max_ticks() {
        let delay = sleep(schedule.interval()).fuse();
        pin_mut!(delay);
        select! {
            () = hydrated => {},
            () = delay => {},
        }
        if let Some(outcome) = finished(check()) {
            return outcome;
        }
    }

    // The partial interval before the deadline only ends in a check when the
    // user arrives within it.
    let remainder = schedule.remainder();
    if !remainder.is_zero() {
        let delay = sleep(remainder).fuse();
        pin_mut!(delay);
        let woken = select! {
            () = hydrated => true,
            () = delay => false,
        };
        if woken && let Some(outcome) = finished(check()) {
            return outcome;
        }
    }
    PollOutcome::TimedOut
}

fn finished(step: PollStep) -> Option<PollOutcome> {
    match step {
        PollStep::Opened => Some(PollOutcome::Opened),
        PollStep::Stop => Some(PollOutcome::Stopped),
        PollStep::Continue => None,
    }
}
