//! Background tasks that decide when hazards come and go.
//!
//! A schedule never touches the game. It only sends [`HazardEvent`]s which the
//! view model drains on its next tick.
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use tokio::{
    runtime::Handle,
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::Instant,
};

use crate::models::snake::hazard::{HazardEvent, HazardKind, HazardTimings};

/// Cancellation handle of a running hazard schedule.
///
/// Dropping the handle cancels the schedule.
#[derive(Debug)]
pub struct ScheduleHandle {
    kind: HazardKind,
    handle: JoinHandle<()>,
}

impl ScheduleHandle {
    /// Stops the schedule. Calling this more than once is fine.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!("Cancelling {} schedule", self.kind);
            self.handle.abort();
        }
    }

    #[must_use]
    pub fn kind(&self) -> HazardKind {
        self.kind
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    #[cfg(test)]
    pub(crate) fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a schedule on `runtime` that repeats forever: wait a random time,
/// show the hazard, wait its visible time, hide it.
///
/// The schedule ends by itself once nobody listens to `sender` anymore.
#[must_use]
pub fn spawn(
    runtime: &Handle,
    kind: HazardKind,
    timings: HazardTimings,
    sender: UnboundedSender<HazardEvent>,
    seed: Option<u64>,
) -> ScheduleHandle {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!("New {kind} schedule");
    let handle = runtime.spawn(async move {
        loop {
            let appears_in = timings.next_wait(&mut rng);
            let sent_at = Instant::now().into_std();
            if let Err(e) = sender.send(HazardEvent::Pending {
                kind,
                appears_in,
                sent_at,
            }) {
                debug!("{kind} schedule lost its receiver: {e}");
                break;
            }
            tokio::time::sleep(appears_in).await;

            let visible_for = timings.visible_for();
            let sent_at = Instant::now().into_std();
            if let Err(e) = sender.send(HazardEvent::Appear {
                kind,
                visible_for,
                sent_at,
            }) {
                debug!("{kind} schedule lost its receiver: {e}");
                break;
            }
            tokio::time::sleep(visible_for).await;

            if let Err(e) = sender.send(HazardEvent::Disappear { kind }) {
                debug!("{kind} schedule lost its receiver: {e}");
                break;
            }
        }
    });
    ScheduleHandle { kind, handle }
}
