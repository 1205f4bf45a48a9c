//! Background re-resolution of the day-cycle slot.

use std::{
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{bounded, select, tick, Sender};
use tracing::{debug, info};

use crate::{
    daycycle::{slot::Slot, tracker::Clock, DayCycle},
    errors::TrackerError,
};

/// Slot boundaries move with the clock, so the slot is re-read at least this often.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Owns the refresh thread. Cancelling or dropping the handle stops it.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Stops the refresh task and waits for it to exit.
    pub fn cancel(mut self) {
        self.stop();
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map(|worker| !worker.is_finished())
            .unwrap_or(false)
    }

    fn stop(&mut self) {
        // Disconnecting the channel wakes the worker's select.
        self.cancel.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                debug!("day-cycle refresh worker panicked");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a task that resolves the slot immediately and then every `interval`,
/// calling `on_slot` whenever the slot differs from the last one reported.
pub fn spawn_slot_refresh<C, F>(
    day_cycle: Arc<Mutex<DayCycle>>,
    clock: C,
    interval: Duration,
    mut on_slot: F,
) -> Result<RefreshHandle, TrackerError>
where
    C: Clock + 'static,
    F: FnMut(Slot) + Send + 'static,
{
    let (cancel_tx, cancel_rx) = bounded::<()>(0);
    let worker = thread::Builder::new()
        .name("daycycle-refresh".into())
        .spawn(move || {
            let ticker = tick(interval);
            let mut last: Option<Slot> = None;
            loop {
                let now = clock.now();
                let slot = match day_cycle.lock() {
                    Ok(mut cycle) => cycle.resolve(&now),
                    Err(poisoned) => poisoned.into_inner().resolve(&now),
                };
                if last != Some(slot) {
                    info!(%slot, "day-cycle slot changed");
                    on_slot(slot);
                    last = Some(slot);
                }
                select! {
                    recv(cancel_rx) -> _ => break,
                    recv(ticker) -> _ => {}
                }
            }
            debug!("day-cycle refresh stopped");
        })?;
    Ok(RefreshHandle {
        cancel: Some(cancel_tx),
        worker: Some(worker),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daycycle::tracker::FixedClock;
    use chrono::DateTime;

    #[test]
    fn reports_initial_slot_and_changes() {
        let clock = Arc::new(FixedClock::new(
            DateTime::parse_from_rfc3339("2024-06-21T06:30:00+00:00").unwrap(),
        ));
        let cycle = Arc::new(Mutex::new(DayCycle::default()));
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = spawn_slot_refresh(
            cycle,
            Arc::clone(&clock),
            Duration::from_millis(5),
            move |slot| {
                let _ = tx.send(slot);
            },
        )
        .unwrap();

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, Slot::Dawn);

        clock.set(DateTime::parse_from_rfc3339("2024-06-21T12:00:00+00:00").unwrap());
        let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(second, Slot::Day);

        assert!(handle.is_running());
        handle.cancel();
    }

    #[test]
    fn unchanged_slot_is_not_repeated() {
        let clock = FixedClock::new(
            DateTime::parse_from_rfc3339("2024-06-21T13:00:00+00:00").unwrap(),
        );
        let cycle = Arc::new(Mutex::new(DayCycle::default()));
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = spawn_slot_refresh(cycle, clock, Duration::from_millis(2), move |slot| {
            let _ = tx.send(slot);
        })
        .unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), Slot::Day);
        thread::sleep(Duration::from_millis(30));
        drop(handle);
        assert!(rx.try_recv().is_err());
    }
}
