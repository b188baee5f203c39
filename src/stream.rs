//! Periodic, cancellable growth of an open-ended path.
//!
//! A [`PathTask`] owns a [`Wanderer`] inside a tokio task that appends one
//! segment per fixed interval. The task is the only writer of the path;
//! readers receive complete copy-on-write snapshots through a `watch`
//! channel, so a consumer never observes a half-built path. The host owns
//! the task lifetime through the handle: cancellation is an explicit
//! signal, and dropping the handle also ends the task.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rand::Rng;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time;

use crate::error::Error;
use crate::generator::Wanderer;
use crate::path::Path;

/// Handle to a running periodic path generator.
pub struct PathTask {
    snapshots: watch::Receiver<Arc<Path>>,
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), Error>>,
}

impl PathTask {
    /// Spawn a task that appends one segment every `period`, starting with
    /// an immediate first append. Must be called within a tokio runtime.
    ///
    /// A generation failure (degenerate noisy span) ends the task and is
    /// surfaced through [`cancel`](Self::cancel).
    pub fn spawn<R>(mut wanderer: Wanderer, mut rng: R, period: Duration) -> PathTask
    where
        R: Rng + Send + 'static,
    {
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(Path::new()));
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut path = Path::new();
            let mut ticker = time::interval(period);
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => {
                        debug!("path task stopped after {} segments", path.len());
                        return Ok(());
                    }
                    _ = ticker.tick() => {
                        path.push(wanderer.advance(&mut rng)?);
                        // publish a full copy so receivers always hold a
                        // complete, self-consistent path
                        if snapshot_tx.send(Arc::new(path.clone())).is_err() {
                            debug!("all path snapshot receivers dropped");
                            return Ok(());
                        }
                    }
                }
            }
        });

        PathTask {
            snapshots: snapshot_rx,
            cancel: Some(cancel_tx),
            handle,
        }
    }

    /// Subscribe to path snapshots. Every received value is a complete
    /// path; newer snapshots replace older ones, they are never patched.
    pub fn snapshots(&self) -> watch::Receiver<Arc<Path>> {
        self.snapshots.clone()
    }

    /// Signal the task to stop and wait for it to finish, returning the
    /// first generation error if one ended the task early.
    pub async fn cancel(mut self) -> Result<(), Error> {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        match self.handle.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => {
                std::panic::resume_unwind(join_error.into_panic())
            }
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::NoiseRange;
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_wanderer() -> Wanderer {
        Wanderer::new(
            Vec3::ZERO,
            Vec3::Z,
            2.0,
            NoiseRange::ZERO,
            NoiseRange::ZERO,
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn task_appends_one_segment_per_period() {
        let task = PathTask::spawn(
            quiet_wanderer(),
            StdRng::seed_from_u64(3),
            Duration::from_millis(300),
        );
        let mut snapshots = task.snapshots();

        for expected in 1..=4 {
            snapshots.changed().await.unwrap();
            assert_eq!(snapshots.borrow().len(), expected);
        }

        task.cancel().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn snapshots_are_self_consistent() {
        let wanderer = Wanderer::new(
            Vec3::ZERO,
            Vec3::Z,
            3.0,
            NoiseRange::new(1.0, 0.5),
            NoiseRange::new(0.5, 0.5),
        )
        .unwrap();
        let task = PathTask::spawn(wanderer, StdRng::seed_from_u64(11), Duration::from_millis(100));
        let mut snapshots = task.snapshots();

        for _ in 0..5 {
            snapshots.changed().await.unwrap();
            let path = snapshots.borrow().clone();
            let segments: Vec<_> = path.segments().copied().collect();
            for pair in segments.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
        }

        task.cancel().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_stops_appending() {
        let task = PathTask::spawn(
            quiet_wanderer(),
            StdRng::seed_from_u64(3),
            Duration::from_millis(50),
        );
        let mut snapshots = task.snapshots();
        snapshots.changed().await.unwrap();

        task.cancel().await.unwrap();

        // no further snapshots arrive once the task is gone
        time::sleep(Duration::from_millis(500)).await;
        assert!(!snapshots.has_changed().unwrap_or(false));
    }
}
