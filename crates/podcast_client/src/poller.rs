use std::sync::Arc;
use std::time::Duration;

use podcast_core::{JobId, Msg};
use podcast_logging::{podcast_debug, podcast_info, podcast_warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::Backend;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
/// Shorter periods are raised to this; `tokio::time::interval` rejects zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Owns at most one recurring status poll.
///
/// Each tick awaits its status fetch before the next tick can fire, so two
/// fetches are never in flight at once. The task ends on its own after it
/// delivers a terminal record or a transport error; `stop` ends it early.
#[derive(Debug)]
pub struct Poller {
    period: Duration,
    active: Option<ActivePoll>,
}

#[derive(Debug)]
struct ActivePoll {
    job_id: JobId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn new(period: Duration) -> Self {
        if period < MIN_POLL_INTERVAL {
            podcast_warn!(
                "Poll interval {:?} is too short, using {:?}",
                period,
                MIN_POLL_INTERVAL
            );
        }
        Self {
            period: period.max(MIN_POLL_INTERVAL),
            active: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts polling for `job_id`, cancelling any poll already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<B>(&mut self, job_id: JobId, backend: Arc<B>, sink: UnboundedSender<Msg>)
    where
        B: Backend + ?Sized + 'static,
    {
        self.stop();

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            job_id,
            self.period,
            backend,
            sink,
            cancel.clone(),
        ));
        podcast_info!("Polling job {} every {:?}", job_id, self.period);
        self.active = Some(ActivePoll {
            job_id,
            cancel,
            handle,
        });
    }

    /// Cancels the current poll. Returns whether a poll was still running.
    pub fn stop(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        let was_running = !active.handle.is_finished();
        active.cancel.cancel();
        if was_running {
            podcast_debug!("Stopped polling job {}", active.job_id);
        }
        was_running
    }

    /// Cancels the poll only if it belongs to `job_id`.
    pub fn stop_job(&mut self, job_id: JobId) -> bool {
        if self.active_job() == Some(job_id) {
            self.stop()
        } else {
            false
        }
    }

    /// The job whose poll task is still running, if any.
    pub fn active_job(&self) -> Option<JobId> {
        self.active
            .as_ref()
            .filter(|active| !active.handle.is_finished())
            .map(|active| active.job_id)
    }

    pub fn is_active(&self) -> bool {
        self.active_job().is_some()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<B>(
    job_id: JobId,
    period: Duration,
    backend: Arc<B>,
    sink: UnboundedSender<Msg>,
    cancel: CancellationToken,
) where
    B: Backend + ?Sized,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = backend.fetch_status() => result,
        };

        let terminal = match &result {
            Ok(record) => record.state.is_terminal(),
            Err(_) => true,
        };
        let msg = Msg::StatusFetched {
            job_id,
            result: result.map_err(|err| err.to_string()),
        };
        if sink.send(msg).is_err() || terminal {
            break;
        }
    }

    podcast_debug!("Poll loop for job {} finished", job_id);
}
