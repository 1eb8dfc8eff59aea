use podcast_logging::{podcast_debug, podcast_info, podcast_warn};

use crate::state::Activity;
use crate::{
    export, is_valid_job_url, Artifact, ClientError, ClientState, Effect, JobId, JobState, Msg,
    ResultSet, StatusRecord,
};

pub const INVALID_URL_MESSAGE: &str = "Enter a valid http(s) URL.";
pub const PROCESSING_FAILED_MESSAGE: &str = "Processing failed.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ClientState, msg: Msg) -> (ClientState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmitFinished { job_id, result } => submit_finished(&mut state, job_id, result),
        Msg::StatusFetched { job_id, result } => reconcile(&mut state, job_id, result),
        Msg::ResultsFetched { job_id, result } => hydrate(&mut state, job_id, result),
        Msg::SummaryEdited(text) => {
            state.set_buffer(Artifact::Summary, text);
            Vec::new()
        }
        Msg::ThreadEdited(text) => {
            state.set_buffer(Artifact::Thread, text);
            Vec::new()
        }
        Msg::ExportClicked(artifact) => {
            let file = export(state.buffer(artifact), artifact.filename());
            vec![Effect::Export(file)]
        }
        Msg::Shutdown => shutdown(&mut state),
    };

    (state, effects)
}

fn submit(state: &mut ClientState) -> Vec<Effect> {
    if state.processing() {
        podcast_warn!(
            "Submit ignored: job {:?} is still processing",
            state.current_job()
        );
        return Vec::new();
    }

    let url = state.url_input().trim().to_string();
    if url.is_empty() || !is_valid_job_url(&url) {
        podcast_info!("Rejected submission of invalid url {:?}", url);
        state.set_error(ClientError::Validation(INVALID_URL_MESSAGE.to_string()));
        return Vec::new();
    }

    let job_id = state.begin_submission();
    podcast_info!("Submitting job {} url={}", job_id, url);
    vec![Effect::StartJob { job_id, url }]
}

fn submit_finished(
    state: &mut ClientState,
    job_id: JobId,
    result: Result<(), String>,
) -> Vec<Effect> {
    if !state.expects(job_id, Activity::Submitting) {
        podcast_debug!("Discarding stale submit result for job {}", job_id);
        return Vec::new();
    }

    match result {
        Ok(()) => {
            podcast_info!("Job {} accepted, polling started", job_id);
            state.begin_polling();
            vec![Effect::StartPolling { job_id }]
        }
        Err(detail) => {
            podcast_warn!("Job {} was not started: {}", job_id, detail);
            state.mark_job_failed();
            state.set_error(ClientError::Submission(detail));
            state.settle();
            Vec::new()
        }
    }
}

fn reconcile(
    state: &mut ClientState,
    job_id: JobId,
    result: Result<StatusRecord, String>,
) -> Vec<Effect> {
    if !state.expects(job_id, Activity::Polling) {
        podcast_debug!(
            "Discarding status for job {} (current {:?}, {:?})",
            job_id,
            state.current_job(),
            state.activity()
        );
        return Vec::new();
    }

    let record = match result {
        Ok(record) => record,
        Err(message) => {
            podcast_warn!(
                "Lost contact with backend while polling job {}: {}",
                job_id,
                message
            );
            state.mark_job_failed();
            state.set_error(ClientError::PollTransport(message));
            state.settle();
            return vec![Effect::StopPolling { job_id }];
        }
    };

    let reported = record.state;
    state.apply_status(record, PROCESSING_FAILED_MESSAGE);

    match reported {
        JobState::Completed => {
            podcast_info!("Job {} completed", job_id);
            let mut effects = vec![Effect::StopPolling { job_id }];
            if state.begin_hydration() {
                effects.push(Effect::FetchResults { job_id });
            } else {
                state.settle();
            }
            effects
        }
        JobState::Error => {
            podcast_warn!(
                "Backend reported job {} failed: {}",
                job_id,
                state.last_error_message().unwrap_or_default()
            );
            state.settle();
            vec![Effect::StopPolling { job_id }]
        }
        // An idle report mid-job keeps polling; the backend is expected to
        // move on to running or a terminal state.
        JobState::Idle | JobState::Running => Vec::new(),
    }
}

fn hydrate(
    state: &mut ClientState,
    job_id: JobId,
    result: Result<ResultSet, String>,
) -> Vec<Effect> {
    if !state.expects(job_id, Activity::Hydrating) {
        podcast_debug!("Discarding stale results for job {}", job_id);
        return Vec::new();
    }

    match result {
        Ok(results) => {
            podcast_info!(
                "Job {} results loaded (transcript {} bytes, summary {} bytes, thread {} bytes)",
                job_id,
                results.transcript.len(),
                results.summary.len(),
                results.thread.len()
            );
            state.apply_results(results);
        }
        Err(body) => {
            podcast_warn!("Results for job {} unavailable: {}", job_id, body);
            state.set_error(ClientError::ResultsFetch(body));
        }
    }
    state.settle();
    Vec::new()
}

fn shutdown(state: &mut ClientState) -> Vec<Effect> {
    let Some(job_id) = state.current_job() else {
        return Vec::new();
    };
    let effects = match state.activity() {
        Activity::None => return Vec::new(),
        Activity::Polling => vec![Effect::StopPolling { job_id }],
        Activity::Submitting | Activity::Hydrating => Vec::new(),
    };
    podcast_info!("Shutting down while job {} is in flight", job_id);
    state.settle();
    effects
}
