use std::path::PathBuf;

use anyhow::{Context, Result};
use podcast_client::{save_artifact, Backend, ReqwestBackend, Session};
use podcast_core::{Artifact, JobState, Msg};
use podcast_logging::{podcast_info, podcast_warn};

use crate::config::ClientConfig;
use crate::render::TerminalRenderer;

pub struct RunOptions {
    pub url: String,
    pub output_dir: PathBuf,
    pub export: bool,
}

enum Event {
    Message(Option<Msg>),
    Interrupted,
}

/// Submits one episode, follows it to a terminal state and writes the
/// artifacts. Returns whether the job completed without error.
pub async fn run(config: &ClientConfig, options: RunOptions) -> Result<bool> {
    let settings = config.backend_settings()?;
    podcast_info!("Using backend at {}", settings.base_url);
    let backend = ReqwestBackend::new(settings).context("failed to build HTTP client")?;
    let mut session = Session::new(backend, config.poll_interval());

    let succeeded = follow_job(&mut session, &options.url).await;
    if !succeeded || !options.export {
        return Ok(succeeded);
    }

    for artifact in Artifact::ALL {
        session.dispatch(Msg::ExportClicked(artifact));
    }
    for file in session.take_exports() {
        let path = save_artifact(&options.output_dir, &file)
            .with_context(|| format!("failed to save {}", file.filename))?;
        println!("Saved {}", path.display());
    }
    Ok(true)
}

async fn follow_job<B: Backend + 'static>(session: &mut Session<B>, url: &str) -> bool {
    let mut renderer = TerminalRenderer::new();
    session.submit(url);
    print_changes(session, &mut renderer);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while session.state().processing() {
        let event = tokio::select! {
            msg = session.next_message() => Event::Message(msg),
            _ = &mut ctrl_c => Event::Interrupted,
        };
        match event {
            Event::Message(Some(msg)) => session.dispatch(msg),
            Event::Message(None) => break,
            Event::Interrupted => {
                podcast_warn!("Interrupted, stopping job tracking");
                session.shutdown();
                print_changes(session, &mut renderer);
                return false;
            }
        }
        print_changes(session, &mut renderer);
    }

    let state = session.state();
    state.job_state() == JobState::Completed && state.last_error().is_none()
}

fn print_changes<B: Backend + 'static>(session: &mut Session<B>, renderer: &mut TerminalRenderer) {
    if !session.consume_dirty() {
        return;
    }
    for line in renderer.render(&session.view()) {
        println!("{line}");
    }
}
