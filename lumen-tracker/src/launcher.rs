//! Job launcher slot
//!
//! One launcher owns one slot: at most one live poll session at a time.
//! Launching while a previous session is still active tears it down
//! explicitly before the new run is triggered, so two loops can never
//! race to update the same display state.

use std::sync::Arc;

use lumen_core::domain::job::{JobHandle, JobKind, ResultPayload};
use lumen_core::dto::job::ApiStatus;
use tracing::{info, warn};

use crate::backend::JobBackend;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::session::{JobWatch, PollSession};

/// Launcher slot for one remote job at a time
pub struct JobLauncher<B> {
    backend: Arc<B>,
    config: TrackerConfig,
    session: Option<PollSession>,
}

impl<B: JobBackend + 'static> JobLauncher<B> {
    /// Creates a launcher over a workspace backend
    pub fn new(backend: B, config: TrackerConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config,
            session: None,
        }
    }

    /// Triggers a remote run and starts watching it
    ///
    /// Any outstanding session for this slot is cancelled first. A rejected
    /// or failed trigger is terminal; relaunching is the caller's decision.
    ///
    /// # Arguments
    /// * `kind` - Which remote job to trigger
    /// * `params` - Trigger parameters, opaque to the tracker
    pub async fn launch(
        &mut self,
        kind: JobKind,
        params: serde_json::Value,
    ) -> Result<JobWatch, TrackerError> {
        if let Some(previous) = self.session.take() {
            warn!(
                "Launch requested while run {} is still watched, cancelling it",
                previous.handle().run_id
            );
            previous.cancel().await;
        }

        let response = self
            .backend
            .trigger(kind, &params)
            .await
            .map_err(|e| TrackerError::Launch(e.to_string()))?;

        if response.status != ApiStatus::Success {
            let reason = response
                .message
                .unwrap_or_else(|| "trigger rejected by workspace".to_string());
            return Err(TrackerError::Launch(reason));
        }

        let run_id = response
            .run_id
            .ok_or_else(|| TrackerError::Launch("trigger response missing run_id".to_string()))?;

        info!("Triggered {} run {}", kind, run_id);

        let handle = JobHandle { run_id, kind };
        let (session, watch) = PollSession::spawn(Arc::clone(&self.backend), handle, &self.config);
        self.session = Some(session);

        Ok(watch)
    }

    /// Cancels the slot's active session, if any
    pub async fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel().await;
        }
    }

    /// Whether a poll session is currently held by this slot
    ///
    /// A session that reached its terminal state on its own still occupies
    /// the slot until the next launch or cancel; it holds no timer anymore.
    pub fn is_active(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| !session.is_finished())
    }

    /// Synchronous alternate path: latest materialized insights
    ///
    /// Pulls what a prior completed run already produced, bypassing
    /// trigger and polling entirely. No handle is fabricated for this.
    pub async fn refresh(&self) -> Result<ResultPayload, TrackerError> {
        let response = self
            .backend
            .refresh()
            .await
            .map_err(|e| TrackerError::Fetch(e.to_string()))?;

        if response.status != ApiStatus::Success {
            let reason = response.message_or("refresh rejected by workspace".to_string());
            return Err(TrackerError::Fetch(reason));
        }

        response
            .insights
            .map(ResultPayload)
            .ok_or_else(|| TrackerError::Fetch("refresh response missing payload".to_string()))
    }
}
