//! The interaction loop: current input, current view, status line.
//!
//! A session owns the two pieces of process-wide state and runs every user
//! action start to finish. Errors never escape an action; they become the
//! status line, and a failed action leaves the previous rendered view in
//! place. Nothing is retried.

use thiserror::Error;

use crate::client::{Prioritizer, RemoteError, Strategy};
use crate::input::{InputBuffer, ValidationError};
use crate::render::{render, Mode, RenderedView, Status};
use crate::task::TaskRecord;

/// Why a user action could not produce a new view.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The input parsed fine but held zero tasks. The remote service is
    /// never called for an empty batch.
    #[error("Please enter at least one task.")]
    EmptyBatch,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// One user's triage session: input batch, last rendered view, status.
pub struct Session {
    client: Box<dyn Prioritizer>,
    input: InputBuffer,
    view: Option<RenderedView>,
    status: Status,
}

impl Session {
    pub fn new(client: Box<dyn Prioritizer>) -> Self {
        Self {
            client,
            input: InputBuffer::new(),
            view: None,
            status: Status::default(),
        }
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn view(&self) -> Option<&RenderedView> {
        self.view.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Replace the input batch with user-supplied text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
    }

    /// Seed the input with the built-in example batch.
    pub fn load_sample(&mut self) {
        self.input.load_sample();
        self.status = Status::info("Loaded sample tasks.");
    }

    /// Run the analyze operation over the current input and replace the view
    /// with the ranked result.
    pub async fn analyze(&mut self, strategy: Strategy) {
        self.report(Status::info("Analyzing tasks..."));
        match self.run_analyze(strategy).await {
            Ok(view) => {
                self.view = Some(view);
                self.report(Status::info("Analysis complete."));
            }
            Err(err) => self.fail(err),
        }
    }

    /// Run the suggest operation over the current input and replace the view
    /// with the service's picks and summary.
    pub async fn suggest(&mut self) {
        self.report(Status::info("Requesting suggestions..."));
        match self.run_suggest().await {
            Ok(view) => {
                self.view = Some(view);
                self.report(Status::info("Suggestions ready."));
            }
            Err(err) => self.fail(err),
        }
    }

    async fn run_analyze(&self, strategy: Strategy) -> Result<RenderedView, ActionError> {
        let tasks = self.checked_batch()?;
        let envelope = self.client.analyze(&tasks, strategy).await?;
        Ok(render(&envelope, Mode::Analyze))
    }

    async fn run_suggest(&self) -> Result<RenderedView, ActionError> {
        let tasks = self.checked_batch()?;
        let envelope = self.client.suggest(&tasks).await?;
        Ok(render(&envelope, Mode::Suggest))
    }

    /// Parse the current input and enforce the non-empty precondition the
    /// remote client expects from its callers.
    fn checked_batch(&self) -> Result<Vec<TaskRecord>, ActionError> {
        let tasks = self.input.parse()?;
        if tasks.is_empty() {
            return Err(ActionError::EmptyBatch);
        }
        Ok(tasks)
    }

    fn report(&mut self, status: Status) {
        tracing::info!("{}", status.message);
        self.status = status;
    }

    fn fail(&mut self, err: ActionError) {
        tracing::warn!("action failed: {}", err);
        self.status = Status::error(err.to_string());
    }
}
