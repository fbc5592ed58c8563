//! Waiting for the node's asynchronous operations to finish.
//!
//! Sends are run by the node in the background. The node returns an
//! operation id straight away, and the [`OperationPoller`] asks for the
//! operation's status until it succeeds or fails.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::{sync::watch, time::Instant};
use tower::Service;

use zmsg_chain::TxId;
use zmsg_node_services::{
    rpc::{OperationError, OperationId, OperationState, OperationStatus, Request, Response},
    BoxError,
};

use crate::{node, Error};


/// The default time between operation status requests.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Operation polling configuration section.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The time between operation status requests.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,

    /// The longest time to wait for an operation to finish.
    ///
    /// If unset, polling continues until the operation succeeds or fails.
    #[serde(with = "humantime_serde")]
    pub max_wait: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
        }
    }
}

/// The latest known status of a node operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationHandle {
    id: OperationId,
    state: OperationState,
    result: Option<TxId>,
    error: Option<OperationError>,
    polls: usize,
}

impl OperationHandle {
    /// Returns a handle for a newly submitted operation.
    pub fn new(id: OperationId) -> Self {
        Self {
            id,
            state: OperationState::Queued,
            result: None,
            error: None,
            polls: 0,
        }
    }

    /// Returns the operation id.
    pub fn id(&self) -> &OperationId {
        &self.id
    }

    /// Returns the latest operation state.
    pub fn state(&self) -> &OperationState {
        &self.state
    }

    /// Returns the sent transaction id, once the operation has succeeded.
    pub fn result(&self) -> Option<&TxId> {
        self.result.as_ref()
    }

    /// Returns the node's error, once the operation has failed.
    pub fn error(&self) -> Option<&OperationError> {
        self.error.as_ref()
    }

    /// Returns the number of statuses received for this operation.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Returns true if the operation has succeeded or failed.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Records a status update, returning false if it was ignored.
    ///
    /// Updates to finished operations are ignored, so a handle never goes
    /// back to a running state.
    pub fn update(&mut self, status: OperationStatus) -> bool {
        if self.is_terminal() {
            tracing::warn!(
                operation_id = %self.id,
                state = %self.state,
                new_state = %status.status,
                "ignoring status update for finished operation",
            );
            return false;
        }

        self.state = status.status;
        self.result = status.result.map(|result| result.txid);
        self.error = status.error;
        self.polls += 1;

        true
    }
}

/// A callback for each operation status.
pub type ProgressFn = Box<dyn FnMut(&OperationHandle) + Send>;

/// Polls a node operation until it succeeds or fails.
pub struct OperationPoller<S> {
    node: S,
    config: Config,
    cancel: Option<watch::Receiver<bool>>,
    progress: Option<ProgressFn>,
}

impl<S> fmt::Debug for OperationPoller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationPoller")
            .field("config", &self.config)
            .field("cancellable", &self.cancel.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl<S> OperationPoller<S>
where
    S: Service<Request, Response = Response>,
    S::Error: Into<BoxError>,
{
    /// Returns a poller that sends status requests to `node`.
    pub fn new(node: S, config: Config) -> Self {
        Self {
            node,
            config,
            cancel: None,
            progress: None,
        }
    }

    /// Stops polling once `cancel` is `true`.
    ///
    /// Cancellation is checked before each status request and between
    /// requests, so in-flight requests always finish.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Calls `progress` after each status update.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Waits for the operation `operation_id`, and returns its transaction id.
    pub async fn wait(&mut self, operation_id: OperationId) -> Result<TxId, Error> {
        let mut handle = OperationHandle::new(operation_id);
        self.wait_for(&mut handle).await
    }

    /// Waits for the operation in `handle`, updating it with each status.
    ///
    /// Returns the transaction id when the operation succeeds, or an error
    /// when it fails. Request errors are returned immediately.
    pub async fn wait_for(&mut self, handle: &mut OperationHandle) -> Result<TxId, Error> {
        let started = Instant::now();

        loop {
            if self.is_cancelled() {
                return Err(Error::Cancelled {
                    operation_id: handle.id().clone(),
                });
            }

            let status = self.operation_status(handle.id()).await?;
            handle.update(status);

            if let Some(progress) = self.progress.as_mut() {
                progress(handle);
            }

            match handle.state() {
                OperationState::Success => {
                    let txid = handle.result().cloned().ok_or_else(|| {
                        Error::UnexpectedResponse(format!(
                            "operation {} succeeded without a transaction id",
                            handle.id(),
                        ))
                    })?;

                    tracing::info!(operation_id = %handle.id(), %txid, "operation succeeded");

                    return Ok(txid);
                }
                OperationState::Failed => {
                    let (code, message) = match handle.error() {
                        Some(error) => (Some(error.code), error.message.clone()),
                        None => (None, "no error message from zcash daemon".to_string()),
                    };

                    tracing::info!(operation_id = %handle.id(), ?code, %message, "operation failed");

                    return Err(Error::OperationFailed {
                        operation_id: handle.id().clone(),
                        code,
                        message,
                    });
                }
                OperationState::Queued | OperationState::Executing => {
                    tracing::info!(
                        operation_id = %handle.id(),
                        state = %handle.state(),
                        polls = handle.polls(),
                        "waiting for operation",
                    );
                }
                OperationState::Unknown(state) => {
                    tracing::warn!(
                        operation_id = %handle.id(),
                        %state,
                        "unknown operation state, waiting for it to finish",
                    );
                }
            }

            let waited = started.elapsed();
            if let Some(max_wait) = self.config.max_wait {
                if waited >= max_wait {
                    return Err(Error::PollTimeout {
                        operation_id: handle.id().clone(),
                        waited,
                    });
                }
            }

            if !self.sleep_unless_cancelled().await {
                return Err(Error::Cancelled {
                    operation_id: handle.id().clone(),
                });
            }
        }
    }

    /// Requests the status of `operation_id`.
    async fn operation_status(
        &mut self,
        operation_id: &OperationId,
    ) -> Result<OperationStatus, Error> {
        let request = Request::GetOperationStatus(vec![operation_id.clone()]);

        match node::call(&mut self.node, request).await? {
            Response::OperationStatuses(statuses) => statuses
                .into_iter()
                .find(|status| &status.id == operation_id)
                .ok_or_else(|| {
                    Error::UnexpectedResponse(format!("no status for operation {operation_id}"))
                }),
            response => Err(Error::UnexpectedResponse(format!(
                "expected operation statuses, got {response:?}"
            ))),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |cancel| *cancel.borrow())
    }

    /// Sleeps for the poll interval, returning false if cancelled first.
    async fn sleep_unless_cancelled(&mut self) -> bool {
        let sleep = tokio::time::sleep(self.config.poll_interval);

        let Some(cancel) = self.cancel.as_mut() else {
            sleep.await;
            return true;
        };

        tokio::select! {
            _ = sleep => true,
            // A dropped sender can't cancel, so this branch is disabled on error.
            Ok(_) = cancel.wait_for(|cancelled| *cancelled) => false,
        }
    }
}
