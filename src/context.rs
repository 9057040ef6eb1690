//! Per-operation context handed in by the declarative engine.
//!
//! Carries a request id for log correlation plus the caller's deadline and
//! cancellation signal. Remote calls run through [`OperationContext::run`],
//! which aborts the in-flight request when either fires.

use crate::client::ClientError;
use std::fmt;
use std::future::Future;
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

/// Lifecycle operation kind, used in diagnostics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request context for a single lifecycle operation.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Unique identifier for this operation
    pub request_id: String,
    deadline: Option<Instant>,
    cancellation: Option<watch::Receiver<bool>>,
}

/// Cancels every context created alongside it.
#[derive(Debug)]
pub struct CancellationHandle(watch::Sender<bool>);

impl CancellationHandle {
    pub fn cancel(&self) {
        // Receivers may already be gone; nothing to cancel then.
        let _ = self.0.send(true);
    }
}

impl OperationContext {
    /// Create a new context with a specific request ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
            cancellation: None,
        }
    }

    /// Create a new context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Set the instant after which remote calls are abandoned.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a cancellation signal, returning the handle that triggers it.
    pub fn with_cancellation(mut self) -> (Self, CancellationHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancellation = Some(receiver);
        (self, CancellationHandle(sender))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether cancellation has already been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Drive a remote call, abandoning it on deadline or cancellation.
    pub async fn run<T, F>(&self, call: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        let cancelled = async {
            match self.cancellation.clone() {
                Some(mut receiver) => loop {
                    if *receiver.borrow_and_update() {
                        break;
                    }
                    if receiver.changed().await.is_err() {
                        // Handle dropped without cancelling
                        std::future::pending::<()>().await;
                    }
                },
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = call => result,
            () = deadline => Err(ClientError::DeadlineExceeded),
            () = cancelled => Err(ClientError::Cancelled),
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_passes_through_result() {
        let context = OperationContext::new("req-1");
        let result = context.run(async { Ok::<_, ClientError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_run_respects_deadline() {
        let context = OperationContext::with_generated_id()
            .with_deadline(Instant::now() + Duration::from_millis(50));
        let result = context
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, ClientError>(())
            })
            .await;
        assert!(matches!(result, Err(ClientError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_run_aborts_on_cancellation() {
        let (context, handle) = OperationContext::with_generated_id().with_cancellation();
        let call = context.run(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ClientError>(())
        });
        handle.cancel();
        assert!(matches!(call.await, Err(ClientError::Cancelled)));
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (context, handle) = OperationContext::with_generated_id().with_cancellation();
        drop(handle);
        let result = context.run(async { Ok::<_, ClientError>("done") }).await;
        assert_eq!(result.unwrap(), "done");
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::Delete.as_str(), "delete");
    }
}
