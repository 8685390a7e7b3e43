//! Worker dispatch seam for running loads off the owner context.
//!
//! The dispatch mechanism itself is an external capability: anything that
//! can run a boxed future to completion on a worker context qualifies. A
//! tokio-backed default is provided.

use crate::error::LoadError;
use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::oneshot;

/// Capability for executing work off the owner context.
pub trait TaskDispatcher: Send + Sync + 'static {
    /// Run `task` to completion on a worker context.
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// Default dispatcher backed by the ambient tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDispatcher;

impl TaskDispatcher for TokioDispatcher {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}

/// Run `work` on a worker task and await its outcome from the caller.
///
/// Delivery uses a oneshot channel; if the dispatcher drops the task before
/// it completes (runtime shutdown), the caller observes `WorkerLost` rather
/// than hanging.
pub(crate) async fn run_on<D, F, T>(dispatcher: &D, work: F) -> Result<T, LoadError>
where
    D: TaskDispatcher + ?Sized,
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    dispatcher.spawn(Box::pin(async move {
        let _ = tx.send(work.await);
    }));
    rx.await.map_err(|_| LoadError::WorkerLost)
}
