//! Generation lifecycle: creation, current-generation tracking, and
//! marshalled invalidation.
//!
//! A generation is one (source, engine) pairing. The factory installs each
//! new generation as current; superseded generations are not torn down,
//! they simply become unreferenced once the consumer drops them.
//!
//! `invalidate()` may be called from a worker context mid-load, while the
//! current-generation slot must not be mutated from there. The call is
//! therefore not synchronous: it captures the generation current at enqueue
//! time and marshals the signal through an owner-context task. The captured
//! token is never re-resolved at delivery time, so a signal aimed at a
//! generation that has since been superseded lands on that generation only
//! and never on its successor.

use crate::dispatch::{self, TaskDispatcher, TokioDispatcher};
use crate::engine::{LoadInitialRequest, LoadRangeRequest, LoadResult, WindowLoadEngine};
use crate::error::LoadError;
use crate::source::ListWindowSource;
use crate::types::GenerationId;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, warn};

/// Shared invalidation state of one generation.
struct GenerationState {
    id: GenerationId,
    invalidated: AtomicBool,
    notify: Notify,
}

impl GenerationState {
    fn new(id: GenerationId) -> Arc<Self> {
        Arc::new(GenerationState {
            id,
            invalidated: AtomicBool::new(false),
            notify: Notify::new(),
        })
    }

    fn signal(&self) {
        if !self.invalidated.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }
}

/// Creates generations on demand and marshals invalidation signals.
pub struct GenerationFactory<S, D = TokioDispatcher>
where
    S: ListWindowSource,
{
    create_source: Box<dyn Fn() -> S + Send + Sync>,
    dispatcher: Arc<D>,
    counter: AtomicU64,
    current: Mutex<Option<Arc<GenerationState>>>,
    invalidation_tx: mpsc::UnboundedSender<Arc<GenerationState>>,
}

impl<S> GenerationFactory<S, TokioDispatcher>
where
    S: ListWindowSource + 'static,
{
    /// Build a factory that dispatches loads on the ambient tokio runtime.
    ///
    /// Must be called from within a tokio runtime: the owner-context task
    /// that delivers invalidation signals is spawned here.
    pub fn new(create_source: impl Fn() -> S + Send + Sync + 'static) -> Self {
        Self::with_dispatcher(create_source, TokioDispatcher)
    }
}

impl<S, D> GenerationFactory<S, D>
where
    S: ListWindowSource + 'static,
    D: TaskDispatcher,
{
    pub fn with_dispatcher(
        create_source: impl Fn() -> S + Send + Sync + 'static,
        dispatcher: D,
    ) -> Self {
        let (invalidation_tx, mut invalidation_rx) =
            mpsc::unbounded_channel::<Arc<GenerationState>>();

        // Owner context: the only place invalidation signals are delivered.
        // Ends when the factory (the sender) is dropped.
        tokio::spawn(async move {
            while let Some(state) = invalidation_rx.recv().await {
                debug!(generation = %state.id, "delivering invalidation signal");
                state.signal();
            }
        });

        GenerationFactory {
            create_source: Box::new(create_source),
            dispatcher: Arc::new(dispatcher),
            counter: AtomicU64::new(1),
            current: Mutex::new(None),
            invalidation_tx,
        }
    }

    /// Construct a fresh source, wrap it in a new engine, and install the
    /// pair as the current generation. Use of the handle belongs to the
    /// caller from here on.
    pub fn create_generation(&self) -> Generation<S, D> {
        let id = GenerationId::from_raw(self.counter.fetch_add(1, Ordering::Relaxed));
        let state = GenerationState::new(id);
        let engine = WindowLoadEngine::new(id, (self.create_source)());

        *self.current.lock() = Some(Arc::clone(&state));
        debug!(generation = %id, "created generation");

        Generation {
            engine: Arc::new(engine),
            dispatcher: Arc::clone(&self.dispatcher),
            state,
        }
    }

    /// Signal that the current generation should be abandoned.
    ///
    /// The generation to signal is captured here, at enqueue time; delivery
    /// happens later on the owner context. A generation installed between
    /// enqueue and delivery is deliberately left untouched.
    pub fn invalidate(&self) {
        let captured = self.current.lock().clone();
        let Some(state) = captured else {
            debug!("invalidate with no current generation; nothing to signal");
            return;
        };

        debug!(generation = %state.id, "marshalling invalidation to owner context");
        if self.invalidation_tx.send(state).is_err() {
            warn!("owner context gone; invalidation signal dropped");
        }
    }

    /// Id of the newest generation, if any has been created.
    pub fn current_id(&self) -> Option<GenerationId> {
        self.current.lock().as_ref().map(|state| state.id)
    }

    /// Whether `id` still identifies the newest generation. Consumers use
    /// this to discard late results from a superseded generation.
    pub fn is_current(&self, id: GenerationId) -> bool {
        self.current_id() == Some(id)
    }
}

/// Handle to one generation: runs loads on worker tasks and reports
/// whether the generation has been invalidated.
pub struct Generation<S, D = TokioDispatcher>
where
    S: ListWindowSource,
{
    engine: Arc<WindowLoadEngine<S>>,
    dispatcher: Arc<D>,
    state: Arc<GenerationState>,
}

impl<S, D> Clone for Generation<S, D>
where
    S: ListWindowSource,
{
    fn clone(&self) -> Self {
        Generation {
            engine: Arc::clone(&self.engine),
            dispatcher: Arc::clone(&self.dispatcher),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S, D> Generation<S, D>
where
    S: ListWindowSource + 'static,
    D: TaskDispatcher,
{
    pub fn id(&self) -> GenerationId {
        self.state.id
    }

    pub fn is_invalidated(&self) -> bool {
        self.state.invalidated.load(Ordering::SeqCst)
    }

    /// Resolves once this generation has received an invalidation signal.
    /// Resolves immediately if the signal already landed.
    pub async fn invalidated(&self) {
        let notified = self.state.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_invalidated() {
            return;
        }
        notified.await;
    }

    /// Run the initial load on a worker task and await the result.
    pub async fn load_initial(
        &self,
        request: LoadInitialRequest,
    ) -> Result<LoadResult<S::Item>, LoadError> {
        let engine = Arc::clone(&self.engine);
        dispatch::run_on(&*self.dispatcher, async move {
            engine.load_initial(request).await
        })
        .await?
    }

    /// Run a range load on a worker task and await the result. Concurrent
    /// range loads are independent; no ordering between them is guaranteed.
    pub async fn load_range(
        &self,
        request: LoadRangeRequest,
    ) -> Result<LoadResult<S::Item>, LoadError> {
        let engine = Arc::clone(&self.engine);
        dispatch::run_on(&*self.dispatcher, async move {
            engine.load_range(request).await
        })
        .await?
    }
}
