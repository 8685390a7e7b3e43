//! Window computation and execution for paged list loads.
//!
//! The engine owns exactly one backing source for its lifetime and is
//! stateless beyond that reference plus the generation id it was created
//! for. `load_initial` aligns the first window to the page grid and clamps
//! it inside the list; `load_range` re-derives its size against the
//! freshest total, which may have shifted since the initial load.

use crate::config::ListConfig;
use crate::error::LoadError;
use crate::source::ListWindowSource;
use crate::types::GenerationId;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Parameters for the first window of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadInitialRequest {
    pub requested_start_position: usize,
    pub requested_load_size: usize,
    pub page_size: usize,
    pub placeholders_enabled: bool,
}

impl LoadInitialRequest {
    pub fn from_config(config: &ListConfig, requested_start_position: usize, placeholders_enabled: bool) -> Self {
        LoadInitialRequest {
            requested_start_position,
            requested_load_size: config.initial_load_size,
            page_size: config.page_size,
            placeholders_enabled,
        }
    }
}

/// Parameters for a subsequent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRangeRequest {
    pub start_position: usize,
    pub load_size: usize,
}

/// One loaded window, tagged with the generation that produced it.
///
/// `total_size` is `Some` only when the load committed to a total (initial
/// load with placeholders enabled, or the degenerate empty window); `None`
/// means the consumer treats the list as open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult<T> {
    pub generation: GenerationId,
    pub items: Vec<T>,
    pub start_position: usize,
    pub total_size: Option<usize>,
}

/// Computes and executes windows against one backing source.
pub struct WindowLoadEngine<S> {
    generation: GenerationId,
    source: S,
}

impl<S: ListWindowSource> WindowLoadEngine<S> {
    pub fn new(generation: GenerationId, source: S) -> Self {
        WindowLoadEngine { generation, source }
    }

    pub fn generation(&self) -> GenerationId {
        self.generation
    }

    /// Load the first window: page-aligned, clamped inside the list.
    ///
    /// The total is read once and used for the whole call. When the clamped
    /// window has no room (empty list, or a start past the end), the source
    /// range fetch is skipped entirely and an empty result is returned with
    /// the total attached.
    pub async fn load_initial(&self, request: LoadInitialRequest) -> Result<LoadResult<S::Item>, LoadError> {
        let total_size = self.source.total_size().await?;
        let page_start = compute_initial_load_position(&request, total_size);
        let load_size = compute_initial_load_size(&request, page_start, total_size);
        trace!(
            generation = %self.generation,
            total_size,
            page_start,
            load_size,
            "computed initial window"
        );

        if load_size <= 0 {
            return Ok(LoadResult {
                generation: self.generation,
                items: Vec::new(),
                start_position: page_start,
                total_size: Some(total_size),
            });
        }

        let end = page_start + load_size as usize;
        let items = self.fetch_window(page_start, end).await?;
        debug!(
            generation = %self.generation,
            start = page_start,
            end,
            count = items.len(),
            "loaded initial window"
        );

        Ok(LoadResult {
            generation: self.generation,
            items,
            start_position: page_start,
            total_size: request.placeholders_enabled.then_some(total_size),
        })
    }

    /// Load a subsequent window starting at `request.start_position`.
    pub async fn load_range(&self, request: LoadRangeRequest) -> Result<LoadResult<S::Item>, LoadError> {
        let total_size = self.source.total_size().await?;
        let load_size =
            (total_size as i64 - request.start_position as i64).min(request.load_size as i64);
        trace!(
            generation = %self.generation,
            total_size,
            start = request.start_position,
            load_size,
            "computed range window"
        );

        let items = if load_size <= 0 {
            Vec::new()
        } else {
            let end = request.start_position + load_size as usize;
            self.fetch_window(request.start_position, end).await?
        };

        Ok(LoadResult {
            generation: self.generation,
            items,
            start_position: request.start_position,
            total_size: None,
        })
    }

    async fn fetch_window(&self, start: usize, end: usize) -> Result<Vec<S::Item>, LoadError> {
        if start == end {
            return Ok(Vec::new());
        }
        Ok(self.source.items_in_range(start, end).await?)
    }
}

/// Latest page-aligned start position for the initial window.
///
/// The maximum load page is the latest aligned start that leaves room for a
/// full window before the list end. Signed truncating arithmetic throughout:
/// the intermediate may go negative when the list is shorter than the
/// requested window, and only the final clamp to 0 corrects it. Consumers
/// depend on the exact resulting boundaries, so the rounding must not be
/// "fixed".
pub fn compute_initial_load_position(request: &LoadInitialRequest, total_count: usize) -> usize {
    let position = request.requested_start_position as i64;
    let initial_load_size = request.requested_load_size as i64;
    let page_size = request.page_size as i64;

    let page_start = position / page_size * page_size;

    let maximum_load_page =
        (total_count as i64 - initial_load_size + page_size - 1) / page_size * page_size;

    page_start.min(maximum_load_page).max(0) as usize
}

/// Size of the initial window, given its clamped start position.
///
/// Negative when the start position landed past the list end; the caller
/// treats any non-positive size as an empty window.
pub fn compute_initial_load_size(
    request: &LoadInitialRequest,
    initial_load_position: usize,
    total_count: usize,
) -> i64 {
    (total_count as i64 - initial_load_position as i64).min(request.requested_load_size as i64)
}
