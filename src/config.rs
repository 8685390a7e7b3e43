//! Paged list tuning configuration.

use serde::{Deserialize, Serialize};

/// Tuning parameters for a paged list.
///
/// `page_size` is the grid the initial window aligns to; `initial_load_size`
/// is how many items the first window requests (a multiple of the page size
/// keeps later tiling aligned); `pre_fetch_distance` is how close to a loaded
/// edge the consumer scrolls before requesting the next range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_initial_load_size")]
    pub initial_load_size: usize,

    #[serde(default = "default_pre_fetch_distance")]
    pub pre_fetch_distance: usize,
}

fn default_page_size() -> usize {
    20
}

fn default_initial_load_size() -> usize {
    // three pages
    60
}

fn default_pre_fetch_distance() -> usize {
    20
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            page_size: default_page_size(),
            initial_load_size: default_initial_load_size(),
            pre_fetch_distance: default_pre_fetch_distance(),
        }
    }
}
