//! Presentation pipeline.
//!
//! # Data Flow
//! ```text
//! query response (JSON)
//!     → tool.rs (parse_records: pages → Tool, defaults applied)
//!     → view.rs (featured, categories, filter, sort → ViewModel)
//!     → state.rs (Loading / Loaded / Error, user events)
//!     → render.rs (cards, buttons, error panel → Fragment)
//!
//! fetch.rs drives one load cycle against a running proxy.
//! ```
//!
//! # Design Decisions
//! - Everything but `fetch` is synchronous and side-effect free apart from
//!   logging
//! - The view model is an owned value threaded through each event
//! - Sorting touches the visible list only; the full collection is never
//!   reordered

pub mod fetch;
pub mod render;
pub mod state;
pub mod tool;
pub mod view;

pub use fetch::{fetch_directory, load};
pub use render::{render_categories, render_error, render_tools, Fragment};
pub use state::{render_page, DirectoryState, Event, Page};
pub use tool::{parse_records, parse_records_with, parse_response, ParseOptions, Tool};
pub use view::{
    apply_filter, apply_sort, derive_category_set, derive_featured, SortKey, ViewModel,
    ALL_CATEGORIES,
};
