//! Per-source change detection: each detector takes the current remote state
//! and the prior snapshot, and returns the signals to emit plus the new
//! snapshot to persist. The diff cores are pure functions; fetching lives in
//! [`fetch`].

mod docs;
mod error;
mod fetch;
mod html;
mod repo;
mod snapshot;
mod store;

pub use docs::{analyze_page, diff_doc, DocPage};
pub use error::DetectError;
pub use fetch::{PageFetcher, DEFAULT_PLAY_BASE_URL, PROBE_LANGUAGES};
pub use repo::diff_repo;
pub use snapshot::{DocsSnapshot, RepoSnapshot, StoreSnapshot};
pub use store::diff_store_languages;
