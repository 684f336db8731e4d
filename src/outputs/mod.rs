//! Output generation for the published site.
//!
//! This module contains submodules responsible for writing one day's
//! briefing into the site's working tree:
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`BriefingRecord`](crate::models::BriefingRecord) snapshot
//! - [`pages`]: Writes the dated archive copy and the live `index.html`
//! - [`indexes`]: Regenerates the archive listing page
//!
//! # Output Structure
//!
//! ```text
//! site_root/
//! ├── index.html             # Live page, overwritten every run
//! ├── data/
//! │   └── 2025-01-15.json    # Record snapshot
//! └── archive/
//!     ├── index.html         # Listing of recent editions
//!     └── 2025-01-15.html    # Rendered snapshot
//! ```
//!
//! Every writer overwrites its target, so rerunning on the same day with the
//! same inputs leaves the tree byte-identical.

pub mod indexes;
pub mod json;
pub mod pages;
