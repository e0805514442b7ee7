//! # aircare-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** dashboards poll and post to
//!   (`/api/sensors`, `/api/update`, `/api/presets/{name}`, …)
//! - Stream live snapshots and domain events over **Server-Sent Events**
//! - Map request bodies into [`PartialUpdate`](aircare_domain::update::PartialUpdate)s
//!   and store results back into JSON (driving adapter)
//! - Optionally serve a static dashboard directory
//!
//! ## Dependency rule
//! Depends on `aircare-app` (for the store and port traits) and `aircare-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
