//! # aircare-app
//!
//! Application layer: the home state store and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Own the single authoritative [`HomeState`](aircare_domain::home::HomeState)
//!   and serialize every update through [`store::HomeStore`]
//! - Run the automation engine exactly once per accepted update
//! - Define the `EventPublisher` port and an in-process event bus
//!
//! ## Dependency rule
//! Depends on `aircare-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod store;
