//! # aircare-domain
//!
//! Pure domain model for the aircare air-quality monitor.
//!
//! ## Responsibilities
//! - **Readings** for the whole home and for each room, plus the aggregate invariant
//! - **Devices** (intake fan, HEPA filter, air purifier, window servo) and their patches
//! - **Rule flags** and the **automation** engine that latches devices on
//! - **Updates**: validation of partial updates before anything is mutated
//! - **Presets**, **air quality** scoring, operator **narration** and **events**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Publishing and serving are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod air_quality;
pub mod automation;
pub mod device;
pub mod event;
pub mod home;
pub mod narration;
pub mod preset;
pub mod reading;
pub mod room;
pub mod rule;
pub mod update;
