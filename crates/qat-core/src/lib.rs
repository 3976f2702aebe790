//! Core engine for the Quantum Asset Toolbox.
//!
//! Lists assets from a remote catalog, searches it, uploads local files, and
//! downloads assets into a local workspace, unpacking archives on the way.
//! Presentation shells drive it through [`sync::SyncOrchestrator`].

pub mod config;
pub mod logging;

pub mod catalog;
pub mod materialize;
pub mod sync;
pub mod transfer;
