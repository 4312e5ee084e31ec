//! # aic-build-core
//!
//! Core library for the AIC extension build orchestrator providing:
//! - Template document parsing (`modules/build/templates.json`)
//! - Profile validation and environment-record merging
//! - Config materialization (env files, manifest, release metadata)
//! - Project layout resolution

pub mod env;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod materialize;
pub mod templates;
pub mod version;

pub use env::EnvRecord;
pub use error::{Error, Result};
pub use layout::Layout;
pub use materialize::{materialize, BuildArgs};
pub use templates::TemplateDoc;
