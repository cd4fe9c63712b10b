//! # mac-apps-core
//!
//! Application inventory for a desktop host: which applications own windows
//! (active), which run without one (idle), and which are installed but not
//! running (inactive).
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency.
//! - **Graceful degradation**: A failing source yields an empty collection, not an error.
//! - **Identity by path**: Records compare equal iff their bundle paths match.
//! - **Explicit pipeline**: fetch → reconcile → present, each stage a plain function.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mac_apps_core::{load_config_or_default, AppInventory, present};
//!
//! let config = load_config_or_default(None);
//! let report = AppInventory::from_config(&config).collect();
//! println!("{}", present("all", &report)?);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod inventory;
pub mod present;
pub mod reconcile;
pub mod sources;
pub mod types;

pub use config::*;
pub use error::{AppsError, Result};
pub use inventory::{AppInventory, Snapshot};
pub use present::{present, render, RenderOptions, Selector};
pub use reconcile::{reconcile, AppSet, AppsReport};
pub use types::{AppIdentity, ApplicationRecord};
