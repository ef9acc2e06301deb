//! Backend worker wiring for the dashboard.
//!
//! This module exposes the command/event protocol plus the worker spawn helper
//! used by the egui UI thread.

mod protocol;
mod worker;

pub use protocol::{CoreCmd, CoreErrorSource, CoreEvent, ErrorSurface, ImageChange};
pub use worker::{spawn_backend, BackendHandle};
