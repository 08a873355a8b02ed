//! CLI command implementations.
//!
//! Each command is in its own submodule for maintainability.

pub mod add;
pub mod build;
pub mod checklist;

pub use add::{execute_add, AddOptions};
pub use build::{execute_build, BuildOptions};
pub use checklist::{execute_checklist, ChecklistOptions};
