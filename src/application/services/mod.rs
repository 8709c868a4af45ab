//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner, ProgressReporter)
//! but are themselves concrete structs, not traits.

mod convert;
mod project;
mod tools;
mod workspace;

pub use convert::{ConvertOutcome, ConvertRequest, ConvertService};
pub use project::{MaterializeReport, ProjectService};
pub use tools::ToolService;
pub use workspace::WorkspaceService;
