//! Domain layer: archive, library naming, workspace layout, exclusion rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod exclusion;
pub mod template;

pub use entities::*;
pub use error::DomainError;
pub use exclusion::ExclusionSet;
pub use template::{TemplateFile, BUNDLED_TEMPLATE};
