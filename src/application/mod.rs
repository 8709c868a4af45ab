//! Application layer: conversion pipeline services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod copy;
pub mod error;
pub mod error_ext;
pub mod manifest;
pub mod services;

pub use copy::{copy_excluding, CopyStats};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use manifest::parse_package;
