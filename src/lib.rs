//! apk2aar: turn an Android APK into a Gradle library project and build it into an AAR.
//!
//! The pipeline is sequential: reset the workspace, decompile with apktool,
//! read the manifest package, materialize a Gradle project from a template,
//! then generate a gradle wrapper and build.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
