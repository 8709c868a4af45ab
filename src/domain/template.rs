//! Gradle library skeleton compiled into the binary.
//!
//! Used whenever no template directory is configured, so a conversion works
//! from any working directory.

/// One file of the project skeleton, relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// The `templates/` directory shipped with the crate.
pub const BUNDLED_TEMPLATE: &[TemplateFile] = &[
    TemplateFile {
        path: "build.gradle",
        content: include_str!("../../templates/build.gradle"),
    },
    TemplateFile {
        path: "settings.gradle",
        content: include_str!("../../templates/settings.gradle"),
    },
    TemplateFile {
        path: "gradle.properties",
        content: include_str!("../../templates/gradle.properties"),
    },
    TemplateFile {
        path: "consumer-rules.pro",
        content: include_str!("../../templates/consumer-rules.pro"),
    },
];
