//! Android manifest inspection
//!
//! Only the `package` attribute of the root `<manifest>` element is read,
//! but the whole document must be well-formed.

use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

const ROOT_ELEMENT: &[u8] = b"manifest";
const PACKAGE_ATTRIBUTE: &str = "package";

/// Read the manifest at `path` and return its package identifier.
pub fn read_package(fs: &dyn FileSystem, path: &Path) -> ApplicationResult<String> {
    let content = fs
        .read_to_string(path)
        .with_path_context("read manifest", path)?;
    let package = parse_package(&content).map_err(|message| ApplicationError::Manifest {
        path: path.to_path_buf(),
        message,
    })?;
    debug!("read_package: {} -> {}", path.display(), package);
    Ok(package)
}

/// Extract the root element's `package` attribute from manifest XML.
///
/// The error is a human readable reason; callers attach the file path.
pub fn parse_package(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut package: Option<String> = None;
    let mut seen_root = false;
    let mut depth: usize = 0;

    loop {
        match reader
            .read_event()
            .map_err(|e| format!("malformed XML: {e}"))?
        {
            Event::Start(start) => {
                if depth == 0 {
                    package = Some(root_package(&start, seen_root)?);
                    seen_root = true;
                }
                depth += 1;
            }
            Event::Empty(start) => {
                if depth == 0 {
                    package = Some(root_package(&start, seen_root)?);
                    seen_root = true;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err("unexpected end of document: unclosed element".to_string());
    }
    package.ok_or_else(|| "no root element".to_string())
}

fn root_package(start: &BytesStart<'_>, seen_root: bool) -> Result<String, String> {
    if seen_root {
        return Err("multiple root elements".to_string());
    }
    let name = start.local_name();
    if name.as_ref() != ROOT_ELEMENT {
        return Err(format!(
            "root element is <{}>, expected <manifest>",
            String::from_utf8_lossy(name.as_ref())
        ));
    }
    let attr = start
        .try_get_attribute(PACKAGE_ATTRIBUTE)
        .map_err(|e| format!("invalid attribute: {e}"))?
        .ok_or_else(|| format!("<manifest> has no '{PACKAGE_ATTRIBUTE}' attribute"))?;
    let raw = std::str::from_utf8(&attr.value)
        .map_err(|e| format!("package attribute is not UTF-8: {e}"))?;
    let value = unescape(raw).map_err(|e| format!("invalid escape in package: {e}"))?;
    Ok(value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    android:compileSdkVersion="33" package="com.example.app">
    <!-- decompiled -->
    <uses-permission android:name="android.permission.INTERNET"/>
    <application android:label="@string/app_name">
        <activity android:name="com.example.app.MainActivity"/>
    </application>
</manifest>
"#;

    #[test]
    fn given_decompiled_manifest_when_parsing_then_returns_package() {
        assert_eq!(parse_package(MANIFEST).unwrap(), "com.example.app");
    }

    #[test]
    fn given_self_closing_root_when_parsing_then_returns_package() {
        assert_eq!(
            parse_package(r#"<manifest package="a.b"/>"#).unwrap(),
            "a.b"
        );
    }

    #[test]
    fn given_escaped_value_when_parsing_then_unescapes() {
        assert_eq!(
            parse_package(r#"<manifest package="a&amp;b"></manifest>"#).unwrap(),
            "a&b"
        );
    }

    #[test]
    fn given_no_package_attribute_when_parsing_then_fails() {
        let err = parse_package(r#"<manifest versionCode="1"></manifest>"#).unwrap_err();
        assert!(err.contains("package"), "{err}");
    }

    #[test]
    fn given_other_root_when_parsing_then_fails() {
        let err = parse_package(r#"<resources package="a.b"></resources>"#).unwrap_err();
        assert!(err.contains("resources"), "{err}");
    }

    #[test]
    fn given_mismatched_tags_when_parsing_then_fails() {
        assert!(parse_package(r#"<manifest package="a"><application></manifest>"#).is_err());
    }

    #[test]
    fn given_unclosed_root_when_parsing_then_fails() {
        assert!(parse_package(r#"<manifest package="a">"#).is_err());
    }

    #[test]
    fn given_empty_document_when_parsing_then_fails() {
        assert!(parse_package("").is_err());
    }
}
