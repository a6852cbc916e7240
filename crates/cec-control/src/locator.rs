//! Adapter binary resolution with a memoized result.
//!
//! The availability check walks the `PATH` search directories once per
//! locator and caches the outcome for the locator's lifetime, also after a
//! failed lookup.  The locator is an explicit object rather
//! than hidden process state so tests can construct a fresh one to reset the
//! cache, or point it at any executable.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

/// Resolves and memoizes the location of the adapter executable.
#[derive(Debug)]
pub struct AdapterLocator {
    binary: String,
    resolved: OnceLock<Option<PathBuf>>,
}

impl AdapterLocator {
    /// Creates a locator for `binary` (a bare name searched on `PATH`, or a
    /// path checked directly).
    pub fn new(binary: impl Into<String>) -> AdapterLocator {
        AdapterLocator {
            binary: binary.into(),
            resolved: OnceLock::new(),
        }
    }

    /// Returns the binary name this locator was created with.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns the resolved adapter path, computing it on first call.
    ///
    /// The result, including `None`, is cached for the life of the locator
    /// and never re-checked.
    pub fn resolve(&self) -> Option<&Path> {
        self.resolved
            .get_or_init(|| {
                let found = locate(&self.binary);
                match &found {
                    Some(path) => debug!("adapter binary {:?} resolved to {path:?}", self.binary),
                    None => debug!("adapter binary {:?} not found on search path", self.binary),
                }
                found
            })
            .as_deref()
    }

    /// Returns whether the adapter binary is resolvable, memoized.
    pub fn is_available(&self) -> bool {
        self.resolve().is_some()
    }
}

/// Performs the actual lookup: direct path check when the name contains a
/// separator, `PATH` directory scan otherwise.
fn locate(binary: &str) -> Option<PathBuf> {
    if binary.is_empty() {
        return None;
    }

    if binary.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(binary);
        return path.is_file().then_some(path);
    }

    let search_path = std::env::var_os("PATH")?;
    std::env::split_paths(&search_path)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A binary that exists on every platform the tests run on.
    #[cfg(unix)]
    const KNOWN_BINARY: &str = "sh";
    #[cfg(windows)]
    const KNOWN_BINARY: &str = "cmd.exe";

    #[test]
    fn test_resolves_known_binary_on_search_path() {
        let locator = AdapterLocator::new(KNOWN_BINARY);
        assert!(locator.is_available());
        assert!(locator.resolve().expect("path").is_file());
    }

    #[test]
    fn test_unresolvable_binary_reports_unavailable() {
        let locator = AdapterLocator::new("definitely-not-a-real-adapter-binary");
        assert!(!locator.is_available());
        assert_eq!(locator.resolve(), None);
    }

    #[test]
    fn test_direct_path_is_checked_without_search() {
        let dir = std::env::temp_dir().join("cec_pilot_locator_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fake-adapter");
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();

        let locator = AdapterLocator::new(path.to_string_lossy().to_string());
        assert!(locator.is_available());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_result_is_memoized_and_never_rechecked() {
        // Arrange – resolve once while the file exists.
        let dir = std::env::temp_dir().join("cec_pilot_locator_memo_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("memo-adapter");
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();

        let locator = AdapterLocator::new(path.to_string_lossy().to_string());
        assert!(locator.is_available());

        // Act – delete the file; the cached result must survive.
        std::fs::remove_dir_all(&dir).ok();

        // Assert
        assert!(locator.is_available(), "availability must stay memoized");
    }

    #[test]
    fn test_empty_binary_name_is_unavailable() {
        let locator = AdapterLocator::new("");
        assert!(!locator.is_available());
    }
}
