//! Per-invocation update context.
//!
//! Everything the update flow needs to know about the running build is
//! collected once into an immutable [`UpdateContext`] and passed down
//! explicitly: the injected version string, the binary name, the release
//! endpoints, the platform target, and (for tests) an install-path override.
//! There is no global mutable state; tests build a context with the
//! `with_*` methods instead of patching module-level variables.
//!
//! # Features
//!
//! - **Build-Time Version Injection**: release pipelines set the
//!   `BOOKFORGE_VERSION` environment variable at compile time; a build
//!   without it carries the [`DEV_VERSION`] sentinel and never updates
//!   itself
//! - **Endpoint Derivation**: the release-metadata and asset-download URLs
//!   are derived from base URLs the context owns, so tests can point the
//!   whole flow at a mock server
//! - **Builder-Style Overrides**: every field has a `with_*` method that
//!   consumes and returns the context
//!
//! # Examples
//!
//! ```rust
//! use bookforge::upgrade::{PlatformTarget, UpdateContext};
//!
//! let ctx = UpdateContext::from_build_env()
//!     .with_version("v1.0.0")
//!     .with_target(PlatformTarget::new("linux", "x86_64"));
//!
//! assert!(!ctx.is_dev_build());
//! assert_eq!(
//!     ctx.latest_release_url(),
//!     "https://api.github.com/repos/bookforge/bookforge/releases/latest"
//! );
//! ```

use std::path::{Path, PathBuf};

use super::platform::PlatformTarget;

/// Reserved version string meaning "development build; never self-update".
pub const DEV_VERSION: &str = "dev";

/// The version injected at build time by the release pipeline, or
/// [`DEV_VERSION`] for local builds.
///
/// Release builds set `BOOKFORGE_VERSION` in the build environment; a plain
/// `cargo build` leaves it unset and produces a binary that refuses to
/// self-update.
pub const BUILD_VERSION: &str = match option_env!("BOOKFORGE_VERSION") {
    Some(version) => version,
    None => DEV_VERSION,
};

/// Where users are pointed for manual installation whenever the automatic
/// flow gives up.
pub const RELEASES_PAGE: &str = "https://github.com/bookforge/bookforge/releases";

const BIN_NAME: &str = "bookforge";
const DEFAULT_API_BASE: &str = "https://api.github.com/repos/bookforge/bookforge";
const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com/bookforge/bookforge/releases";

/// Immutable inputs for one invocation of the update flow.
#[derive(Debug, Clone)]
pub struct UpdateContext {
    current_version: String,
    bin_name: String,
    api_base: String,
    download_base: String,
    target: PlatformTarget,
    install_path: Option<PathBuf>,
}

impl Default for UpdateContext {
    fn default() -> Self {
        Self::from_build_env()
    }
}

impl UpdateContext {
    /// Build the context for the running binary: injected version, official
    /// release endpoints, and the compile-time platform target.
    pub fn from_build_env() -> Self {
        Self {
            current_version: BUILD_VERSION.to_string(),
            bin_name: BIN_NAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            target: PlatformTarget::current(),
            install_path: None,
        }
    }

    /// Override the current version. Primarily for tests.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    /// Override the binary name used to derive asset filenames.
    pub fn with_bin_name(mut self, bin_name: impl Into<String>) -> Self {
        self.bin_name = bin_name.into();
        self
    }

    /// Override the release-metadata endpoint base. Primarily for tests.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the asset-download endpoint base. Primarily for tests.
    pub fn with_download_base(mut self, download_base: impl Into<String>) -> Self {
        self.download_base = download_base.into();
        self
    }

    /// Override the platform target.
    pub fn with_target(mut self, target: PlatformTarget) -> Self {
        self.target = target;
        self
    }

    /// Replace a file other than the running executable. Primarily for
    /// tests, which must not swap out their own test harness.
    pub fn with_install_path(mut self, install_path: impl Into<PathBuf>) -> Self {
        self.install_path = Some(install_path.into());
        self
    }

    /// The version string of the running build.
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Whether this is a development build that must never self-update.
    pub fn is_dev_build(&self) -> bool {
        self.current_version == DEV_VERSION
    }

    /// The binary name assets are published under.
    pub fn bin_name(&self) -> &str {
        &self.bin_name
    }

    /// The platform target assets are selected for.
    pub fn target(&self) -> &PlatformTarget {
        &self.target
    }

    /// The explicit install path, if one was injected.
    pub fn install_path(&self) -> Option<&Path> {
        self.install_path.as_deref()
    }

    /// URL of the latest-release metadata document.
    pub fn latest_release_url(&self) -> String {
        format!("{}/releases/latest", self.api_base)
    }

    /// URL a named asset of the given release tag downloads from.
    pub fn download_url(&self, tag: &str, filename: &str) -> String {
        format!("{}/download/{}/{}", self.download_base, tag, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_uses_official_endpoints() {
        let ctx = UpdateContext::from_build_env();
        assert_eq!(ctx.bin_name(), "bookforge");
        assert_eq!(
            ctx.latest_release_url(),
            "https://api.github.com/repos/bookforge/bookforge/releases/latest"
        );
        assert_eq!(
            ctx.download_url("v1.2.3", "bookforge-linux-x86_64.tar.gz"),
            "https://github.com/bookforge/bookforge/releases/download/v1.2.3/bookforge-linux-x86_64.tar.gz"
        );
    }

    #[test]
    fn dev_sentinel_is_detected() {
        let ctx = UpdateContext::from_build_env().with_version(DEV_VERSION);
        assert!(ctx.is_dev_build());

        let ctx = ctx.with_version("1.0.0");
        assert!(!ctx.is_dev_build());
    }

    #[test]
    fn overrides_apply() {
        let ctx = UpdateContext::from_build_env()
            .with_api_base("http://127.0.0.1:9999")
            .with_download_base("http://127.0.0.1:9999/dl")
            .with_install_path("/tmp/bookforge-under-test");

        assert_eq!(ctx.latest_release_url(), "http://127.0.0.1:9999/releases/latest");
        assert_eq!(
            ctx.download_url("v2.0.0", "a.tar.gz"),
            "http://127.0.0.1:9999/dl/download/v2.0.0/a.tar.gz"
        );
        assert_eq!(
            ctx.install_path(),
            Some(Path::new("/tmp/bookforge-under-test"))
        );
    }
}
