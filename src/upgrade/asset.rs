//! Platform-specific asset naming.

use super::context::UpdateContext;

/// Names and location of the release asset for one platform target.
///
/// Derived purely from the context and the release tag; no network or
/// filesystem access. Two filename dialects exist:
///
/// | target      | archive                      | binary inside            |
/// |-------------|------------------------------|--------------------------|
/// | non-Windows | `<bin>-<os>-<arch>.tar.gz`   | `<bin>-<os>-<arch>`      |
/// | Windows     | `<bin>-<os>-<arch>.exe.zip`  | `<bin>-<os>-<arch>.exe`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    /// Filename of the archive attached to the release.
    pub archive_name: String,
    /// Name of the binary entry expected inside the archive.
    pub binary_name: String,
    /// Full download URL of the archive.
    pub url: String,
}

impl AssetSpec {
    /// Derive the asset names and URL for the given release tag.
    pub fn locate(ctx: &UpdateContext, tag: &str) -> Self {
        let target = ctx.target();
        let stem = format!("{}-{}-{}", ctx.bin_name(), target.os(), target.arch());

        let (archive_name, binary_name) = if target.is_windows() {
            (format!("{stem}.exe.zip"), format!("{stem}.exe"))
        } else {
            (format!("{stem}.tar.gz"), stem)
        };

        let url = ctx.download_url(tag, &archive_name);
        Self {
            archive_name,
            binary_name,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrade::platform::PlatformTarget;

    #[test]
    fn unix_targets_use_tar_gz_dialect() {
        let ctx = UpdateContext::from_build_env().with_target(PlatformTarget::new("linux", "x86_64"));
        let spec = AssetSpec::locate(&ctx, "v1.2.3");

        assert_eq!(spec.archive_name, "bookforge-linux-x86_64.tar.gz");
        assert_eq!(spec.binary_name, "bookforge-linux-x86_64");
        assert_eq!(
            spec.url,
            "https://github.com/bookforge/bookforge/releases/download/v1.2.3/bookforge-linux-x86_64.tar.gz"
        );
    }

    #[test]
    fn macos_arm_uses_tar_gz_dialect() {
        let ctx =
            UpdateContext::from_build_env().with_target(PlatformTarget::new("macos", "aarch64"));
        let spec = AssetSpec::locate(&ctx, "v0.9.0");

        assert_eq!(spec.archive_name, "bookforge-macos-aarch64.tar.gz");
        assert_eq!(spec.binary_name, "bookforge-macos-aarch64");
    }

    #[test]
    fn windows_targets_use_exe_zip_dialect() {
        let ctx =
            UpdateContext::from_build_env().with_target(PlatformTarget::new("windows", "x86_64"));
        let spec = AssetSpec::locate(&ctx, "v1.2.3");

        assert_eq!(spec.archive_name, "bookforge-windows-x86_64.exe.zip");
        assert_eq!(spec.binary_name, "bookforge-windows-x86_64.exe");
        assert_eq!(
            spec.url,
            "https://github.com/bookforge/bookforge/releases/download/v1.2.3/bookforge-windows-x86_64.exe.zip"
        );
    }
}
