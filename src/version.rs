/// Build identity injected through `DEEJ_*` variables at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub git_commit: &'static str,
    pub version_tag: &'static str,
    pub build_type: &'static str,
}

impl VersionInfo {
    pub const fn injected() -> Self {
        Self {
            git_commit: or_empty(option_env!("DEEJ_GIT_COMMIT")),
            version_tag: or_empty(option_env!("DEEJ_VERSION_TAG")),
            build_type: or_empty(option_env!("DEEJ_BUILD_TYPE")),
        }
    }

    /// `Version <buildType>-<tag or commit>`, or nothing when the build
    /// type or both identifiers are missing.
    pub fn display_string(&self) -> Option<String> {
        if self.build_type.is_empty() {
            return None;
        }
        let identifier = match (self.version_tag, self.git_commit) {
            ("", "") => return None,
            ("", commit) => commit,
            (tag, _) => tag,
        };
        Some(format!("Version {}-{}", self.build_type, identifier))
    }
}

const fn or_empty(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "",
    }
}
