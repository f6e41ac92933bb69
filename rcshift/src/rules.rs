//! Migration rule table for the deprecated clipboard settings.
//!
//! Two boolean settings, `copyImageToClipboard` and `copySaveLocation`, are
//! replaced by the single enumerated setting `clipboardGroup`. Each rule maps
//! a deprecated key to the clipboard group written when the old value was
//! `true`, and knows the `# DELETE` marker that tells the downstream config
//! updater to drop the old key.

/// The unified key that replaces both deprecated boolean settings.
pub const CLIPBOARD_GROUP_KEY: &str = "clipboardGroup";

/// Enumerated values of the unified `clipboardGroup` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardGroup {
    /// Copy the captured image to the clipboard after a screenshot.
    PostScreenshotCopyImage,
    /// Copy the save location to the clipboard after a screenshot.
    PostScreenshotCopyLocation,
}

impl ClipboardGroup {
    /// Configuration-file spelling of the enumerated value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostScreenshotCopyImage => "PostScreenshotCopyImage",
            Self::PostScreenshotCopyLocation => "PostScreenshotCopyLocation",
        }
    }
}

/// A deprecated boolean setting and the clipboard group replacing it.
#[derive(Debug, Clone, Copy)]
pub struct MigrationRule {
    /// Deprecated key, matched as a raw line prefix.
    pub key: &'static str,
    /// Group written to `clipboardGroup` when the deprecated value is `true`.
    pub group: ClipboardGroup,
}

impl MigrationRule {
    /// Replacement assignment line, `clipboardGroup=<group>`.
    #[must_use]
    pub fn replacement_line(&self) -> String {
        format!("{CLIPBOARD_GROUP_KEY}={}", self.group.as_str())
    }

    /// Deletion marker line for the downstream config updater.
    #[must_use]
    pub fn delete_marker(&self) -> String {
        format!("# DELETE {}", self.key)
    }
}

/// The two deprecated boolean settings replaced by `clipboardGroup`.
pub static MIGRATION_RULES: [MigrationRule; 2] = [
    MigrationRule {
        key: "copyImageToClipboard",
        group: ClipboardGroup::PostScreenshotCopyImage,
    },
    MigrationRule {
        key: "copySaveLocation",
        group: ClipboardGroup::PostScreenshotCopyLocation,
    },
];

/// Finds the rule whose key is a prefix of the raw line.
///
/// Matching is on the untrimmed line: an indented entry never matches, and a
/// longer key that happens to share a deprecated prefix does. The marker a
/// matched rule emits always carries the rule's key literal, not whatever key
/// text appeared on the line.
#[must_use]
pub fn match_rule(line: &str) -> Option<&'static MigrationRule> {
    MIGRATION_RULES.iter().find(|rule| line.starts_with(rule.key))
}
