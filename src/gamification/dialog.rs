//! Achievement dialogs
//!
//! Read-only views over one badge list. A dialog receives its badges when it
//! is opened and never fetches or writes anything itself.

use serde::Serialize;

use super::badges::Badge;

/// Which badge list a dialog shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Achieved,
    Missing,
}

impl DialogKind {
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Achieved => "Achieved badges",
            DialogKind::Missing => "Missing badges",
        }
    }
}

/// Badges a dialog was opened with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "badges", rename_all = "snake_case")]
pub enum DialogContents {
    /// The badge fetch had not completed when the dialog opened
    Pending,
    Ready(Vec<Badge>),
}

/// Snapshot of one badge list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementDialog {
    pub kind: DialogKind,
    pub contents: DialogContents,
}

impl AchievementDialog {
    /// Open a dialog over `badges`; `None` means not loaded yet
    pub fn new(kind: DialogKind, badges: Option<&[Badge]>) -> Self {
        let contents = match badges {
            Some(badges) => DialogContents::Ready(badges.to_vec()),
            None => DialogContents::Pending,
        };
        Self { kind, contents }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.contents, DialogContents::Pending)
    }

    /// Badges to list; empty while pending
    pub fn badges(&self) -> &[Badge] {
        match &self.contents {
            DialogContents::Ready(badges) => badges,
            DialogContents::Pending => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(name: &str) -> Badge {
        Badge {
            name: name.to_string(),
            icon: None,
            date: "-".to_string(),
            units: 1,
        }
    }

    #[test]
    fn test_pending_dialog() {
        let dialog = AchievementDialog::new(DialogKind::Missing, None);
        assert!(dialog.is_pending());
        assert!(dialog.badges().is_empty());
        assert_eq!(dialog.title(), "Missing badges");
    }

    #[test]
    fn test_ready_dialog_is_a_snapshot() {
        let mut badges = vec![badge("a"), badge("b")];
        let dialog = AchievementDialog::new(DialogKind::Achieved, Some(&badges));

        badges.push(badge("c"));

        assert!(!dialog.is_pending());
        let names: Vec<&str> = dialog.badges().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_loaded_but_empty_is_not_pending() {
        let dialog = AchievementDialog::new(DialogKind::Achieved, Some(&[]));
        assert!(!dialog.is_pending());
        assert!(dialog.badges().is_empty());
    }
}
