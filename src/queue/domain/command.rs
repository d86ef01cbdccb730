//! Chat-command parser.

use super::TaskId;

/// A recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a task with the given title. The title may be empty; the
    /// chat path deliberately performs no validation.
    AddTask {
        /// Everything after the `!add task` keyword, trimmed.
        title: String,
    },
    /// List pending tasks.
    ListPending,
    /// Mark the identified task as completed.
    Complete {
        /// Target task identifier.
        id: TaskId,
    },
    /// Report queue statistics.
    ShowStatus,
    /// Show the command reference.
    ShowHelp,
}

impl Command {
    /// Parses raw chat message text into a command.
    ///
    /// Input is trimmed and lowercased before matching; recognition is a
    /// literal prefix match on the keyword. Returns `None` for anything
    /// unrecognized, including `!complete` with a non-integer argument.
    #[must_use]
    pub fn parse(raw_text: &str) -> Option<Self> {
        let text = raw_text.trim().to_lowercase();

        if let Some(rest) = text.strip_prefix("!add task") {
            return Some(Self::AddTask {
                title: rest.trim().to_owned(),
            });
        }
        if text.starts_with("!list") {
            return Some(Self::ListPending);
        }
        if text.starts_with("!complete") {
            let id = text
                .split_whitespace()
                .nth(1)
                .and_then(|token| token.parse::<i64>().ok())?;
            return Some(Self::Complete {
                id: TaskId::from_i64(id),
            });
        }
        if text.starts_with("!status") {
            return Some(Self::ShowStatus);
        }
        if text.starts_with("!help") {
            return Some(Self::ShowHelp);
        }

        None
    }
}
