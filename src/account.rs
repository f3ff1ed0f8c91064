use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named Git identity: one username/email pair under a user-chosen label.
///
/// The label is called `type` in the persisted file, hence the serde rename.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub email: String,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.kind)
    }
}

/// Short label summarizing the active account, printed after every mutation
/// and by the `status` command.
pub fn status_line(active: Option<&Account>) -> String {
    match active {
        Some(account) => format!("Git: {account}"),
        None => "Git: not logged in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_shows_active_identity() {
        let account = Account {
            kind: "work".into(),
            username: "alice".into(),
            email: "a@x.com".into(),
        };
        assert_eq!(status_line(Some(&account)), "Git: alice (work)");
    }

    #[test]
    fn status_line_when_nothing_is_active() {
        assert_eq!(status_line(None), "Git: not logged in");
    }
}
