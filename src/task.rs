use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single card on the board.
///
/// `status` mirrors the key of the column the task currently sits in. It is
/// only ever rewritten by the card mover.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Task {
    #[cfg(test)]
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: String::new(),
            members: None,
            labels: None,
            notifications: None,
            date: None,
        }
    }

    pub fn members(&self) -> &str {
        self.members.as_deref().unwrap_or_default()
    }

    pub fn labels(&self) -> &str {
        self.labels.as_deref().unwrap_or_default()
    }

    pub fn notifications(&self) -> &str {
        self.notifications.as_deref().unwrap_or_default()
    }

    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }

    /// Human readable due date. Dates in `YYYY-MM-DD` form are spelled out,
    /// anything else is shown verbatim.
    pub fn due_label(&self) -> Option<String> {
        let raw = self.date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(format!("Due {}", date.format("%B %-d, %Y"))),
            Err(_) => Some(raw.to_string()),
        }
    }

    /// Case-insensitive match against title and description.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
