use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A to-do item kept by the task store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Short summary, required.
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
    /// Whether the task has been finished.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// A task is valid when its title has at least one non-whitespace character.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_task() {
        assert!(Task::new("Learn Docker").validate().is_ok());
    }

    #[test]
    fn blank_title_rejected() {
        assert_eq!(Task::new(" ").validate(), Err(ModelError::EmptyTitle));
        assert_eq!(Task::new("").validate(), Err(ModelError::EmptyTitle));
        assert_eq!(Task::new("\t\n").validate(), Err(ModelError::EmptyTitle));
    }

    #[test]
    fn missing_optional_fields_default() {
        let task: Task = serde_json::from_str(r#"{"title":"write docs"}"#).unwrap();
        assert_eq!(task.title, "write docs");
        assert!(task.description.is_empty());
        assert!(!task.completed);
    }
}
