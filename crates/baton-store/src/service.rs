use std::sync::Arc;

use baton_model::{RecordId, Task};
use tracing::{debug, instrument};

use crate::{
    collection::{Collection, Document},
    error::StoreError,
};

/// Task operations with validation, over any [`Collection`] of tasks.
pub struct TaskService<C> {
    tasks: Arc<C>,
}

impl<C> Clone for TaskService<C> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<C> TaskService<C>
where
    C: Collection<Task>,
{
    pub fn new(tasks: C) -> Self {
        Self {
            tasks: Arc::new(tasks),
        }
    }

    /// Validates and stores a new task.
    #[instrument(level = "debug", skip_all, fields(title = %task.title))]
    pub async fn create(&self, task: Task) -> Result<Document<Task>, StoreError> {
        task.validate()?;
        let id = self.tasks.insert(task.clone()).await?;
        debug!(%id, "task created");
        Ok(Document { id, data: task })
    }

    pub async fn list(&self) -> Result<Vec<Document<Task>>, StoreError> {
        self.tasks.find_all().await
    }

    pub async fn get(&self, id: &RecordId) -> Result<Document<Task>, StoreError> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Replaces title and description; the completion flag is kept.
    #[instrument(level = "debug", skip(self, changes), fields(%id))]
    pub async fn edit(&self, id: &RecordId, changes: Task) -> Result<Document<Task>, StoreError> {
        changes.validate()?;
        let current = self.get(id).await?;

        let task = Task {
            title: changes.title,
            description: changes.description,
            completed: current.data.completed,
        };
        self.put(id, task).await
    }

    pub async fn set_completed(
        &self,
        id: &RecordId,
        completed: bool,
    ) -> Result<Document<Task>, StoreError> {
        let current = self.get(id).await?;
        let task = Task {
            completed,
            ..current.data
        };
        self.put(id, task).await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        if !self.tasks.delete_by_id(id).await? {
            return Err(StoreError::NotFound(id.clone()));
        }
        debug!(%id, "task deleted");
        Ok(())
    }

    async fn put(&self, id: &RecordId, task: Task) -> Result<Document<Task>, StoreError> {
        // the record can vanish between the read and the write
        if !self.tasks.update(id, task.clone()).await? {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(Document {
            id: id.clone(),
            data: task,
        })
    }
}
