use crate::error::{StoreError, TaskError};
use crate::task::{Status, Task};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory task store, keyed by task id.
///
/// Ids come from a persisted counter, so a deleted id is never handed out again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRepository {
    tasks: BTreeMap<u32, Task>,
    /// Absent in files written before the counter existed; recomputed on load.
    #[serde(default)]
    next_id: u32,
}

impl Default for TaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Parses a store and restores the id counter.
    ///
    /// Every task must be stored under its own id, and the counter is raised past the highest
    /// id so files without `nextId`, or with a stale one, never hand out a taken id.
    pub fn new_from_json(json: &str) -> Result<Self, StoreError> {
        let mut repo: Self = serde_json::from_str(json)?;
        if let Some((&key, task)) = repo.tasks.iter().find(|(key, task)| **key != task.id) {
            return Err(StoreError::IdMismatch { key, id: task.id });
        }
        let after_highest = match repo.tasks.keys().next_back() {
            Some(&highest) => highest
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted(highest))?,
            None => 1,
        };
        repo.next_id = repo.next_id.max(after_highest);
        Ok(repo)
    }

    pub fn save_as_json(&self, writer: impl std::io::Write) -> Result<(), StoreError> {
        serde_json::to_writer(writer, &self)?;
        Ok(())
    }

    pub fn add(&mut self, description: String) -> Result<u32, TaskError> {
        let curr_id = self.next_id;
        self.next_id = curr_id.checked_add(1).ok_or(TaskError::IdsExhausted)?;
        self.tasks.insert(curr_id, Task::new(curr_id, description));
        debug!("Added task {}", curr_id);
        Ok(curr_id)
    }

    pub fn update(&mut self, id: u32, description: String) -> Result<&Task, TaskError> {
        let task = self.tasks.get_mut(&id).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        task.description = description;
        task.touch();
        Ok(task)
    }

    pub fn delete(&mut self, id: u32) -> Result<Task, TaskError> {
        self.tasks.remove(&id).ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Sets the status verbatim; any transition is allowed.
    pub fn set_status(&mut self, id: u32, status: Status) -> Result<&Task, TaskError> {
        let task = self.tasks.get_mut(&id).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        task.status = status;
        task.touch();
        Ok(task)
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn list_all(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Exact match against the status wire name, so an unknown status matches nothing.
    pub fn list_by_status<'a>(&'a self, status: &'a str) -> impl Iterator<Item = &'a Task> {
        self.tasks
            .values()
            .filter(move |task| task.status.as_str() == status)
    }
}


#[cfg(test)]
mod next_id_tests {
    use super::*;

    #[test]
    fn test_new_repository_starts_with_id_one() {
        let repo = TaskRepository::new();
        assert_eq!(
            repo.next_id, 1,
            "New repository should start with next_id = 1"
        );
    }

    #[test]
    fn test_next_id_increments_correctly_for_multiple_tasks() {
        let mut repo = TaskRepository::new();

        let id1 = repo.add("Task 1".to_string()).unwrap();
        let id2 = repo.add("Task 2".to_string()).unwrap();
        let id3 = repo.add("Task 3".to_string()).unwrap();

        assert_eq!(id1, 1, "First task should have ID 1");
        assert_eq!(id2, 2, "Second task should have ID 2");
        assert_eq!(id3, 3, "Third task should have ID 3");
        assert_eq!(repo.next_id, 4, "next_id should be incremented to 4");
    }

    #[test]
    fn test_json_with_next_id_respects_provided_value() {
        let json = r#"
        {
            "tasks": {
                "1": {
                    "id": 1,
                    "description": "Task 1",
                    "status": "todo",
                    "createdAt": "2023-01-01T00:00:00Z",
                    "updatedAt": ""
                }
            },
            "nextId": 100
        }
        "#;

        let repo = TaskRepository::new_from_json(json).unwrap();

        assert_eq!(
            repo.next_id, 100,
            "Explicit nextId in JSON should be respected"
        );
    }

    #[test]
    fn test_json_without_next_id_resumes_after_highest_id() {
        let json = r#"
        {
            "tasks": {
                "1": {"id": 1, "description": "a", "status": "todo", "createdAt": "2023-01-01T00:00:00Z", "updatedAt": ""},
                "4": {"id": 4, "description": "b", "status": "done", "createdAt": "2023-01-01T00:00:00Z", "updatedAt": ""}
            }
        }
        "#;

        let mut repo = TaskRepository::new_from_json(json).unwrap();

        assert_eq!(repo.add("c".to_string()).unwrap(), 5);
    }

    #[test]
    fn test_empty_store_without_next_id_starts_at_one() {
        let mut repo = TaskRepository::new_from_json(r#"{"tasks": {}}"#).unwrap();

        assert_eq!(repo.add("first".to_string()).unwrap(), 1);
        assert_eq!(repo.add("second".to_string()).unwrap(), 2);
    }

    #[test]
    fn test_stale_next_id_is_raised_past_existing_ids() {
        let json = r#"{"tasks": {"7": {"id": 7, "description": "a", "status": "todo", "createdAt": "2023-01-01T00:00:00Z", "updatedAt": ""}}, "nextId": 3}"#;

        let mut repo = TaskRepository::new_from_json(json).unwrap();

        assert_eq!(repo.add("b".to_string()).unwrap(), 8);
    }

    #[test]
    fn test_next_id_maintained_after_removing_tasks() {
        let mut repo = TaskRepository::new();

        repo.add("Task 1".to_string()).unwrap();
        repo.add("Task 2".to_string()).unwrap();
        repo.add("Task 3".to_string()).unwrap();

        repo.delete(3).unwrap();

        assert_eq!(
            repo.next_id, 4,
            "next_id should not change when tasks are removed"
        );

        let id = repo.add("Task 4".to_string()).unwrap();
        assert_eq!(
            id, 4,
            "New task should get ID 4, not reuse the removed ID 3"
        );
    }

    #[test]
    fn test_highest_possible_id_cannot_be_followed() {
        let json = r#"{"tasks": {"4294967295": {"id": 4294967295, "description": "a", "status": "todo", "createdAt": "2023-01-01T00:00:00Z", "updatedAt": ""}}}"#;

        assert!(matches!(
            TaskRepository::new_from_json(json),
            Err(StoreError::IdsExhausted(u32::MAX))
        ));
    }

    #[test]
    fn test_add_refuses_to_wrap_the_counter() {
        let mut repo =
            TaskRepository::new_from_json(r#"{"tasks": {}, "nextId": 4294967295}"#).unwrap();
        let before = repo.clone();

        assert_eq!(
            repo.add("one too many".to_string()),
            Err(TaskError::IdsExhausted)
        );
        assert_eq!(repo, before, "a refused add should leave the store untouched");
    }
}
