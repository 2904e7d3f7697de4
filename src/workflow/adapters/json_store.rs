//! JSON-file task repository over a capability directory handle.
//!
//! The whole collection persists as one JSON array in insertion order, the
//! durable analogue of a browser-local task store. Every write rewrites the
//! document through a temporary file followed by a rename, so readers never
//! observe a partial document. Blocking filesystem work runs on the tokio
//! blocking pool, and a mutex serialises writers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::workflow::{
    domain::{ProjectId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Task repository persisting the collection to a single JSON document.
#[derive(Debug)]
pub struct JsonFileTaskRepository {
    store: Arc<Mutex<FileStore>>,
}

#[derive(Debug)]
struct FileStore {
    dir: Dir,
    file_name: String,
}

impl FileStore {
    fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        let contents = match self.dir.read_to_string(self.file_name.as_str()) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(TaskRepositoryError::persistence(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(TaskRepositoryError::persistence)
    }

    fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let payload =
            serde_json::to_string_pretty(tasks).map_err(TaskRepositoryError::persistence)?;
        let temp_name = format!("{}.tmp", self.file_name);
        self.dir
            .write(temp_name.as_str(), payload.as_bytes())
            .map_err(TaskRepositoryError::persistence)?;
        self.dir
            .rename(temp_name.as_str(), &self.dir, self.file_name.as_str())
            .map_err(TaskRepositoryError::persistence)?;
        Ok(())
    }
}

impl JsonFileTaskRepository {
    /// Creates a repository storing tasks in `file_name` inside `dir`.
    ///
    /// A missing file reads as an empty collection; it is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<String>) -> Self {
        Self {
            store: Arc::new(Mutex::new(FileStore {
                dir,
                file_name: file_name.into(),
            })),
        }
    }

    /// Opens `path` with ambient authority and stores tasks in `file_name`
    /// inside it.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be
    /// opened.
    pub fn open_ambient(path: &str, file_name: impl Into<String>) -> std::io::Result<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self::new(dir, file_name))
    }

    async fn with_store<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&FileStore) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let guard = store.lock().map_err(|err| {
                TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            f(&guard)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for JsonFileTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let incoming = task.clone();
        self.with_store(move |store| {
            let mut tasks = store.load()?;
            if tasks.iter().any(|existing| existing.id() == incoming.id()) {
                return Err(TaskRepositoryError::DuplicateTask(incoming.id()));
            }
            tasks.push(incoming);
            store.save(&tasks)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let incoming = task.clone();
        self.with_store(move |store| {
            let mut tasks = store.load()?;
            let Some(slot) = tasks
                .iter_mut()
                .find(|existing| existing.id() == incoming.id())
            else {
                return Err(TaskRepositoryError::NotFound(incoming.id()));
            };
            if slot.version() + 1 != incoming.version() {
                return Err(TaskRepositoryError::VersionConflict {
                    task_id: incoming.id(),
                    stored: slot.version(),
                    attempted: incoming.version(),
                });
            }
            *slot = incoming;
            store.save(&tasks)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.with_store(move |store| {
            let tasks = store.load()?;
            Ok(tasks.into_iter().find(|task| task.id() == id))
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.with_store(FileStore::load).await
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let wanted = project_id.clone();
        self.with_store(move |store| {
            let tasks = store.load()?;
            Ok(tasks
                .into_iter()
                .filter(|task| task.project_id() == Some(&wanted))
                .collect())
        })
        .await
    }
}
