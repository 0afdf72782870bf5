//! In-memory repository for routine maintenance tasks.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::maintenance::{
    domain::{OrganizationId, RoutineTask, RoutineTaskId},
    ports::{RoutineTaskRepository, RoutineTaskRepositoryError, RoutineTaskRepositoryResult},
};

/// Thread-safe in-memory routine task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoutineTaskRepository {
    tasks: Arc<RwLock<HashMap<RoutineTaskId, RoutineTask>>>,
}

impl InMemoryRoutineTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> RoutineTaskRepositoryResult<RwLockReadGuard<'_, HashMap<RoutineTaskId, RoutineTask>>>
    {
        self.tasks.read().map_err(|err| {
            RoutineTaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> RoutineTaskRepositoryResult<RwLockWriteGuard<'_, HashMap<RoutineTaskId, RoutineTask>>>
    {
        self.tasks.write().map_err(|err| {
            RoutineTaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Orders tasks newest first, falling back to the identifier for ties.
fn sort_newest_first(tasks: &mut [RoutineTask]) {
    tasks.sort_by_key(|task| (Reverse(task.created_at()), task.id()));
}

#[async_trait]
impl RoutineTaskRepository for InMemoryRoutineTaskRepository {
    async fn store(&self, task: &RoutineTask) -> RoutineTaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(RoutineTaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &RoutineTask) -> RoutineTaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(RoutineTaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: RoutineTaskId,
    ) -> RoutineTaskRepositoryResult<Option<RoutineTask>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RoutineTaskRepositoryResult<Vec<RoutineTask>> {
        let mut found: Vec<RoutineTask> = self
            .read()?
            .values()
            .filter(|task| task.organization_id() == organization_id)
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        Ok(found)
    }

    async fn list_active(&self) -> RoutineTaskRepositoryResult<Vec<RoutineTask>> {
        let mut found: Vec<RoutineTask> = self
            .read()?
            .values()
            .filter(|task| task.is_active())
            .cloned()
            .collect();
        // Deterministic sweep order: oldest registration first.
        found.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(found)
    }

    async fn delete(&self, id: RoutineTaskId) -> RoutineTaskRepositoryResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(RoutineTaskRepositoryError::NotFound(id))
    }
}
