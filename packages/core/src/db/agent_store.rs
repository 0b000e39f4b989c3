//! Agent Store
//!
//! Same contract shape as [`PageStore`](super::PageStore), keyed by UUID strings.
//! Agents were originally held by the hosted real-time database; the in-memory
//! implementation keeps them in insertion order for list views.

use super::StoreError;
use crate::models::{Agent, AgentUpdate, NewAgent};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Abstraction layer for agent persistence operations
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Snapshot of all agents in insertion order
    async fn list_all(&self) -> Result<Vec<Agent>, StoreError>;

    /// `Ok(None)` if no agent has this ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Agent>, StoreError>;

    /// Create an agent and return the stored record
    async fn create_returning(&self, agent: NewAgent) -> Result<Agent, StoreError>;

    /// Shallow-merge `update` and return the merged record, `Ok(None)` if absent
    async fn update_returning(
        &self,
        id: &str,
        update: AgentUpdate,
    ) -> Result<Option<Agent>, StoreError>;

    /// Create an agent and return its generated UUID
    async fn create(&self, agent: NewAgent) -> Result<String, StoreError> {
        Ok(self.create_returning(agent).await?.id)
    }

    /// Shallow-merge `update`; `Ok(false)` if the agent doesn't exist
    async fn update(&self, id: &str, update: AgentUpdate) -> Result<bool, StoreError> {
        Ok(self.update_returning(id, update).await?.is_some())
    }

    /// Returns whether an agent was removed
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// In-process agent store
#[derive(Debug, Default)]
pub struct InMemoryAgentStore {
    agents: RwLock<Vec<Agent>>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn list_all(&self) -> Result<Vec<Agent>, StoreError> {
        Ok(self.agents.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Agent>, StoreError> {
        Ok(self.agents.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn create_returning(&self, agent: NewAgent) -> Result<Agent, StoreError> {
        let agent = agent.into_agent();
        let mut agents = self.agents.write().await;

        if agents.iter().any(|a| a.id == agent.id) {
            tracing::error!("Generated agent id {} collides with an existing agent", agent.id);
            return Err(StoreError::duplicate_id(&agent.id));
        }

        agents.push(agent.clone());
        tracing::info!("Created agent {}", agent.id);
        Ok(agent)
    }

    async fn update_returning(
        &self,
        id: &str,
        update: AgentUpdate,
    ) -> Result<Option<Agent>, StoreError> {
        let mut agents = self.agents.write().await;
        match agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                update.apply_to(agent);
                tracing::info!("Updated agent {}", id);
                Ok(Some(agent.clone()))
            }
            None => {
                tracing::debug!("Update skipped, agent {} not found", id);
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut agents = self.agents.write().await;
        let before = agents.len();
        agents.retain(|a| a.id != id);
        let removed = agents.len() < before;

        if removed {
            tracing::info!("Deleted agent {}", id);
        } else {
            tracing::debug!("Delete skipped, agent {} not found", id);
        }
        Ok(removed)
    }
}
