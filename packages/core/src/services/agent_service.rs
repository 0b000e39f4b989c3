//! Agent Service
//!
//! Business layer for agents: name validation on creation, flow editing, and
//! domain events for every successful mutation.

use crate::db::{AgentStore, DomainEvent};
use crate::models::{Agent, AgentUpdate, NewAgent};
use crate::services::error::AgentServiceError;
use crate::services::page_service::DOMAIN_EVENT_CHANNEL_CAPACITY;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AgentService {
    store: Arc<dyn AgentStore>,
    event_tx: broadcast::Sender<DomainEvent>,
}

impl AgentService {
    /// Create an AgentService with its own event channel
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        let (event_tx, _) = broadcast::channel(DOMAIN_EVENT_CHANNEL_CAPACITY);
        Self { store, event_tx }
    }

    /// Create an AgentService that shares an existing event channel
    pub fn with_event_sender(
        store: Arc<dyn AgentStore>,
        event_tx: broadcast::Sender<DomainEvent>,
    ) -> Self {
        Self { store, event_tx }
    }

    /// Subscribe to `AgentCreated`, `AgentUpdated` and `AgentDeleted`
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<DomainEvent> {
        self.event_tx.subscribe()
    }

    fn emit_event(&self, event: DomainEvent) {
        tracing::debug!("Emitting {}", event.event_type());
        let _ = self.event_tx.send(event);
    }

    pub async fn list_agents(&self) -> Result<Vec<Agent>, AgentServiceError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get_agent(&self, id: &str) -> Result<Option<Agent>, AgentServiceError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Create an agent with an empty flow
    ///
    /// # Errors
    ///
    /// `AgentServiceError::Validation` if `name` is blank.
    pub async fn add_agent(&self, name: impl Into<String>) -> Result<String, AgentServiceError> {
        self.create_agent(NewAgent::new(name)).await
    }

    pub async fn create_agent(&self, agent: NewAgent) -> Result<String, AgentServiceError> {
        agent.validate()?;

        let created = self.store.create_returning(agent).await?;
        let id = created.id.clone();
        self.emit_event(DomainEvent::AgentCreated(created));
        Ok(id)
    }

    /// Shallow-merge `update`; `Ok(false)` if the agent doesn't exist
    pub async fn update_agent(
        &self,
        id: &str,
        update: AgentUpdate,
    ) -> Result<bool, AgentServiceError> {
        if let Some(name) = &update.name {
            NewAgent::new(name.as_str()).validate()?;
        }

        match self.store.update_returning(id, update).await? {
            Some(agent) => {
                self.emit_event(DomainEvent::AgentUpdated(agent));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the agent's flow definition
    ///
    /// Unlike `update_agent`, a missing agent is an error here: the flow editor
    /// only ever saves an agent it has open.
    pub async fn update_flow(
        &self,
        id: &str,
        flow: impl Into<String>,
    ) -> Result<(), AgentServiceError> {
        let updated = self
            .update_agent(id, AgentUpdate::new().with_flow(flow))
            .await?;
        if !updated {
            return Err(AgentServiceError::agent_not_found(id));
        }
        Ok(())
    }

    pub async fn rename_agent(
        &self,
        id: &str,
        name: impl Into<String>,
    ) -> Result<bool, AgentServiceError> {
        self.update_agent(id, AgentUpdate::new().with_name(name)).await
    }

    pub async fn delete_agent(&self, id: &str) -> Result<bool, AgentServiceError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            self.emit_event(DomainEvent::AgentDeleted { id: id.to_string() });
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryAgentStore;
    use crate::models::ValidationError;

    fn service() -> AgentService {
        AgentService::new(Arc::new(InMemoryAgentStore::new()))
    }

    #[tokio::test]
    async fn test_add_agent_rejects_blank_name() {
        let service = service();

        let err = service.add_agent("").await.unwrap_err();
        assert_eq!(
            err,
            AgentServiceError::Validation(ValidationError::MissingField("name".to_string()))
        );
        assert!(service.list_agents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_flow() {
        let service = service();
        let id = service.add_agent("Planner").await.unwrap();

        service.update_flow(&id, "plan\nexecute").await.unwrap();

        let agent = service.get_agent(&id).await.unwrap().unwrap();
        assert_eq!(agent.flow, "plan\nexecute");
        assert_eq!(agent.name, "Planner");
    }

    #[tokio::test]
    async fn test_update_flow_on_missing_agent() {
        let service = service();
        assert_eq!(
            service.update_flow("nope", "x").await.unwrap_err(),
            AgentServiceError::agent_not_found("nope")
        );
    }

    #[tokio::test]
    async fn test_rename_rejects_blank_name() {
        let service = service();
        let id = service.add_agent("Planner").await.unwrap();

        assert!(service.rename_agent(&id, " ").await.is_err());
        assert!(service.rename_agent(&id, "Scheduler").await.unwrap());
        assert_eq!(
            service.get_agent(&id).await.unwrap().unwrap().name,
            "Scheduler"
        );
    }

    #[tokio::test]
    async fn test_delete_emits_only_when_removed() {
        let service = service();
        let id = service.add_agent("Temp").await.unwrap();
        let mut rx = service.subscribe_to_events();

        assert!(!service.delete_agent("unknown").await.unwrap());
        assert!(service.delete_agent(&id).await.unwrap());

        assert_eq!(rx.recv().await.unwrap(), DomainEvent::AgentDeleted { id });
        assert!(rx.try_recv().is_err());
    }
}
