//! Agent Data Structures
//!
//! Agents are named automation units whose behaviour is described by a free-text
//! `flow`. Unlike pages they carry UUID identifiers, generated by the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for record input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// A named automation agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// UUID v4 assigned on creation
    pub id: String,

    pub name: String,

    /// Flow definition text; empty for a freshly created agent
    #[serde(default)]
    pub flow: String,

    #[serde(default)]
    pub icon: String,
}

/// Fields for creating an agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NewAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_flow(mut self, flow: impl Into<String>) -> Self {
        self.flow = Some(flow.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Reject blank names
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        Ok(())
    }

    /// Materialize the agent with a freshly generated UUID
    pub fn into_agent(self) -> Agent {
        Agent {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            flow: self.flow.unwrap_or_default(),
            icon: self.icon.unwrap_or_default(),
        }
    }
}

/// Partial agent update (shallow merge)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AgentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_flow(mut self, flow: impl Into<String>) -> Self {
        self.flow = Some(flow.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.flow.is_none() && self.icon.is_none()
    }

    pub fn apply_to(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name = name.clone();
        }
        if let Some(flow) = &self.flow {
            agent.flow = flow.clone();
        }
        if let Some(icon) = &self.icon {
            agent.icon = icon.clone();
        }
    }
}
