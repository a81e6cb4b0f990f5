//! Typed view of a rendered workflow
//!
//! The renderer produces text; these types read that text back so callers
//! (and tests) can inspect tasks and actions without string matching.
//! Key names follow the workflow YAML, which is snake_case.

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// A rendered provisioning workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowDocument {
    /// Workflow format version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Workflow name
    pub name: String,

    /// Timeout for the whole workflow (seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_timeout: Option<u64>,

    /// Tasks to execute
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl WorkflowDocument {
    /// Parse a rendered workflow
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Get all action names in order
    pub fn action_names(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .flat_map(|t| &t.actions)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Get total of all action timeouts
    pub fn estimated_duration(&self) -> Duration {
        self.tasks
            .iter()
            .flat_map(|t| &t.actions)
            .filter_map(|a| a.timeout)
            .map(Duration::from_secs)
            .sum()
    }

    /// Find an action by name across all tasks
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.tasks
            .iter()
            .flat_map(|t| &t.actions)
            .find(|a| a.name == name)
    }
}

/// A group of actions executed on one worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Task name
    pub name: String,

    /// Worker identifier, possibly a placeholder such as "{{.device_1}}"
    pub worker: String,

    /// Bind mounts shared by every action
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    /// Actions to execute in order
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A single container-backed step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    /// Action name
    pub name: String,

    /// Container image, e.g. "quay.io/tinkerbell-actions/kexec:v1.0.0"
    pub image: String,

    /// Action timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// PID namespace mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    /// Environment passed to the action
    ///
    /// Values stay YAML scalars: the workflow mixes strings, booleans and
    /// integers (`COMPRESSED: true`, `UID: 0`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, Value>,
}

impl Action {
    /// Environment value as text, for scalar values only
    pub fn env_str(&self, key: &str) -> Option<String> {
        match self.environment.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
