//! Process engine model as seen by this service.
//!
//! The engine owns these records; we only read the fields needed to drive
//! navigation (ids, labels, element types, outgoing edges, instance context).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{ElementId, ProcessId, ProcessInstanceId};

/// Context data attached to a process instance.
pub type ProcessContext = Map<String, Value>;

/// A process definition (the blueprint an instance runs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    pub id: ProcessId,
    pub label: String,
}

/// One running instantiation of a process definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub id: ProcessInstanceId,
    /// Definition this instance runs.
    pub process_id: ProcessId,
    /// Set when the instance was spawned by a call activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_instance_id: Option<ProcessInstanceId>,
    #[serde(default)]
    pub context: ProcessContext,
}

impl ProcessInstance {
    /// Merges caller supplied context over the engine-provided one.
    ///
    /// Keys present in `overrides` replace existing values.
    pub fn merge_context(&mut self, overrides: &ProcessContext) {
        for (key, value) in overrides {
            self.context.insert(key.clone(), value.clone());
        }
    }

    /// Returns true if this instance was started as a sub-process.
    pub fn has_parent(&self) -> bool {
        self.parent_instance_id.is_some()
    }
}

/// Kind of a process graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessElementType {
    StartEvent,
    EndEvent,
    Task,
    UserTask,
    ManualTask,
    ServiceTask,
    CallActivity,
    ExclusiveGateway,
    ParallelGateway,
    #[serde(other)]
    Other,
}

/// The node of the process graph currently being executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessElementInstance {
    pub id: ElementId,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub element_type: ProcessElementType,
    #[serde(default)]
    pub next_elements: Vec<ElementId>,
}

impl ProcessElementInstance {
    /// Returns true if the element invokes another process.
    pub fn is_call_activity(&self) -> bool {
        self.element_type == ProcessElementType::CallActivity
    }

    /// Returns true if there is anything to advance into.
    pub fn has_next(&self) -> bool {
        !self.next_elements.is_empty()
    }

    /// Label shown to the user; unlabeled elements fall back to their id.
    pub fn display_title(&self) -> &str {
        if self.label.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.label
        }
    }
}

/// One level of the instance ancestry used for breadcrumbs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTreeNode {
    pub instance: ProcessInstance,
    /// `None` when the engine no longer knows the definition.
    pub definition: Option<ProcessDefinition>,
}
