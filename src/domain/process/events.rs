//! Callbacks the process engine delivers for a running session.
//!
//! Events arrive as JSON tagged by `type`. Every event carries the session it
//! belongs to; events for unknown sessions are dropped by the router.

use serde::{Deserialize, Serialize};

use super::branch::BranchCondition;
use crate::domain::foundation::{
    ElementId, ProcessId, ProcessInstanceId, Progress, SessionId, UserId,
};

/// Model id the engine uses for synthetic service-task notifications.
pub const SERVICE_TASK_MODEL_ID: &str = "serviceTask";

/// The engine reached a task the user works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEvent {
    pub session_id: SessionId,
    pub process_id: ProcessId,
    pub process_instance_id: ProcessInstanceId,
    pub root_process_id: ProcessId,
    pub element_id: ElementId,
    #[serde(default)]
    pub model_id: String,
    #[serde(default)]
    pub progress: f64,
}

impl TaskEvent {
    /// Returns true for notifications about synthetic service tasks.
    pub fn is_service_task(&self) -> bool {
        self.model_id == SERVICE_TASK_MODEL_ID
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.progress)
    }
}

/// The engine waits for the user to pick one of several outgoing flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequestEvent {
    pub session_id: SessionId,
    pub process_instance_id: ProcessInstanceId,
    #[serde(default)]
    pub message: Option<String>,
    /// Option element ids with their display texts, in the order sent.
    #[serde(default, with = "ordered_options")]
    pub options: Vec<(String, String)>,
}

/// Reads a JSON object into `(key, value)` pairs without reordering them.
mod ordered_options {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        options: &[(String, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(options.len()))?;
        for (element_id, text) in options {
            map.serialize_entry(element_id, text)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, String)>, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of element ids to option texts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut options = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    options.push(entry);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

/// The engine branches without user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomatedFlowEvent {
    pub session_id: SessionId,
    pub process_instance_id: ProcessInstanceId,
    pub condition: BranchCondition,
    /// Branch taken while the user is busy in a side activity.
    #[serde(default)]
    pub default: Option<ElementId>,
}

/// The engine reached an element that calls another process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallActivityEvent {
    pub session_id: SessionId,
    pub process_id: ProcessId,
    pub process_instance_id: ProcessInstanceId,
    pub root_process_id: ProcessId,
    pub element_id: ElementId,
    pub activity_process_id: ProcessId,
    #[serde(default)]
    pub progress: f64,
}

impl CallActivityEvent {
    pub fn progress(&self) -> Progress {
        Progress::new(self.progress)
    }
}

/// A process instance ran to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCompleteEvent {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub process_id: ProcessId,
    pub process_instance_id: ProcessInstanceId,
    #[serde(default)]
    pub parent_instance: Option<ProcessInstanceId>,
}

/// A process instance failed inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessErrorEvent {
    pub session_id: SessionId,
    pub process_instance_id: ProcessInstanceId,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: String,
}

/// A process instance was terminated before reaching its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTerminateEvent {
    pub session_id: SessionId,
    pub process_instance_id: ProcessInstanceId,
}

/// Every callback the engine may deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineEvent {
    Task(TaskEvent),
    UserRequest(UserRequestEvent),
    AutomatedFlow(AutomatedFlowEvent),
    CallActivity(CallActivityEvent),
    ProcessComplete(ProcessCompleteEvent),
    ProcessError(ProcessErrorEvent),
    ProcessTerminate(ProcessTerminateEvent),
}

impl EngineEvent {
    /// Returns the session the event targets.
    pub fn session_id(&self) -> &SessionId {
        match self {
            EngineEvent::Task(e) => &e.session_id,
            EngineEvent::UserRequest(e) => &e.session_id,
            EngineEvent::AutomatedFlow(e) => &e.session_id,
            EngineEvent::CallActivity(e) => &e.session_id,
            EngineEvent::ProcessComplete(e) => &e.session_id,
            EngineEvent::ProcessError(e) => &e.session_id,
            EngineEvent::ProcessTerminate(e) => &e.session_id,
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::Task(_) => "task",
            EngineEvent::UserRequest(_) => "userRequest",
            EngineEvent::AutomatedFlow(_) => "automatedFlow",
            EngineEvent::CallActivity(_) => "callActivity",
            EngineEvent::ProcessComplete(_) => "processComplete",
            EngineEvent::ProcessError(_) => "processError",
            EngineEvent::ProcessTerminate(_) => "processTerminate",
        }
    }
}
