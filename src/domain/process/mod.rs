//! Process engine vocabulary.
//!
//! Definitions, instances and element instances as the engine reports them,
//! the branch conditions of automated flows, and the callbacks the engine
//! delivers while a session runs.

mod branch;
mod events;
mod model;

pub use branch::{BranchCase, BranchCondition};
pub use events::{
    AutomatedFlowEvent, CallActivityEvent, EngineEvent, ProcessCompleteEvent, ProcessErrorEvent,
    ProcessTerminateEvent, TaskEvent, UserRequestEvent, SERVICE_TASK_MODEL_ID,
};
pub use model::{
    ProcessContext, ProcessDefinition, ProcessElementInstance, ProcessElementType,
    ProcessInstance, ProcessTreeNode,
};
