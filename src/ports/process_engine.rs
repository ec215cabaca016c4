//! Process Engine Port - Interface to the engine executing assistance processes.
//!
//! The engine owns definitions and instances. This service only starts,
//! confirms, advances and cancels instances on behalf of a session and reads
//! back what the engine reports.
//!
//! # Cached lookups
//!
//! Engine events carry ids only. The `cached_*` operations resolve those ids
//! against whatever the adapter already knows and fall back to the engine on
//! a miss; they never fail, a missing record is `None`.

use async_trait::async_trait;

use super::DownstreamError;
use crate::domain::foundation::{ElementId, ProcessId, ProcessInstanceId, SessionId, UserId};
use crate::domain::process::{
    ProcessContext, ProcessDefinition, ProcessElementInstance, ProcessInstance, ProcessTreeNode,
};

/// Upper bound on parent hops when building the instance ancestry.
const MAX_TREE_DEPTH: usize = 32;

/// Port for the process engine.
#[async_trait]
pub trait ProcessEngine: Send + Sync {
    /// Fetches a process definition.
    ///
    /// # Errors
    ///
    /// `DownstreamError` with status 404 if the engine does not know the id.
    async fn get_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Result<ProcessDefinition, DownstreamError>;

    /// Starts a new instance of `process_id` for the session.
    async fn instantiate_process(
        &self,
        process_id: &ProcessId,
        session_id: &SessionId,
        user_id: &UserId,
        context: &ProcessContext,
    ) -> Result<ProcessInstance, DownstreamError>;

    /// Confirms a waiting instance; for call activities the engine answers
    /// with the spawned sub-process instance.
    async fn confirm(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
    ) -> Result<ProcessInstance, DownstreamError>;

    /// Advances an instance. `None` lets the engine follow its default flow.
    async fn next(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
        element_id: Option<&ElementId>,
    ) -> Result<(), DownstreamError>;

    async fn cancel(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
    ) -> Result<(), DownstreamError>;

    /// Returns the element an instance is currently at.
    async fn current_element(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
    ) -> Result<ProcessElementInstance, DownstreamError>;

    async fn get_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Result<ProcessInstance, DownstreamError>;

    async fn cached_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Option<ProcessInstance>;

    async fn cached_element_instance(
        &self,
        instance_id: &ProcessInstanceId,
        element_id: &ElementId,
    ) -> Option<ProcessElementInstance>;

    async fn cached_process_definition(&self, process_id: &ProcessId)
        -> Option<ProcessDefinition>;

    /// Returns the ancestry of an instance, root process first.
    ///
    /// Levels whose definition is unknown keep `definition: None`. An unknown
    /// instance yields an empty tree.
    async fn process_tree(&self, instance_id: &ProcessInstanceId) -> Vec<ProcessTreeNode> {
        let mut tree = Vec::new();
        let mut next = Some(instance_id.clone());

        while let Some(id) = next.take() {
            if tree.len() >= MAX_TREE_DEPTH {
                break;
            }
            let Some(instance) = self.cached_process_instance(&id).await else {
                break;
            };
            let definition = self.cached_process_definition(&instance.process_id).await;
            next = instance.parent_instance_id.clone();
            tree.push(ProcessTreeNode {
                instance,
                definition,
            });
        }

        tree.reverse();
        tree
    }
}
