//! HTTP adapter for the process engine.
//!
//! Every definition, instance and element the engine returns is cached, so
//! the `cached_*` lookups triggered by engine events are usually served
//! locally. Entries are never evicted.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::client::RemoteClient;
use crate::domain::foundation::{ElementId, ProcessId, ProcessInstanceId, SessionId, UserId};
use crate::domain::process::{
    ProcessContext, ProcessDefinition, ProcessElementInstance, ProcessInstance,
};
use crate::ports::{DownstreamError, ProcessEngine};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstantiateBody<'a> {
    session_id: &'a SessionId,
    user_id: &'a UserId,
    context: &'a ProcessContext,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionBody<'a> {
    session_id: &'a SessionId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NextBody<'a> {
    session_id: &'a SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    element_id: Option<&'a ElementId>,
}

#[derive(Default)]
struct EngineCache {
    definitions: HashMap<ProcessId, ProcessDefinition>,
    instances: HashMap<ProcessInstanceId, ProcessInstance>,
    elements: HashMap<(ProcessInstanceId, ElementId), ProcessElementInstance>,
}

/// Process engine reached over HTTP.
pub struct RemoteProcessEngine {
    client: RemoteClient,
    cache: RwLock<EngineCache>,
}

impl RemoteProcessEngine {
    pub fn new(client: RemoteClient) -> Self {
        Self {
            client,
            cache: RwLock::new(EngineCache::default()),
        }
    }

    async fn remember_instance(&self, instance: &ProcessInstance) {
        self.cache
            .write()
            .await
            .instances
            .insert(instance.id.clone(), instance.clone());
    }

    async fn remember_element(&self, instance_id: &ProcessInstanceId, element: &ProcessElementInstance) {
        self.cache
            .write()
            .await
            .elements
            .insert((instance_id.clone(), element.id.clone()), element.clone());
    }
}

#[async_trait]
impl ProcessEngine for RemoteProcessEngine {
    async fn get_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Result<ProcessDefinition, DownstreamError> {
        let url = self.client.endpoint(&["processes", process_id.as_str()]);
        let definition: ProcessDefinition = self.client.fetch(self.client.get(url)).await?;
        self.cache
            .write()
            .await
            .definitions
            .insert(definition.id.clone(), definition.clone());
        Ok(definition)
    }

    async fn instantiate_process(
        &self,
        process_id: &ProcessId,
        session_id: &SessionId,
        user_id: &UserId,
        context: &ProcessContext,
    ) -> Result<ProcessInstance, DownstreamError> {
        let url = self
            .client
            .endpoint(&["processes", process_id.as_str(), "instantiate"]);
        let body = InstantiateBody {
            session_id,
            user_id,
            context,
        };
        let instance: ProcessInstance = self.client.fetch(self.client.post(url, &body)).await?;
        self.remember_instance(&instance).await;
        Ok(instance)
    }

    async fn confirm(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
    ) -> Result<ProcessInstance, DownstreamError> {
        let url = self
            .client
            .endpoint(&["instances", instance_id.as_str(), "confirm"]);
        let instance: ProcessInstance = self
            .client
            .fetch(self.client.post(url, &SessionBody { session_id }))
            .await?;
        self.remember_instance(&instance).await;
        Ok(instance)
    }

    async fn next(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
        element_id: Option<&ElementId>,
    ) -> Result<(), DownstreamError> {
        let url = self
            .client
            .endpoint(&["instances", instance_id.as_str(), "next"]);
        let body = NextBody {
            session_id,
            element_id,
        };
        self.client.execute(self.client.post(url, &body)).await
    }

    async fn cancel(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
    ) -> Result<(), DownstreamError> {
        let url = self
            .client
            .endpoint(&["instances", instance_id.as_str(), "cancel"]);
        self.client
            .execute(self.client.post(url, &SessionBody { session_id }))
            .await
    }

    async fn current_element(
        &self,
        instance_id: &ProcessInstanceId,
        session_id: &SessionId,
    ) -> Result<ProcessElementInstance, DownstreamError> {
        let url = self
            .client
            .endpoint(&["instances", instance_id.as_str(), "current"]);
        let request = self
            .client
            .get(url)
            .query(&[("sessionId", session_id.as_str())]);
        let element: ProcessElementInstance = self.client.fetch(request).await?;
        self.remember_element(instance_id, &element).await;
        Ok(element)
    }

    async fn get_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Result<ProcessInstance, DownstreamError> {
        let url = self.client.endpoint(&["instances", instance_id.as_str()]);
        let instance: ProcessInstance = self.client.fetch(self.client.get(url)).await?;
        self.remember_instance(&instance).await;
        Ok(instance)
    }

    async fn cached_process_instance(
        &self,
        instance_id: &ProcessInstanceId,
    ) -> Option<ProcessInstance> {
        if let Some(instance) = self.cache.read().await.instances.get(instance_id) {
            return Some(instance.clone());
        }
        debug!(process_instance_id = %instance_id, "Instance not cached; fetching");
        match self.get_process_instance(instance_id).await {
            Ok(instance) => Some(instance),
            Err(e) => {
                warn!(process_instance_id = %instance_id, error = %e, "Failed to fetch process instance");
                None
            }
        }
    }

    async fn cached_element_instance(
        &self,
        instance_id: &ProcessInstanceId,
        element_id: &ElementId,
    ) -> Option<ProcessElementInstance> {
        let key = (instance_id.clone(), element_id.clone());
        if let Some(element) = self.cache.read().await.elements.get(&key) {
            return Some(element.clone());
        }

        let url = self.client.endpoint(&[
            "instances",
            instance_id.as_str(),
            "elements",
            element_id.as_str(),
        ]);
        match self
            .client
            .fetch::<ProcessElementInstance>(self.client.get(url))
            .await
        {
            Ok(element) => {
                self.remember_element(instance_id, &element).await;
                Some(element)
            }
            Err(e) => {
                warn!(
                    process_instance_id = %instance_id,
                    element_id = %element_id,
                    error = %e,
                    "Failed to fetch element instance"
                );
                None
            }
        }
    }

    async fn cached_process_definition(
        &self,
        process_id: &ProcessId,
    ) -> Option<ProcessDefinition> {
        if let Some(definition) = self.cache.read().await.definitions.get(process_id) {
            return Some(definition.clone());
        }
        match self.get_process_definition(process_id).await {
            Ok(definition) => Some(definition),
            Err(e) => {
                warn!(process_id = %process_id, error = %e, "Failed to fetch process definition");
                None
            }
        }
    }
}
