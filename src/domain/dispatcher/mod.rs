// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Kind-routed existence checks, creation and cascade deletion

pub mod registry;

pub use self::registry::{Cascade, KindHandler, KindRegistry};

use crate::domain::resource::ResourcePayload;
use crate::infrastructure::kubernetes::{ClusterApi, DeletePolicy};
use crate::shared::error::KubeError;
use std::sync::Arc;

/// Routes resource operations by kind tag. Every call runs its API
/// requests one after another and stops at the first error; a cascade
/// that fails part way is left as is.
pub struct ResourceDispatcher {
    api: Arc<dyn ClusterApi>,
    registry: KindRegistry,
}

impl ResourceDispatcher {
    pub fn new(api: Arc<dyn ClusterApi>) -> Self {
        Self {
            api,
            registry: KindRegistry::new(),
        }
    }

    /// Create the namespace unless it already exists. Never deletes.
    pub async fn ensure_namespace(&self, namespace: &str) -> Result<(), KubeError> {
        match self.api.get_namespace(namespace).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                tracing::info!(namespace, "creating namespace");
                self.api.create_namespace(namespace).await
            }
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, kind: &str, name: &str, namespace: &str) -> Result<bool, KubeError> {
        let handler = self.registry.lookup(kind)?;

        tracing::debug!(kind, name, namespace, "checking resource");
        match self.api.get(handler.api_kind(), name, namespace).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Create `payload` in `namespace`. The payload variant must match `kind`.
    pub async fn create(
        &self,
        kind: &str,
        namespace: &str,
        payload: &ResourcePayload,
    ) -> Result<(), KubeError> {
        let handler = self.registry.lookup(kind)?;
        payload.ensure_kind(handler.kind)?;

        tracing::debug!(kind, name = payload.name(), namespace, "creating resource");
        self.api.create(namespace, payload).await
    }

    /// Delete immediately, then remove cascade children for deployments
    /// (replica sets labelled `name=<name>`) and jobs (pods labelled
    /// `job-name=<name>`). Parents with a cascade are deleted with orphan
    /// propagation so the garbage collector does not race the child
    /// deletes.
    ///
    /// Children created between the list and the deletes are not seen.
    pub async fn destroy(&self, kind: &str, name: &str, namespace: &str) -> Result<(), KubeError> {
        let handler = *self.registry.lookup(kind)?;

        let policy = if handler.cascade.is_some() {
            DeletePolicy::IMMEDIATE_ORPHAN
        } else {
            DeletePolicy::IMMEDIATE
        };

        tracing::debug!(kind, name, namespace, "deleting resource");
        self.api
            .delete(handler.api_kind(), name, namespace, policy)
            .await?;

        let Some(cascade) = handler.cascade else {
            return Ok(());
        };

        let selector = cascade.selector(name);
        let children = self
            .api
            .list_names(cascade.child, &selector, namespace)
            .await?;

        for child in children {
            tracing::info!(kind = %cascade.child, name = %child, namespace, "deleting dependent");
            self.api
                .delete(cascade.child, &child, namespace, DeletePolicy::IMMEDIATE)
                .await?;
        }

        Ok(())
    }
}
