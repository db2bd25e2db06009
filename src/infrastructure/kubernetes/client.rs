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

use crate::domain::resource::{ApiKind, ResourceKind, ResourcePayload};
use crate::shared::error::KubeError;
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, PersistentVolumeClaim, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{DeleteParams, ListParams, PostParams, PropagationPolicy};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// How a delete request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePolicy {
    pub grace_period_seconds: u32,
    /// Leave dependents to the caller instead of the garbage collector.
    pub orphan_dependents: bool,
}

impl DeletePolicy {
    pub const IMMEDIATE: DeletePolicy = DeletePolicy {
        grace_period_seconds: 0,
        orphan_dependents: false,
    };

    pub const IMMEDIATE_ORPHAN: DeletePolicy = DeletePolicy {
        grace_period_seconds: 0,
        orphan_dependents: true,
    };
}

pub fn delete_params(policy: DeletePolicy) -> DeleteParams {
    DeleteParams {
        grace_period_seconds: Some(policy.grace_period_seconds),
        propagation_policy: policy
            .orphan_dependents
            .then_some(PropagationPolicy::Orphan),
        ..Default::default()
    }
}

pub fn list_params(label_selector: &str) -> ListParams {
    ListParams::default().labels(label_selector)
}

/// Cluster operations the dispatcher needs. Implementations translate
/// transport errors into `KubeError` so callers never see `kube::Error`.
#[async_trait::async_trait]
pub trait ClusterApi: Send + Sync {
    async fn get(&self, kind: ApiKind, name: &str, namespace: &str) -> Result<(), KubeError>;

    async fn create(&self, namespace: &str, payload: &ResourcePayload) -> Result<(), KubeError>;

    async fn delete(
        &self,
        kind: ApiKind,
        name: &str,
        namespace: &str,
        policy: DeletePolicy,
    ) -> Result<(), KubeError>;

    /// Names of the objects of `kind` matching `label_selector`, in list order.
    async fn list_names(
        &self,
        kind: ApiKind,
        label_selector: &str,
        namespace: &str,
    ) -> Result<Vec<String>, KubeError>;

    async fn get_namespace(&self, name: &str) -> Result<(), KubeError>;

    async fn create_namespace(&self, name: &str) -> Result<(), KubeError>;
}

pub struct KubeClusterApi {
    client: Client,
}

impl KubeClusterApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn namespaced<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), namespace)
    }

    async fn get_typed<K>(&self, name: &str, namespace: &str) -> Result<(), KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        self.namespaced::<K>(namespace).get(name).await?;
        Ok(())
    }

    async fn create_typed<K>(&self, namespace: &str, resource: &K) -> Result<(), KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope>
            + Clone
            + DeserializeOwned
            + Serialize
            + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let pp = PostParams::default();

        self.namespaced::<K>(namespace).create(&pp, resource).await?;
        Ok(())
    }

    async fn delete_typed<K>(
        &self,
        name: &str,
        namespace: &str,
        dp: &DeleteParams,
    ) -> Result<(), KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        self.namespaced::<K>(namespace).delete(name, dp).await?;
        Ok(())
    }

    async fn list_names_typed<K>(
        &self,
        label_selector: &str,
        namespace: &str,
    ) -> Result<Vec<String>, KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let lp = list_params(label_selector);

        let list = self.namespaced::<K>(namespace).list(&lp).await?;
        Ok(list
            .items
            .iter()
            .filter_map(|item| item.meta().name.clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl ClusterApi for KubeClusterApi {
    async fn get(&self, kind: ApiKind, name: &str, namespace: &str) -> Result<(), KubeError> {
        match kind {
            ApiKind::Resource(ResourceKind::Deployment) => {
                self.get_typed::<Deployment>(name, namespace).await
            }
            ApiKind::Resource(ResourceKind::Service) => {
                self.get_typed::<Service>(name, namespace).await
            }
            ApiKind::Resource(ResourceKind::Job) => self.get_typed::<Job>(name, namespace).await,
            ApiKind::Resource(ResourceKind::PersistentVolumeClaim) => {
                self.get_typed::<PersistentVolumeClaim>(name, namespace).await
            }
            ApiKind::Resource(ResourceKind::ConfigMap) => {
                self.get_typed::<ConfigMap>(name, namespace).await
            }
            ApiKind::Resource(ResourceKind::PetSet) => {
                self.get_typed::<StatefulSet>(name, namespace).await
            }
            ApiKind::ReplicaSet => self.get_typed::<ReplicaSet>(name, namespace).await,
            ApiKind::Pod => self.get_typed::<Pod>(name, namespace).await,
        }
    }

    async fn create(&self, namespace: &str, payload: &ResourcePayload) -> Result<(), KubeError> {
        match payload {
            ResourcePayload::Deployment(r) => self.create_typed(namespace, r).await,
            ResourcePayload::Service(r) => self.create_typed(namespace, r).await,
            ResourcePayload::Job(r) => self.create_typed(namespace, r).await,
            ResourcePayload::PersistentVolumeClaim(r) => self.create_typed(namespace, r).await,
            ResourcePayload::ConfigMap(r) => self.create_typed(namespace, r).await,
            ResourcePayload::PetSet(r) => self.create_typed(namespace, r).await,
        }
    }

    async fn delete(
        &self,
        kind: ApiKind,
        name: &str,
        namespace: &str,
        policy: DeletePolicy,
    ) -> Result<(), KubeError> {
        let dp = delete_params(policy);

        match kind {
            ApiKind::Resource(ResourceKind::Deployment) => {
                self.delete_typed::<Deployment>(name, namespace, &dp).await
            }
            ApiKind::Resource(ResourceKind::Service) => {
                self.delete_typed::<Service>(name, namespace, &dp).await
            }
            ApiKind::Resource(ResourceKind::Job) => {
                self.delete_typed::<Job>(name, namespace, &dp).await
            }
            ApiKind::Resource(ResourceKind::PersistentVolumeClaim) => {
                self.delete_typed::<PersistentVolumeClaim>(name, namespace, &dp)
                    .await
            }
            ApiKind::Resource(ResourceKind::ConfigMap) => {
                self.delete_typed::<ConfigMap>(name, namespace, &dp).await
            }
            ApiKind::Resource(ResourceKind::PetSet) => {
                self.delete_typed::<StatefulSet>(name, namespace, &dp).await
            }
            ApiKind::ReplicaSet => self.delete_typed::<ReplicaSet>(name, namespace, &dp).await,
            ApiKind::Pod => self.delete_typed::<Pod>(name, namespace, &dp).await,
        }
    }

    async fn list_names(
        &self,
        kind: ApiKind,
        label_selector: &str,
        namespace: &str,
    ) -> Result<Vec<String>, KubeError> {
        match kind {
            ApiKind::Resource(ResourceKind::Deployment) => {
                self.list_names_typed::<Deployment>(label_selector, namespace)
                    .await
            }
            ApiKind::Resource(ResourceKind::Service) => {
                self.list_names_typed::<Service>(label_selector, namespace)
                    .await
            }
            ApiKind::Resource(ResourceKind::Job) => {
                self.list_names_typed::<Job>(label_selector, namespace).await
            }
            ApiKind::Resource(ResourceKind::PersistentVolumeClaim) => {
                self.list_names_typed::<PersistentVolumeClaim>(label_selector, namespace)
                    .await
            }
            ApiKind::Resource(ResourceKind::ConfigMap) => {
                self.list_names_typed::<ConfigMap>(label_selector, namespace)
                    .await
            }
            ApiKind::Resource(ResourceKind::PetSet) => {
                self.list_names_typed::<StatefulSet>(label_selector, namespace)
                    .await
            }
            ApiKind::ReplicaSet => {
                self.list_names_typed::<ReplicaSet>(label_selector, namespace)
                    .await
            }
            ApiKind::Pod => self.list_names_typed::<Pod>(label_selector, namespace).await,
        }
    }

    async fn get_namespace(&self, name: &str) -> Result<(), KubeError> {
        let api: Api<Namespace> = Api::all(self.client.clone());

        api.get(name).await?;
        Ok(())
    }

    async fn create_namespace(&self, name: &str) -> Result<(), KubeError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let pp = PostParams::default();

        let namespace = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        api.create(&pp, &namespace).await?;
        Ok(())
    }
}
