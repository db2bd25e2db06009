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

use crate::shared::error::KubeError;
use std::fmt;

/// Resource kinds a manifest may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Service,
    Job,
    PersistentVolumeClaim,
    ConfigMap,
    PetSet,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Deployment,
        ResourceKind::Service,
        ResourceKind::Job,
        ResourceKind::PersistentVolumeClaim,
        ResourceKind::ConfigMap,
        ResourceKind::PetSet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployment",
            ResourceKind::Service => "service",
            ResourceKind::Job => "job",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaim",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::PetSet => "petset",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = KubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| KubeError::unsupported(s))
    }
}

/// Every kind the cluster adapter can address, including the children
/// reached only through cascade deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKind {
    Resource(ResourceKind),
    ReplicaSet,
    Pod,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::Resource(kind) => kind.as_str(),
            ApiKind::ReplicaSet => "replicaset",
            ApiKind::Pod => "pod",
        }
    }
}

impl From<ResourceKind> for ApiKind {
    fn from(kind: ResourceKind) -> Self {
        ApiKind::Resource(kind)
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
