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

use crate::domain::resource::{ApiKind, ResourceKind};
use crate::shared::error::KubeError;
use std::collections::HashMap;

/// Children that must be removed after their parent is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub child: ApiKind,
    pub selector_label: &'static str,
}

impl Cascade {
    pub fn selector(&self, parent_name: &str) -> String {
        format!("{}={}", self.selector_label, parent_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindHandler {
    pub kind: ResourceKind,
    pub cascade: Option<Cascade>,
}

impl KindHandler {
    pub fn api_kind(&self) -> ApiKind {
        ApiKind::Resource(self.kind)
    }
}

/// Maps kind tags to their handler; the only place kinds are registered.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    handlers: HashMap<&'static str, KindHandler>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KindRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
        };

        registry.register(ResourceKind::Deployment, Some(Cascade {
            child: ApiKind::ReplicaSet,
            selector_label: "name",
        }));
        registry.register(ResourceKind::Service, None);
        registry.register(ResourceKind::Job, Some(Cascade {
            child: ApiKind::Pod,
            selector_label: "job-name",
        }));
        registry.register(ResourceKind::PersistentVolumeClaim, None);
        registry.register(ResourceKind::ConfigMap, None);
        registry.register(ResourceKind::PetSet, None);

        registry
    }

    fn register(&mut self, kind: ResourceKind, cascade: Option<Cascade>) {
        self.handlers
            .insert(kind.as_str(), KindHandler { kind, cascade });
    }

    pub fn lookup(&self, kind: &str) -> Result<&KindHandler, KubeError> {
        self.handlers
            .get(kind)
            .ok_or_else(|| KubeError::unsupported(kind))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_kind() {
        let registry = KindRegistry::new();
        assert_eq!(registry.len(), ResourceKind::ALL.len());

        for kind in ResourceKind::ALL {
            assert_eq!(registry.lookup(kind.as_str()).unwrap().kind, kind);
        }
    }

    #[test]
    fn test_cascade_selectors() {
        let registry = KindRegistry::new();

        let deployment = registry.lookup("deployment").unwrap().cascade.unwrap();
        assert_eq!(deployment.child, ApiKind::ReplicaSet);
        assert_eq!(deployment.selector("web"), "name=web");

        let job = registry.lookup("job").unwrap().cascade.unwrap();
        assert_eq!(job.child, ApiKind::Pod);
        assert_eq!(job.selector("batch-1"), "job-name=batch-1");

        assert!(registry.lookup("service").unwrap().cascade.is_none());
        assert!(registry.lookup("petset").unwrap().cascade.is_none());
    }

    #[test]
    fn test_lookup_unknown_kind() {
        let registry = KindRegistry::new();
        assert!(matches!(
            registry.lookup("replicaset"),
            Err(KubeError::UnsupportedResource(k)) if k == "replicaset"
        ));
    }
}
