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

use super::kind::ResourceKind;
use crate::shared::error::KubeError;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Service};

/// Typed create request, one variant per supported kind.
///
/// `PetSet` carries an `apps/v1` StatefulSet, the API that replaced PetSet.
#[derive(Debug, Clone)]
pub enum ResourcePayload {
    Deployment(Deployment),
    Service(Service),
    Job(Job),
    PersistentVolumeClaim(PersistentVolumeClaim),
    ConfigMap(ConfigMap),
    PetSet(StatefulSet),
}

impl ResourcePayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePayload::Deployment(_) => ResourceKind::Deployment,
            ResourcePayload::Service(_) => ResourceKind::Service,
            ResourcePayload::Job(_) => ResourceKind::Job,
            ResourcePayload::PersistentVolumeClaim(_) => ResourceKind::PersistentVolumeClaim,
            ResourcePayload::ConfigMap(_) => ResourceKind::ConfigMap,
            ResourcePayload::PetSet(_) => ResourceKind::PetSet,
        }
    }

    pub fn name(&self) -> Option<&str> {
        let metadata = match self {
            ResourcePayload::Deployment(r) => &r.metadata,
            ResourcePayload::Service(r) => &r.metadata,
            ResourcePayload::Job(r) => &r.metadata,
            ResourcePayload::PersistentVolumeClaim(r) => &r.metadata,
            ResourcePayload::ConfigMap(r) => &r.metadata,
            ResourcePayload::PetSet(r) => &r.metadata,
        };
        metadata.name.as_deref()
    }

    /// Deserialize a full manifest document into the typed object for `kind`.
    pub fn from_yaml(kind: ResourceKind, data: &[u8]) -> Result<Self, KubeError> {
        let value: serde_yaml::Value = serde_yaml::from_slice(data)?;
        Self::from_value(kind, value)
    }

    /// Same as `from_yaml` for a document that is already parsed.
    ///
    /// `kind` and `apiVersion` are dropped before decoding: k8s-openapi
    /// rejects any spelling other than its own (`Deployment`, `apps/v1`)
    /// and re-emits both when the object is serialized.
    pub fn from_value(kind: ResourceKind, mut value: serde_yaml::Value) -> Result<Self, KubeError> {
        if let Some(mapping) = value.as_mapping_mut() {
            mapping.remove("kind");
            mapping.remove("apiVersion");
        }

        let payload = match kind {
            ResourceKind::Deployment => ResourcePayload::Deployment(serde_yaml::from_value(value)?),
            ResourceKind::Service => ResourcePayload::Service(serde_yaml::from_value(value)?),
            ResourceKind::Job => ResourcePayload::Job(serde_yaml::from_value(value)?),
            ResourceKind::PersistentVolumeClaim => {
                ResourcePayload::PersistentVolumeClaim(serde_yaml::from_value(value)?)
            }
            ResourceKind::ConfigMap => ResourcePayload::ConfigMap(serde_yaml::from_value(value)?),
            ResourceKind::PetSet => ResourcePayload::PetSet(serde_yaml::from_value(value)?),
        };
        Ok(payload)
    }

    /// Fails with `PayloadMismatch` when the variant does not belong to `expected`.
    pub fn ensure_kind(&self, expected: ResourceKind) -> Result<(), KubeError> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(KubeError::PayloadMismatch {
                expected: expected.to_string(),
                found: self.kind().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    #[test]
    fn test_configmap_from_yaml_keeps_data() {
        let manifest = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\n  namespace: prod\ndata:\n  LOG_LEVEL: debug\n";

        let payload = ResourcePayload::from_yaml(ResourceKind::ConfigMap, manifest).unwrap();
        assert_eq!(payload.kind(), ResourceKind::ConfigMap);
        assert_eq!(payload.name(), Some("settings"));

        match payload {
            ResourcePayload::ConfigMap(cm) => {
                let data = cm.data.unwrap();
                assert_eq!(data.get("LOG_LEVEL").map(String::as_str), Some("debug"));
            }
            other => panic!("unexpected payload: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_job_from_value() {
        let value: serde_yaml::Value = serde_yaml::from_str(
            "apiVersion: batch/v1\nkind: Job\nmetadata:\n  name: batch-1\nspec:\n  backoffLimit: 2\n  template:\n    spec:\n      restartPolicy: Never\n      containers:\n      - name: main\n        image: busybox\n",
        )
        .unwrap();

        match ResourcePayload::from_value(ResourceKind::Job, value).unwrap() {
            ResourcePayload::Job(job) => {
                assert_eq!(job.metadata.name.as_deref(), Some("batch-1"));
                assert_eq!(job.spec.and_then(|s| s.backoff_limit), Some(2));
            }
            other => panic!("unexpected payload: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_lowercase_kind_tag_decodes() {
        let manifest = b"apiVersion: extensions/v1beta1\nkind: deployment\nmetadata:\n  name: web\nspec:\n  replicas: 2\n  selector:\n    matchLabels:\n      name: web\n  template:\n    metadata:\n      labels:\n        name: web\n";

        match ResourcePayload::from_yaml(ResourceKind::Deployment, manifest).unwrap() {
            ResourcePayload::Deployment(deployment) => {
                assert_eq!(deployment.metadata.name.as_deref(), Some("web"));
                assert_eq!(deployment.spec.and_then(|s| s.replicas), Some(2));
            }
            other => panic!("unexpected payload: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_from_yaml_rejects_malformed_body() {
        let result = ResourcePayload::from_yaml(ResourceKind::Service, b"spec: [unterminated");
        assert!(matches!(result, Err(KubeError::DecodeError(_))));
    }

    #[test]
    fn test_ensure_kind_mismatch() {
        let payload = ResourcePayload::Service(Service {
            metadata: ObjectMeta {
                name: Some("api".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(payload.ensure_kind(ResourceKind::Service).is_ok());
        match payload.ensure_kind(ResourceKind::Deployment) {
            Err(KubeError::PayloadMismatch { expected, found }) => {
                assert_eq!(expected, "deployment");
                assert_eq!(found, "service");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
