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

//! Manifest decoding: just enough structure to route a document.

use super::kind::ResourceKind;
use super::payload::ResourcePayload;
use crate::shared::error::KubeError;
use serde::Deserialize;

/// Kind, name and namespace of a manifest. Missing fields decode to "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: DescriptorMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DescriptorMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

impl ResourceDescriptor {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    /// Resolve the kind tag, accepting API casing such as `ConfigMap`.
    pub fn resource_kind(&self) -> Result<ResourceKind, KubeError> {
        self.kind
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| KubeError::unsupported(self.kind.clone()))
    }
}

pub fn decode_descriptor(data: &[u8]) -> Result<ResourceDescriptor, KubeError> {
    Ok(serde_yaml::from_slice(data)?)
}

pub fn decode_payload(kind: &str, data: &[u8]) -> Result<ResourcePayload, KubeError> {
    let kind: ResourceKind = kind.parse()?;
    ResourcePayload::from_yaml(kind, data)
}

/// Descriptor of an already parsed document.
pub fn descriptor_from_value(value: &serde_yaml::Value) -> Result<ResourceDescriptor, KubeError> {
    Ok(ResourceDescriptor::deserialize(value)?)
}

/// Split a multi-document YAML stream into parsed documents, skipping
/// empty ones.
pub fn split_documents(text: &str) -> Result<Vec<serde_yaml::Value>, KubeError> {
    let mut documents = Vec::new();

    for doc in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(doc)?;
        if value.is_null() {
            continue;
        }
        documents.push(value);
    }

    Ok(documents)
}
