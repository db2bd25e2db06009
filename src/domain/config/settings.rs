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
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where to find the cluster: kubeconfig file and context.
///
/// `None` means "use the default": discovered kubeconfig, current-context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KubeConnectConfig {
    pub config_file: Option<PathBuf>,
    pub context: Option<String>,
}

/// Contents of the optional TOML settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub kubernetes: KubernetesSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KubernetesSettings {
    pub config_file: Option<String>,
    pub context: Option<String>,
    pub namespace: Option<String>,
}

impl AppSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KubeError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            KubeError::config_error(format!(
                "Failed to read settings file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, KubeError> {
        Ok(toml::from_str(content)?)
    }

    /// Merge command line values over the file; flags win when non-empty.
    pub fn connect_config(
        &self,
        kubeconfig_flag: Option<&str>,
        context_flag: Option<&str>,
    ) -> KubeConnectConfig {
        let config_file = non_empty(kubeconfig_flag)
            .or_else(|| non_empty(self.kubernetes.config_file.as_deref()))
            .map(PathBuf::from);
        let context =
            non_empty(context_flag).or_else(|| non_empty(self.kubernetes.context.as_deref()));

        KubeConnectConfig {
            config_file,
            context,
        }
    }

    /// Namespace for manifests that do not name one.
    pub fn default_namespace(&self, namespace_flag: Option<&str>) -> String {
        non_empty(namespace_flag)
            .or_else(|| non_empty(self.kubernetes.namespace.as_deref()))
            .unwrap_or_else(|| "default".to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
