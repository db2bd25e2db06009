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

use crate::domain::config::KubeConnectConfig;
use crate::shared::error::KubeError;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;

/// Build a client from kubeconfig.
///
/// An explicit file replaces default discovery (`KUBECONFIG`, then
/// `~/.kube/config`); an explicit context replaces the current-context.
/// When discovery finds no kubeconfig and no context was asked for, the
/// pod's service account is used instead.
pub async fn load_client(config: &KubeConnectConfig) -> Result<Client, KubeError> {
    let kube_config = resolve_config(config).await?;

    Client::try_from(kube_config).map_err(|e| {
        KubeError::config_error(format!("Failed to create Kubernetes client: {}", e))
    })
}

async fn resolve_config(config: &KubeConnectConfig) -> Result<kube::Config, KubeError> {
    let kubeconfig = if let Some(path) = config.config_file.as_ref() {
        tracing::debug!(path = %path.display(), "reading explicit kubeconfig");
        Kubeconfig::read_from(path)
            .map_err(|e| KubeError::config_error(format!("Failed to load kubeconfig: {}", e)))?
    } else {
        match Kubeconfig::read() {
            Ok(kubeconfig) => kubeconfig,
            Err(e) if may_use_incluster(config) => {
                tracing::debug!(error = %e, "no kubeconfig found, trying in-cluster config");
                return kube::Config::incluster().map_err(|ie| {
                    KubeError::config_error(format!(
                        "Failed to load kubeconfig: {}; in-cluster config unavailable: {}",
                        e, ie
                    ))
                });
            }
            Err(e) => {
                return Err(KubeError::config_error(format!(
                    "Failed to load kubeconfig: {}",
                    e
                )))
            }
        }
    };

    let config_options = KubeConfigOptions {
        context: config.context.clone(),
        cluster: None,
        user: None,
    };

    kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
        .await
        .map_err(|e| KubeError::config_error(format!("Failed to create Kubernetes config: {}", e)))
}

/// Only plain default discovery may fall back to the service account.
fn may_use_incluster(config: &KubeConnectConfig) -> bool {
    config.config_file.is_none() && config.context.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const KUBECONFIG: &str = r#"apiVersion: v1
kind: Config
clusters:
- name: local
  cluster:
    server: https://127.0.0.1:6443
    insecure-skip-tls-verify: true
contexts:
- name: dev
  context:
    cluster: local
    user: admin
current-context: dev
users:
- name: admin
  user:
    token: abc123
"#;

    #[tokio::test]
    async fn test_missing_explicit_file_is_config_error() {
        let config = KubeConnectConfig {
            config_file: Some("/nonexistent/kubeconfig".into()),
            context: None,
        };

        match load_client(&config).await {
            Err(KubeError::ConfigError(message)) => {
                assert!(message.starts_with("Failed to load kubeconfig"));
                assert!(!message.contains("in-cluster"));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_incluster_only_for_plain_discovery() {
        assert!(may_use_incluster(&KubeConnectConfig::default()));
        assert!(!may_use_incluster(&KubeConnectConfig {
            config_file: Some("/etc/kube/config".into()),
            context: None,
        }));
        assert!(!may_use_incluster(&KubeConnectConfig {
            config_file: None,
            context: Some("prod".to_string()),
        }));
    }

    #[tokio::test]
    async fn test_unknown_context_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();

        let config = KubeConnectConfig {
            config_file: Some(file.path().to_path_buf()),
            context: Some("missing".to_string()),
        };

        let result = load_client(&config).await;
        assert!(matches!(result, Err(KubeError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_explicit_file_and_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();

        let config = KubeConnectConfig {
            config_file: Some(file.path().to_path_buf()),
            context: Some("dev".to_string()),
        };

        assert!(load_client(&config).await.is_ok());
    }
}
