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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, KubeError>;

#[derive(Error, Debug)]
pub enum KubeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest decode error: {0}")]
    DecodeError(#[from] serde_yaml::Error),

    #[error("Unsupported resource kind: {0}")]
    UnsupportedResource(String),

    #[error("Payload mismatch: kind '{expected}' cannot be created from a '{found}' payload")]
    PayloadMismatch { expected: String, found: String },

    #[error("Kubernetes API error ({code} {reason}): {message}")]
    ApiError {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("Kubernetes client error: {0}")]
    ClientError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Coarse classification used by callers that need to tell absence from failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Transient,
    Fatal,
}

impl From<kube::Error> for KubeError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ae) => KubeError::ApiError {
                code: ae.code,
                reason: ae.reason,
                message: ae.message,
            },
            other => KubeError::ClientError(other.to_string()),
        }
    }
}

impl KubeError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedResource(kind.into())
    }

    pub fn api(code: u16, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            reason: reason.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            KubeError::ApiError { code: 404, .. } => ErrorKind::NotFound,
            KubeError::ApiError { code, .. } if *code == 429 || *code >= 500 => {
                ErrorKind::Transient
            }
            KubeError::ClientError(_) => ErrorKind::Transient,
            _ => ErrorKind::Fatal,
        }
    }

    /// True only for a structured API status carrying HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_requires_status_404() {
        assert!(KubeError::api(404, "NotFound", "deployments \"web\" not found").is_not_found());
        assert!(!KubeError::api(403, "Forbidden", "denied").is_not_found());
        assert!(!KubeError::ClientError("404 page not found".to_string()).is_not_found());
        assert!(!KubeError::unsupported("pod").is_not_found());
    }

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(KubeError::api(500, "InternalError", "boom").kind(), ErrorKind::Transient);
        assert_eq!(KubeError::api(429, "TooManyRequests", "slow down").kind(), ErrorKind::Transient);
        assert_eq!(KubeError::api(409, "AlreadyExists", "exists").kind(), ErrorKind::Fatal);
        assert_eq!(KubeError::ClientError("connection reset".to_string()).kind(), ErrorKind::Transient);
        assert_eq!(KubeError::config_error("no context").kind(), ErrorKind::Fatal);
    }

    #[test]
    fn test_kube_api_error_translation() {
        let err = kube::Error::Api(kube::core::ErrorResponse {
            status: "Failure".to_string(),
            message: "services \"api\" not found".to_string(),
            reason: "NotFound".to_string(),
            code: 404,
        });

        let translated = KubeError::from(err);
        assert!(translated.is_not_found());
        assert!(translated.to_string().contains("services \"api\" not found"));
    }
}
