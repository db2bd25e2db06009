//! Manifest-driven commands

use super::commands::GlobalOptions;
use super::display::{ResourceStatus, TableRenderer};
use crate::domain::config::AppSettings;
use crate::domain::resource::{
    descriptor_from_value, split_documents, ResourceKind, ResourcePayload,
};
use crate::infrastructure::kubernetes::{load_client, KubeClusterApi};
use crate::ResourceDispatcher;
use anyhow::Context;
use clap::Parser;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
pub struct DeployCommand {
    /// Manifest files (YAML, may contain several documents)
    #[arg(long = "filename", short = 'f', required = true)]
    pub files: Vec<PathBuf>,

    /// Namespace for manifests that do not set metadata.namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DestroyCommand {
    #[arg(long = "filename", short = 'f', required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusCommand {
    #[arg(long = "filename", short = 'f', required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One document from a manifest file, resolved and ready to dispatch.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    pub source: PathBuf,
    pub kind: ResourceKind,
    pub name: String,
    pub namespace: String,
    pub body: serde_yaml::Value,
}

pub fn load_documents(
    files: &[PathBuf],
    default_namespace: &str,
) -> anyhow::Result<Vec<ManifestDocument>> {
    let mut documents = Vec::new();

    for file in files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read manifest {}", file.display()))?;

        let bodies = split_documents(&text)
            .with_context(|| format!("Invalid YAML in {}", file.display()))?;
        for body in bodies {
            documents.push(resolve_document(file, body, default_namespace)?);
        }
    }

    Ok(documents)
}

fn resolve_document(
    source: &Path,
    body: serde_yaml::Value,
    default_namespace: &str,
) -> anyhow::Result<ManifestDocument> {
    let descriptor = descriptor_from_value(&body)
        .with_context(|| format!("Invalid manifest in {}", source.display()))?;
    let kind = descriptor
        .resource_kind()
        .with_context(|| format!("Invalid manifest in {}", source.display()))?;

    if descriptor.name().is_empty() {
        anyhow::bail!(
            "Manifest in {} has no metadata.name ({})",
            source.display(),
            descriptor.kind
        );
    }

    let namespace = if descriptor.namespace().is_empty() {
        default_namespace.to_string()
    } else {
        descriptor.namespace().to_string()
    };

    Ok(ManifestDocument {
        source: source.to_path_buf(),
        kind,
        name: descriptor.name().to_string(),
        namespace,
        body,
    })
}

async fn connect(global: &GlobalOptions) -> anyhow::Result<(ResourceDispatcher, AppSettings)> {
    let settings = match global.config.as_deref() {
        Some(path) => AppSettings::from_file(path)?,
        None => AppSettings::default(),
    };

    let connect_config =
        settings.connect_config(global.kubeconfig.as_deref(), global.context.as_deref());
    let client = load_client(&connect_config)
        .await
        .context("Failed to connect to Kubernetes")?;

    let dispatcher = ResourceDispatcher::new(Arc::new(KubeClusterApi::new(client)));
    Ok((dispatcher, settings))
}

impl DeployCommand {
    pub async fn execute(&self, global: &GlobalOptions) -> anyhow::Result<()> {
        let (dispatcher, settings) = connect(global).await?;
        let default_namespace = settings.default_namespace(self.namespace.as_deref());
        let documents = load_documents(&self.files, &default_namespace)?;

        let mut ensured: HashSet<String> = HashSet::new();
        for doc in &documents {
            if ensured.insert(doc.namespace.clone()) {
                dispatcher
                    .ensure_namespace(&doc.namespace)
                    .await
                    .with_context(|| format!("Failed to ensure namespace {}", doc.namespace))?;
            }

            let kind = doc.kind.as_str();
            if dispatcher.exists(kind, &doc.name, &doc.namespace).await? {
                println!("- {} {}/{} already exists, skipped", kind, doc.namespace, doc.name);
                continue;
            }

            let payload = ResourcePayload::from_value(doc.kind, doc.body.clone())
                .with_context(|| format!("Invalid {} manifest in {}", kind, doc.source.display()))?;
            dispatcher
                .create(kind, &doc.namespace, &payload)
                .await
                .with_context(|| format!("Failed to create {} {}", kind, doc.name))?;

            println!("✓ {} {}/{} created", kind, doc.namespace, doc.name);
        }

        Ok(())
    }
}

impl DestroyCommand {
    pub async fn execute(&self, global: &GlobalOptions) -> anyhow::Result<()> {
        let (dispatcher, settings) = connect(global).await?;
        let default_namespace = settings.default_namespace(self.namespace.as_deref());
        let documents = load_documents(&self.files, &default_namespace)?;

        for doc in &documents {
            let kind = doc.kind.as_str();
            dispatcher
                .destroy(kind, &doc.name, &doc.namespace)
                .await
                .with_context(|| format!("Failed to delete {} {}", kind, doc.name))?;

            println!("✓ {} {}/{} deleted", kind, doc.namespace, doc.name);
        }

        Ok(())
    }
}

impl StatusCommand {
    pub async fn execute(&self, global: &GlobalOptions) -> anyhow::Result<()> {
        let (dispatcher, settings) = connect(global).await?;
        let default_namespace = settings.default_namespace(self.namespace.as_deref());
        let documents = load_documents(&self.files, &default_namespace)?;

        let mut statuses = Vec::with_capacity(documents.len());
        for doc in &documents {
            let kind = doc.kind.as_str();
            let exists = dispatcher.exists(kind, &doc.name, &doc.namespace).await?;
            statuses.push(ResourceStatus {
                kind: kind.to_string(),
                name: doc.name.clone(),
                namespace: doc.namespace.clone(),
                exists,
            });
        }

        let output = if self.json {
            serde_json::to_string_pretty(&statuses)?
        } else {
            TableRenderer::new().render_statuses(&statuses)
        };
        println!("{}", output);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_documents_applies_default_namespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "kind: ConfigMap\nmetadata:\n  name: settings\n---\nkind: service\nmetadata:\n  name: api\n  namespace: prod\n"
        )
        .unwrap();

        let documents = load_documents(&[file.path().to_path_buf()], "staging").unwrap();
        assert_eq!(documents.len(), 2);

        assert_eq!(documents[0].kind, ResourceKind::ConfigMap);
        assert_eq!(documents[0].namespace, "staging");
        assert_eq!(documents[1].kind, ResourceKind::Service);
        assert_eq!(documents[1].namespace, "prod");
    }

    #[test]
    fn test_load_documents_flow_style_on_marker_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "--- {{kind: service, metadata: {{name: api, namespace: prod}}}}\n--- {{kind: job, metadata: {{name: batch-1}}}}\n"
        )
        .unwrap();

        let documents = load_documents(&[file.path().to_path_buf()], "default").unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].name, "api");
        assert_eq!(documents[1].kind, ResourceKind::Job);
        assert_eq!(documents[1].namespace, "default");
    }

    #[test]
    fn test_load_documents_rejects_unsupported_kind() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "kind: Ingress\nmetadata:\n  name: edge\n").unwrap();

        let err = load_documents(&[file.path().to_path_buf()], "default").unwrap_err();
        assert!(format!("{:#}", err).contains("Unsupported resource kind: Ingress"));
    }

    #[test]
    fn test_load_documents_requires_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "kind: job\nmetadata:\n  namespace: prod\n").unwrap();

        assert!(load_documents(&[file.path().to_path_buf()], "default").is_err());
    }
}
