//! Node label lookup against the cluster inventory (Kubernetes API).

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use tracing::{debug, info};

use crate::error::{MetaError, MetaResult};

/// Read-only access to node labels.
#[async_trait]
pub trait NodeLabels: Send + Sync {
    /// Labels of the node called `name`; empty when the node has none.
    async fn labels(&self, name: &str) -> MetaResult<BTreeMap<String, String>>;
}

/// Build a Kubernetes client from `kubeconfig`, or from the in-cluster
/// service account when no path is given.
pub async fn connect(kubeconfig: Option<&Path>) -> MetaResult<Client> {
    let config = match kubeconfig {
        Some(path) => {
            debug!(path = %path.display(), "loading kubeconfig");
            let kubeconfig = Kubeconfig::read_from(path)
                .map_err(|e| MetaError::Config(format!("read {}: {e}", path.display())))?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|e| MetaError::Config(format!("load {}: {e}", path.display())))?
        }
        None => {
            debug!("using in-cluster config");
            Config::incluster().map_err(|e| MetaError::Config(format!("in-cluster: {e}")))?
        }
    };

    info!(cluster_url = %config.cluster_url, "kubernetes client initialized");

    Client::try_from(config).map_err(|e| MetaError::Client(format!("kubernetes: {e}")))
}

/// [`NodeLabels`] backed by `GET /api/v1/nodes/{name}`.
#[derive(Clone)]
pub struct KubeNodes {
    api: Api<Node>,
}

impl KubeNodes {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

#[async_trait]
impl NodeLabels for KubeNodes {
    async fn labels(&self, name: &str) -> MetaResult<BTreeMap<String, String>> {
        let node = self.api.get(name).await.map_err(|e| MetaError::NodeLookup {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(node.metadata.labels.unwrap_or_default())
    }
}
