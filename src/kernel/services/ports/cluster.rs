use super::Result;

/// A Kubernetes release together with the kind node image that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedVersion {
    pub version: String,
    pub node_image: String,
    pub is_latest: bool,
}

impl SupportedVersion {
    fn new(version: &str, is_latest: bool) -> Self {
        Self {
            version: version.to_string(),
            node_image: format!("kindest/node:{version}"),
            is_latest,
        }
    }

    pub fn label(&self) -> String {
        if self.is_latest {
            format!("{} (Latest)", self.version)
        } else {
            self.version.clone()
        }
    }
}

/// Latest GA first, then N-1.
pub fn supported_versions() -> Vec<SupportedVersion> {
    vec![
        SupportedVersion::new("v1.32.0", true),
        SupportedVersion::new("v1.31.4", false),
    ]
}

pub trait ClusterProvisioner: Send + Sync {
    /// Creates the training cluster if missing and returns its kubeconfig contents.
    fn ensure_cluster(&self, version: &SupportedVersion) -> Result<String>;
}
