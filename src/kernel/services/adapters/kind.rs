use crate::kernel::services::ports::{ClusterProvisioner, Result, SupportedVersion};

use super::process;

/// Provisions the training cluster through the `kind` CLI.
pub struct KindProvisioner {
    program: String,
    cluster_name: String,
}

impl KindProvisioner {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self::with_program("kind", cluster_name)
    }

    pub fn with_program(program: impl Into<String>, cluster_name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cluster_name: cluster_name.into(),
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn cluster_exists(&self) -> Result<bool> {
        let clusters = process::run(&self.program, &["get", "clusters"], None)?;
        Ok(clusters.lines().any(|line| line.trim() == self.cluster_name))
    }
}

impl ClusterProvisioner for KindProvisioner {
    fn ensure_cluster(&self, version: &SupportedVersion) -> Result<String> {
        if self.cluster_exists()? {
            tracing::info!(cluster = %self.cluster_name, "reusing existing cluster");
        } else {
            tracing::info!(
                cluster = %self.cluster_name,
                image = %version.node_image,
                "creating cluster"
            );
            process::run(
                &self.program,
                &[
                    "create",
                    "cluster",
                    "--name",
                    &self.cluster_name,
                    "--image",
                    &version.node_image,
                ],
                None,
            )?;
        }

        process::run(
            &self.program,
            &["get", "kubeconfig", "--name", &self.cluster_name],
            None,
        )
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/kind.rs"]
mod tests;
