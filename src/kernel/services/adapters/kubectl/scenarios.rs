//! Built-in fault scenarios: a manifest that breaks something and a probe that notices the fix.

use serde_json::Value;

use crate::kernel::services::ports::{CheckOutcome, Difficulty, ScenarioInfo};

/// How a scenario decides it is solved, given the JSON of one `kubectl get` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Some pod matching the selector is running with every container ready.
    PodsReady { selector: &'static str },
    /// Some pod matching the selector is running.
    PodRunning { selector: &'static str },
    ServiceEndpoints { service: &'static str },
    ServiceTargetPort { service: &'static str, port: i64 },
    PvcBound { claim: &'static str },
    DeploymentAvailable { deployment: &'static str },
}

impl Probe {
    /// Arguments following `kubectl get`.
    pub fn query(&self) -> Vec<&'static str> {
        match *self {
            Probe::PodsReady { selector } | Probe::PodRunning { selector } => {
                vec!["pods", "-l", selector]
            }
            Probe::ServiceEndpoints { service } => vec!["endpoints", service],
            Probe::ServiceTargetPort { service, .. } => vec!["service", service],
            Probe::PvcBound { claim } => vec!["pvc", claim],
            Probe::DeploymentAvailable { deployment } => vec!["deployment", deployment],
        }
    }

    pub fn evaluate(&self, doc: &Value, solved: &str) -> CheckOutcome {
        match *self {
            Probe::PodsReady { .. } => pods_ready(doc, solved),
            Probe::PodRunning { .. } => {
                if items(doc).iter().any(pod_running) {
                    CheckOutcome::solved(solved)
                } else {
                    CheckOutcome::unsolved("Pod is not running yet.")
                }
            }
            Probe::ServiceEndpoints { .. } => {
                let has_address = doc["subsets"][0]["addresses"]
                    .as_array()
                    .is_some_and(|addresses| !addresses.is_empty());
                if has_address {
                    CheckOutcome::solved(solved)
                } else {
                    CheckOutcome::unsolved("Service has no endpoints.")
                }
            }
            Probe::ServiceTargetPort { port, .. } => {
                let target = &doc["spec"]["ports"][0]["targetPort"];
                let matches = target.as_i64() == Some(port)
                    || target.as_str() == Some(port.to_string().as_str());
                if matches {
                    CheckOutcome::solved(solved)
                } else {
                    CheckOutcome::unsolved("Service targetPort is still incorrect.")
                }
            }
            Probe::PvcBound { .. } => {
                if doc["status"]["phase"].as_str() == Some("Bound") {
                    CheckOutcome::solved(solved)
                } else {
                    CheckOutcome::unsolved("PVC is still Pending.")
                }
            }
            Probe::DeploymentAvailable { .. } => {
                if doc["status"]["availableReplicas"].as_i64().unwrap_or(0) > 0 {
                    CheckOutcome::solved(solved)
                } else {
                    CheckOutcome::unsolved("Deployment has 0 available replicas.")
                }
            }
        }
    }
}

fn items(doc: &Value) -> &[Value] {
    doc["items"].as_array().map_or(&[], Vec::as_slice)
}

fn pod_running(pod: &Value) -> bool {
    pod["status"]["phase"].as_str() == Some("Running")
}

fn container_statuses(pod: &Value) -> &[Value] {
    pod["status"]["containerStatuses"]
        .as_array()
        .map_or(&[], Vec::as_slice)
}

fn pods_ready(doc: &Value, solved: &str) -> CheckOutcome {
    let pods = items(doc);
    if pods.is_empty() {
        return CheckOutcome::unsolved("No pods found. Deployment may have been deleted.");
    }

    let ready = pods.iter().any(|pod| {
        pod_running(pod)
            && container_statuses(pod)
                .iter()
                .all(|status| status["ready"].as_bool() == Some(true))
    });
    if ready {
        return CheckOutcome::solved(solved);
    }

    let stuck = pods
        .iter()
        .flat_map(container_statuses)
        .filter_map(|status| status["state"]["waiting"]["reason"].as_str())
        .find(|reason| matches!(*reason, "ImagePullBackOff" | "ErrImagePull"));
    match stuck {
        Some(reason) => {
            CheckOutcome::unsolved(format!("Pod is stuck in {reason}. Keep investigating!"))
        }
        None => CheckOutcome::unsolved("Pod is not yet running. Keep trying!"),
    }
}

pub struct ScenarioDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
    pub namespace: &'static str,
    pub hints: &'static [&'static str],
    /// Applied with `kubectl apply -f -`; creates the namespace first.
    pub manifest: &'static str,
    pub probe: Probe,
    pub solved_message: &'static str,
}

impl ScenarioDef {
    pub fn info(&self) -> ScenarioInfo {
        ScenarioInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            difficulty: self.difficulty,
            namespace: self.namespace.to_string(),
            hints: self.hints.iter().map(|h| h.to_string()).collect(),
        }
    }
}

pub fn find(id: &str) -> Option<&'static ScenarioDef> {
    SCENARIOS.iter().find(|def| def.id == id)
}

pub static SCENARIOS: &[ScenarioDef] = &[
    ScenarioDef {
        id: "net-service-selector",
        name: "Network 101: Service Discovery Failure",
        description: "A Service is deployed but cannot find its Pods. Fix the connection.",
        category: "Networking",
        difficulty: Difficulty::Easy,
        namespace: "net-service-selector",
        hints: &[
            "Check the Service selector and Pod labels",
            "Use `kubectl get endpoints`",
        ],
        manifest: r#"apiVersion: v1
kind: Namespace
metadata:
  name: net-service-selector
  labels:
    app.kubernetes.io/managed-by: k8s-dojo
---
apiVersion: v1
kind: Pod
metadata:
  name: web-pod
  namespace: net-service-selector
  labels:
    app: web
spec:
  containers:
    - name: nginx
      image: nginx:alpine
---
apiVersion: v1
kind: Service
metadata:
  name: web-service
  namespace: net-service-selector
spec:
  selector:
    app: web-server
  ports:
    - port: 80
"#,
        probe: Probe::ServiceEndpoints {
            service: "web-service",
        },
        solved_message: "Success! Service found the Pods.",
    },
    ScenarioDef {
        id: "net-target-port-mismatch",
        name: "Network: The Unreachable Port",
        description: "Service is refusing connections. Check the port mapping.",
        category: "Networking",
        difficulty: Difficulty::Easy,
        namespace: "net-target-port",
        hints: &[
            "Check the Service `targetPort`",
            "Check the Container `ports`",
            "They must match",
        ],
        manifest: r#"apiVersion: v1
kind: Namespace
metadata:
  name: net-target-port
  labels:
    app.kubernetes.io/managed-by: k8s-dojo
---
apiVersion: v1
kind: Pod
metadata:
  name: web-app
  namespace: net-target-port
  labels:
    app: web
spec:
  containers:
    - name: nginx
      image: nginx:alpine
      ports:
        - containerPort: 80
---
apiVersion: v1
kind: Service
metadata:
  name: web-service
  namespace: net-target-port
spec:
  selector:
    app: web
  ports:
    - port: 80
      targetPort: 8080
"#,
        probe: Probe::ServiceTargetPort {
            service: "web-service",
            port: 80,
        },
        solved_message: "Success! TargetPort matches container port.",
    },
    ScenarioDef {
        id: "image-pull-backoff",
        name: "Level 1: Image Pull Error",
        description: "The web-server Deployment is failing to start. Investigate and fix the issue.",
        category: "Lifecycle",
        difficulty: Difficulty::Easy,
        namespace: "dojo-level-1",
        hints: &[
            "Check the Pod status using: kubectl get pods -n dojo-level-1",
            "Look at the Pod events: kubectl describe pod -n dojo-level-1",
            "The image tag might be incorrect...",
        ],
        manifest: r#"apiVersion: v1
kind: Namespace
metadata:
  name: dojo-level-1
  labels:
    app.kubernetes.io/managed-by: k8s-dojo
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web-server
  namespace: dojo-level-1
spec:
  replicas: 1
  selector:
    matchLabels:
      app: web-server
  template:
    metadata:
      labels:
        app: web-server
    spec:
      containers:
        - name: nginx
          image: nginx:wrongtag
          ports:
            - containerPort: 80
"#,
        probe: Probe::PodsReady {
            selector: "app=web-server",
        },
        solved_message: "🎉 Congratulations! The web-server is now running!",
    },
    ScenarioDef {
        id: "crashloop-missing-config",
        name: "Lifecycle: The CrashLoop Mystery",
        description: "Pod is crash-looping. The logs mention a missing configuration.",
        category: "Lifecycle",
        difficulty: Difficulty::Easy,
        namespace: "life-crash-config",
        hints: &[
            "Use `kubectl logs`",
            "Check envFrom or volumeMounts",
            "The ConfigMap 'app-config' is missing",
        ],
        manifest: r#"apiVersion: v1
kind: Namespace
metadata:
  name: life-crash-config
  labels:
    app.kubernetes.io/managed-by: k8s-dojo
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: app
  namespace: life-crash-config
spec:
  replicas: 1
  selector:
    matchLabels:
      app: crash
  template:
    metadata:
      labels:
        app: crash
    spec:
      containers:
        - name: app
          image: busybox
          command:
            - sh
            - -c
            - "if [ ! -f /config/settings.properties ]; then echo 'CRITICAL: Config not found' && exit 1; fi; sleep 3600"
          volumeMounts:
            - name: config
              mountPath: /config
      volumes:
        - name: config
          configMap:
            name: app-config
"#,
        probe: Probe::PodRunning {
            selector: "app=crash",
        },
        solved_message: "Success! Application is running.",
    },
    ScenarioDef {
        id: "storage-pvc-pending",
        name: "Storage: PVC Stuck Pending",
        description: "A PersistentVolumeClaim is stuck in Pending state. The Pod is also pending.",
        category: "Storage",
        difficulty: Difficulty::Easy,
        namespace: "storage-pvc",
        hints: &[
            "Describe the PVC",
            "Check storageClassName",
            "The cluster uses 'standard' class",
        ],
        manifest: r#"apiVersion: v1
kind: Namespace
metadata:
  name: storage-pvc
  labels:
    app.kubernetes.io/managed-by: k8s-dojo
---
apiVersion: v1
kind: PersistentVolumeClaim
metadata:
  name: data-pvc
  namespace: storage-pvc
spec:
  storageClassName: premium-ssd
  accessModes:
    - ReadWriteOnce
  resources:
    requests:
      storage: 1Gi
---
apiVersion: v1
kind: Pod
metadata:
  name: db
  namespace: storage-pvc
spec:
  containers:
    - name: db
      image: postgres:alpine
      volumeMounts:
        - name: data
          mountPath: /var/lib/postgresql/data
  volumes:
    - name: data
      persistentVolumeClaim:
        claimName: data-pvc
"#,
        probe: Probe::PvcBound { claim: "data-pvc" },
        solved_message: "Success! PVC is Bound.",
    },
    ScenarioDef {
        id: "resource-quota-exceeded",
        name: "Resources: Quota Limit Reached",
        description: "Cannot create new Pod. Namespace quota exceeded.",
        category: "Resources",
        difficulty: Difficulty::Medium,
        namespace: "res-quota",
        hints: &[
            "Check `kubectl get resourcequota`",
            "Increase the quota or delete unused pods",
        ],
        manifest: r#"apiVersion: v1
kind: Namespace
metadata:
  name: res-quota
  labels:
    app.kubernetes.io/managed-by: k8s-dojo
---
apiVersion: v1
kind: ResourceQuota
metadata:
  name: compute-quota
  namespace: res-quota
spec:
  hard:
    pods: "1"
---
apiVersion: v1
kind: Pod
metadata:
  name: hog
  namespace: res-quota
spec:
  containers:
    - name: app
      image: nginx:alpine
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: blocked-dep
  namespace: res-quota
spec:
  replicas: 1
  selector:
    matchLabels:
      app: blocked
  template:
    metadata:
      labels:
        app: blocked
    spec:
      containers:
        - name: app
          image: nginx:alpine
"#,
        probe: Probe::DeploymentAvailable {
            deployment: "blocked-dep",
        },
        solved_message: "Success! Deployment has available replicas.",
    },
];

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/kubectl/scenarios.rs"]
mod tests;
