use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Resource category a zombie was flagged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZombieKind {
    #[serde(rename = "PVC")]
    PersistentVolumeClaim,
    #[serde(rename = "Pod")]
    Workload,
    #[serde(rename = "Service/LB")]
    LoadBalancerService,
}

impl ZombieKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZombieKind::PersistentVolumeClaim => "PVC",
            ZombieKind::Workload => "Pod",
            ZombieKind::LoadBalancerService => "Service/LB",
        }
    }
}

impl fmt::Display for ZombieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One provisioned-but-unused resource, with its estimated monthly cost.
/// Carries no handle back to the live cluster object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zombie {
    pub kind: ZombieKind,
    pub name: String,
    pub namespace: String,
    pub reason: String,
    pub monthly_cost: f64,
    pub age_days: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ClaimRecord {
    pub name: String,
    pub namespace: String,
    /// Raw storage request quantity, e.g. "10Gi". Absent means no request.
    pub requested_storage: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct PodRecord {
    pub name: String,
    pub namespace: String,
    pub phase: Option<String>,
    /// True when the API object carries a deletion timestamp.
    pub deletion_requested: bool,
    /// Waiting-state reason of every container currently waiting.
    pub waiting_reasons: Vec<String>,
    /// Claim names referenced by the pod's persistent-volume-claim volumes.
    pub claim_names: Vec<String>,
    pub containers: Vec<ContainerRequests>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw resource request quantities of a single container.
#[derive(Debug, Clone, Default)]
pub struct ContainerRequests {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceRecord {
    pub name: String,
    pub namespace: String,
    pub service_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
