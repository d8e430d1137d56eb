use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::cluster::ResourceAccessor;
use crate::cost::CostModel;
use crate::parsing::{age_in_days, parse_size_to_gb};
use crate::types::{ClaimRecord, PodRecord, Zombie, ZombieKind};

pub const REASON_UNMOUNTED: &str = "not mounted by any workload";

/// Flag every persistent volume claim that no pod in scope mounts.
pub async fn scan_orphaned_claims<A: ResourceAccessor>(
    accessor: &A,
    namespace: Option<&str>,
    costs: &CostModel,
    now: DateTime<Utc>,
) -> Result<Vec<Zombie>> {
    let pods = accessor.list_pods(namespace).await?;
    let claims = accessor.list_claims(namespace).await?;

    Ok(find_orphaned_claims(&claims, &pods, costs, now))
}

pub fn find_orphaned_claims(
    claims: &[ClaimRecord],
    pods: &[PodRecord],
    costs: &CostModel,
    now: DateTime<Utc>,
) -> Vec<Zombie> {
    // Claims are namespaced, so a mount only counts when both namespace and
    // claim name match.
    let mounted: HashSet<(&str, &str)> = pods
        .iter()
        .flat_map(|pod| {
            pod.claim_names
                .iter()
                .map(move |claim| (pod.namespace.as_str(), claim.as_str()))
        })
        .collect();

    claims
        .iter()
        .filter(|claim| !mounted.contains(&(claim.namespace.as_str(), claim.name.as_str())))
        .map(|claim| {
            let requested = claim.requested_storage.as_deref().unwrap_or("0Gi");
            Zombie {
                kind: ZombieKind::PersistentVolumeClaim,
                name: claim.name.clone(),
                namespace: claim.namespace.clone(),
                reason: REASON_UNMOUNTED.to_string(),
                monthly_cost: parse_size_to_gb(requested) * costs.storage_gb_monthly(),
                age_days: age_in_days(claim.created_at, now),
            }
        })
        .collect()
}
