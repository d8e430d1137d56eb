use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::cluster::ResourceAccessor;
use crate::cost::{CostModel, DEFAULT_COSTS};
use crate::rules::{scan_degraded_pods, scan_orphaned_claims, scan_unserved_load_balancers};
use crate::types::Zombie;

/// Runs every zombie rule in a fixed order and concatenates the findings.
///
/// The order (claims, then pods, then load balancers) is part of the output
/// contract: the table groups by kind because of it, and the freemium cap
/// truncates a stable list.
pub struct ZombieScanner<A> {
    accessor: A,
    costs: CostModel,
}

impl<A: ResourceAccessor> ZombieScanner<A> {
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            costs: DEFAULT_COSTS,
        }
    }

    pub async fn scan_all(&self, namespace: Option<&str>) -> Result<Vec<Zombie>> {
        match namespace {
            Some(ns) => info!("Scanning namespace {} for zombie resources", ns),
            None => info!("Scanning all namespaces for zombie resources"),
        }

        // One instant for the whole scan keeps ages consistent across rules.
        let now = Utc::now();

        let mut zombies =
            scan_orphaned_claims(&self.accessor, namespace, &self.costs, now).await?;
        info!("Found {} orphaned persistent volume claims", zombies.len());

        let degraded = scan_degraded_pods(&self.accessor, namespace, &self.costs, now).await?;
        info!("Found {} degraded pods", degraded.len());
        zombies.extend(degraded);

        let unserved =
            scan_unserved_load_balancers(&self.accessor, namespace, &self.costs, now).await?;
        info!("Found {} load balancers without endpoints", unserved.len());
        zombies.extend(unserved);

        Ok(zombies)
    }
}
