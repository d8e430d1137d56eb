use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::cluster::ResourceAccessor;
use crate::cost::CostModel;
use crate::parsing::{age_in_days, parse_cpu_to_cores, parse_size_to_gb, InvalidCpuQuantity};
use crate::types::{PodRecord, Zombie, ZombieKind};

pub const REASON_CRASH_LOOP: &str = "degraded: crash loop";
pub const REASON_STUCK_TERMINATING: &str = "stuck terminating";

const CRASH_LOOP_BACK_OFF: &str = "CrashLoopBackOff";

/// Degradation checks in priority order; the first match decides the reason.
pub const DEGRADED_CHECKS: &[(&str, fn(&PodRecord) -> bool)] = &[
    (REASON_CRASH_LOOP, is_crash_looping),
    (REASON_STUCK_TERMINATING, is_stuck_terminating),
];

/// Flag pods burning compute while degraded: crash-looping containers, or a
/// pod still Running after its deletion was requested.
pub async fn scan_degraded_pods<A: ResourceAccessor>(
    accessor: &A,
    namespace: Option<&str>,
    costs: &CostModel,
    now: DateTime<Utc>,
) -> Result<Vec<Zombie>> {
    let pods = accessor.list_pods(namespace).await?;

    find_degraded_pods(&pods, costs, now)
}

pub fn find_degraded_pods(
    pods: &[PodRecord],
    costs: &CostModel,
    now: DateTime<Utc>,
) -> Result<Vec<Zombie>> {
    let mut zombies = Vec::new();
    for pod in pods {
        let reason = match degraded_reason(pod) {
            Some(reason) => reason,
            None => continue,
        };
        // Only flagged pods are costed, so bad requests on healthy pods
        // cannot abort a scan.
        let monthly_cost = requests_monthly_cost(pod, costs).with_context(|| {
            format!(
                "Failed to cost resource requests of pod {}/{}",
                pod.namespace, pod.name
            )
        })?;

        zombies.push(Zombie {
            kind: ZombieKind::Workload,
            name: pod.name.clone(),
            namespace: pod.namespace.clone(),
            reason: reason.to_string(),
            monthly_cost,
            age_days: age_in_days(pod.created_at, now),
        });
    }

    Ok(zombies)
}

pub fn degraded_reason(pod: &PodRecord) -> Option<&'static str> {
    DEGRADED_CHECKS
        .iter()
        .find(|(_, check)| check(pod))
        .map(|(reason, _)| *reason)
}

fn is_crash_looping(pod: &PodRecord) -> bool {
    pod.waiting_reasons
        .iter()
        .any(|reason| reason == CRASH_LOOP_BACK_OFF)
}

fn is_stuck_terminating(pod: &PodRecord) -> bool {
    pod.deletion_requested && pod.phase.as_deref() == Some("Running")
}

fn requests_monthly_cost(pod: &PodRecord, costs: &CostModel) -> Result<f64, InvalidCpuQuantity> {
    let mut total = 0.0;
    for container in &pod.containers {
        let cores = parse_cpu_to_cores(container.cpu.as_deref().unwrap_or("0"))?;
        let memory_gb = parse_size_to_gb(container.memory.as_deref().unwrap_or("0Mi"));
        total += cores * costs.cpu_core_monthly() + memory_gb * costs.memory_gb_monthly();
    }

    Ok(total)
}
