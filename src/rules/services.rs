use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::cluster::ResourceAccessor;
use crate::cost::CostModel;
use crate::parsing::age_in_days;
use crate::types::{Zombie, ZombieKind};

pub const REASON_NO_ENDPOINTS: &str = "no healthy endpoints";

const LOAD_BALANCER_TYPE: &str = "LoadBalancer";

/// Flag LoadBalancer services whose endpoints carry no addresses. Other
/// service types cost nothing to keep around and are skipped outright.
pub async fn scan_unserved_load_balancers<A: ResourceAccessor>(
    accessor: &A,
    namespace: Option<&str>,
    costs: &CostModel,
    now: DateTime<Utc>,
) -> Result<Vec<Zombie>> {
    let services = accessor.list_services(namespace).await?;

    let mut zombies = Vec::new();
    for service in services {
        if service.service_type.as_deref() != Some(LOAD_BALANCER_TYPE) {
            continue;
        }
        if accessor
            .has_endpoint_addresses(&service.namespace, &service.name)
            .await?
        {
            continue;
        }

        zombies.push(Zombie {
            kind: ZombieKind::LoadBalancerService,
            name: service.name,
            namespace: service.namespace,
            reason: REASON_NO_ENDPOINTS.to_string(),
            monthly_cost: costs.load_balancer_monthly(),
            age_days: age_in_days(service.created_at, now),
        });
    }

    Ok(zombies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::FakeAccessor;
    use crate::cost::DEFAULT_COSTS;
    use crate::types::ServiceRecord;

    fn service(name: &str, namespace: &str, service_type: Option<&str>) -> ServiceRecord {
        ServiceRecord {
            name: name.to_string(),
            namespace: namespace.to_string(),
            service_type: service_type.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn test_load_balancer_without_addresses_is_flagged_flat_rate() {
        let accessor =
            FakeAccessor::new().with_service(service("ingress", "edge", Some("LoadBalancer")));

        let zombies = tokio_test::block_on(scan_unserved_load_balancers(
            &accessor,
            None,
            &DEFAULT_COSTS,
            Utc::now(),
        ))
        .unwrap();

        assert_eq!(zombies.len(), 1);
        assert_eq!(zombies[0].kind, ZombieKind::LoadBalancerService);
        assert_eq!(zombies[0].reason, REASON_NO_ENDPOINTS);
        assert_eq!(zombies[0].monthly_cost, 18.0);
    }

    #[test]
    fn test_load_balancer_with_addresses_is_not_flagged() {
        let accessor = FakeAccessor::new()
            .with_service(service("ingress", "edge", Some("LoadBalancer")))
            .with_endpoints("edge", "ingress", true);

        let zombies = tokio_test::block_on(scan_unserved_load_balancers(
            &accessor,
            None,
            &DEFAULT_COSTS,
            Utc::now(),
        ))
        .unwrap();

        assert!(zombies.is_empty());
    }

    #[test]
    fn test_other_service_types_are_skipped() {
        let accessor = FakeAccessor::new()
            .with_service(service("api", "prod", Some("ClusterIP")))
            .with_service(service("metrics", "prod", Some("NodePort")))
            .with_service(service("untyped", "prod", None));

        let zombies = tokio_test::block_on(scan_unserved_load_balancers(
            &accessor,
            None,
            &DEFAULT_COSTS,
            Utc::now(),
        ))
        .unwrap();

        assert!(zombies.is_empty());
    }

    #[test]
    fn test_endpoint_lookup_uses_the_service_namespace() {
        // Addresses exist for a same-named service in another namespace only.
        let accessor = FakeAccessor::new()
            .with_service(service("ingress", "edge", Some("LoadBalancer")))
            .with_endpoints("prod", "ingress", true);

        let zombies = tokio_test::block_on(scan_unserved_load_balancers(
            &accessor,
            None,
            &DEFAULT_COSTS,
            Utc::now(),
        ))
        .unwrap();

        assert_eq!(zombies.len(), 1);
    }
}
