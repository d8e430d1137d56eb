use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::{
    Container, Endpoints, PersistentVolumeClaim, Pod, Service,
};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{api::ListParams, Api, Client, Config};

use crate::types::{ClaimRecord, ContainerRequests, PodRecord, ServiceRecord};

/// Read access to the cluster state the zombie rules inspect.
///
/// `namespace: None` means all namespaces. Implementations report transport
/// and authorization failures as errors; an object that simply does not exist
/// is not an error (a service without an Endpoints object has no addresses).
#[async_trait::async_trait]
pub trait ResourceAccessor {
    async fn list_claims(&self, namespace: Option<&str>) -> Result<Vec<ClaimRecord>>;
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>>;
    async fn list_services(&self, namespace: Option<&str>) -> Result<Vec<ServiceRecord>>;
    async fn has_endpoint_addresses(&self, namespace: &str, name: &str) -> Result<bool>;
}

/// Accessor backed by a live API server connection.
pub struct KubeAccessor {
    client: Client,
}

impl KubeAccessor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ResourceAccessor for KubeAccessor {
    async fn list_claims(&self, namespace: Option<&str>) -> Result<Vec<ClaimRecord>> {
        let api: Api<PersistentVolumeClaim> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let claims = api
            .list(&ListParams::default())
            .await
            .context("Failed to list persistent volume claims")?;

        Ok(claims.items.into_iter().map(claim_record).collect())
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>> {
        let api: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let pods = api
            .list(&ListParams::default())
            .await
            .context("Failed to list pods")?;

        Ok(pods.items.into_iter().map(pod_record).collect())
    }

    async fn list_services(&self, namespace: Option<&str>) -> Result<Vec<ServiceRecord>> {
        let api: Api<Service> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let services = api
            .list(&ListParams::default())
            .await
            .context("Failed to list services")?;

        Ok(services.items.into_iter().map(service_record).collect())
    }

    async fn has_endpoint_addresses(&self, namespace: &str, name: &str) -> Result<bool> {
        let api: Api<Endpoints> = Api::namespaced(self.client.clone(), namespace);
        let endpoints = api.get_opt(name).await.with_context(|| {
            format!("Failed to fetch endpoints for service {}/{}", namespace, name)
        })?;

        Ok(endpoints
            .as_ref()
            .map(subsets_have_addresses)
            .unwrap_or(false))
    }
}

/// Connect to the cluster, preferring an explicit kubeconfig path, then an
/// explicit context, then whatever `Config::infer` finds (local kubeconfig or
/// in-cluster service account).
pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Client> {
    let config = resolve_config(kubeconfig, context).await?;
    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;

    Ok(client)
}

async fn resolve_config(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Config> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..KubeConfigOptions::default()
    };

    match kubeconfig {
        Some(path) => {
            let file = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig at {}", path.display()))?;
            Config::from_custom_kubeconfig(file, &options)
                .await
                .context("Failed to load Kubernetes configuration from kubeconfig file")
        }
        None if context.is_some() => Config::from_kubeconfig(&options)
            .await
            .context("Failed to load Kubernetes configuration for requested context"),
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration"),
    }
}

fn claim_record(pvc: PersistentVolumeClaim) -> ClaimRecord {
    let requested_storage = pvc
        .spec
        .and_then(|spec| spec.resources)
        .and_then(|resources| resources.requests)
        .and_then(|mut requests| requests.remove("storage"))
        .map(|quantity| quantity.0);

    ClaimRecord {
        name: pvc.metadata.name.unwrap_or_default(),
        namespace: pvc.metadata.namespace.unwrap_or_default(),
        requested_storage,
        created_at: pvc.metadata.creation_timestamp.map(|t| t.0),
    }
}

fn pod_record(pod: Pod) -> PodRecord {
    let phase = pod.status.as_ref().and_then(|status| status.phase.clone());
    let waiting_reasons = pod
        .status
        .and_then(|status| status.container_statuses)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|cs| cs.state)
        .filter_map(|state| state.waiting)
        .filter_map(|waiting| waiting.reason)
        .collect();

    let (claim_names, containers) = match pod.spec {
        Some(spec) => {
            let claim_names = spec
                .volumes
                .unwrap_or_default()
                .into_iter()
                .filter_map(|volume| volume.persistent_volume_claim)
                .map(|source| source.claim_name)
                .collect();
            let containers = spec.containers.into_iter().map(container_requests).collect();
            (claim_names, containers)
        }
        None => (Vec::new(), Vec::new()),
    };

    PodRecord {
        name: pod.metadata.name.unwrap_or_default(),
        namespace: pod.metadata.namespace.unwrap_or_default(),
        phase,
        deletion_requested: pod.metadata.deletion_timestamp.is_some(),
        waiting_reasons,
        claim_names,
        containers,
        created_at: pod.metadata.creation_timestamp.map(|t| t.0),
    }
}

fn container_requests(container: Container) -> ContainerRequests {
    let mut requests = container
        .resources
        .and_then(|resources| resources.requests)
        .unwrap_or_default();

    ContainerRequests {
        cpu: requests.remove("cpu").map(|quantity| quantity.0),
        memory: requests.remove("memory").map(|quantity| quantity.0),
    }
}

fn service_record(service: Service) -> ServiceRecord {
    ServiceRecord {
        name: service.metadata.name.unwrap_or_default(),
        namespace: service.metadata.namespace.unwrap_or_default(),
        service_type: service.spec.and_then(|spec| spec.type_),
        created_at: service.metadata.creation_timestamp.map(|t| t.0),
    }
}

fn subsets_have_addresses(endpoints: &Endpoints) -> bool {
    let subsets = match &endpoints.subsets {
        Some(subsets) => subsets,
        None => return false,
    };

    subsets.iter().any(|subset| {
        subset
            .addresses
            .as_ref()
            .map(|addresses| !addresses.is_empty())
            .unwrap_or(false)
    })
}

/// In-memory accessor for tests. Build cluster state with the `with_*`
/// methods; endpoint lookups default to "no addresses" when unset.
#[derive(Debug, Default)]
pub struct FakeAccessor {
    claims: Vec<ClaimRecord>,
    pods: Vec<PodRecord>,
    services: Vec<ServiceRecord>,
    endpoints: HashMap<(String, String), bool>,
}

impl FakeAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claim(mut self, claim: ClaimRecord) -> Self {
        self.claims.push(claim);
        self
    }

    pub fn with_pod(mut self, pod: PodRecord) -> Self {
        self.pods.push(pod);
        self
    }

    pub fn with_service(mut self, service: ServiceRecord) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_endpoints(mut self, namespace: &str, name: &str, has_addresses: bool) -> Self {
        self.endpoints
            .insert((namespace.to_string(), name.to_string()), has_addresses);
        self
    }
}

#[async_trait::async_trait]
impl ResourceAccessor for FakeAccessor {
    async fn list_claims(&self, namespace: Option<&str>) -> Result<Vec<ClaimRecord>> {
        Ok(filter_by_namespace(&self.claims, namespace, |claim| {
            &claim.namespace
        }))
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>> {
        Ok(filter_by_namespace(&self.pods, namespace, |pod| {
            &pod.namespace
        }))
    }

    async fn list_services(&self, namespace: Option<&str>) -> Result<Vec<ServiceRecord>> {
        Ok(filter_by_namespace(&self.services, namespace, |service| {
            &service.namespace
        }))
    }

    async fn has_endpoint_addresses(&self, namespace: &str, name: &str) -> Result<bool> {
        Ok(self
            .endpoints
            .get(&(namespace.to_string(), name.to_string()))
            .copied()
            .unwrap_or(false))
    }
}

fn filter_by_namespace<T: Clone>(
    items: &[T],
    namespace: Option<&str>,
    namespace_of: impl Fn(&T) -> &str,
) -> Vec<T> {
    match namespace {
        Some(ns) => items
            .iter()
            .filter(|item| namespace_of(item) == ns)
            .cloned()
            .collect(),
        None => items.to_vec(),
    }
}
