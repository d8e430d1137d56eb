/// Flat monthly price assumptions used to turn zombie resources into dollars.
///
/// The numbers are deliberately coarse, cloud-agnostic ballparks. They exist
/// to rank findings by impact, not to reconcile a bill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    load_balancer_monthly: f64,
    storage_gb_monthly: f64,
    cpu_core_monthly: f64,
    memory_gb_monthly: f64,
}

pub const DEFAULT_COSTS: CostModel = CostModel {
    load_balancer_monthly: 18.0,
    storage_gb_monthly: 0.10,
    cpu_core_monthly: 30.0,
    memory_gb_monthly: 4.0,
};

impl CostModel {
    pub fn load_balancer_monthly(&self) -> f64 {
        self.load_balancer_monthly
    }

    pub fn storage_gb_monthly(&self) -> f64 {
        self.storage_gb_monthly
    }

    pub fn cpu_core_monthly(&self) -> f64 {
        self.cpu_core_monthly
    }

    pub fn memory_gb_monthly(&self) -> f64 {
        self.memory_gb_monthly
    }
}

impl Default for CostModel {
    fn default() -> Self {
        DEFAULT_COSTS
    }
}
