pub mod claims;
pub mod pods;
pub mod services;

pub use claims::scan_orphaned_claims;
pub use pods::scan_degraded_pods;
pub use services::scan_unserved_load_balancers;
