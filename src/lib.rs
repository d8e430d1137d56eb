// Public modules
pub mod types;
pub mod parsing;
pub mod cost;
pub mod cluster;
pub mod rules;
pub mod scanner;
pub mod report;
pub mod cli;

// Re-export commonly used items
pub use types::*;
pub use parsing::{age_in_days, parse_cpu_to_cores, parse_size_to_gb};
pub use cost::{CostModel, DEFAULT_COSTS};
pub use cluster::{connect, FakeAccessor, KubeAccessor, ResourceAccessor};
pub use scanner::ZombieScanner;
pub use report::{build_json_report, is_pro_key, render_table, total_monthly_cost};
