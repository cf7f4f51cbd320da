pub mod cluster_switch;
pub mod flow;
pub mod rollback_cluster;
pub mod steps;
pub mod truncate_data;

pub use cluster_switch::ClusterSwitchFlow;
pub use self::flow::{Flow, FlowBuilder, FlowReport};
pub use rollback_cluster::RollbackClusterFlow;
pub use truncate_data::TruncateDataFlow;
