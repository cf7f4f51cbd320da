mod cluster_switch;
mod rollback_cluster;
mod truncate_data;

pub use cluster_switch::ClusterSwitchDetail;
pub use rollback_cluster::{BackupSource, RollbackClusterDetail, RollbackType};
pub use truncate_data::{TruncateDataDetail, TruncateTarget};
