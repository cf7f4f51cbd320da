//! Pasos reutilizables de los flujos MySQL.
mod create_stage_db;
mod execute_commands;
mod prepare_stage_db;
mod rename_table;

pub use create_stage_db::CreateStageDbStep;
pub use execute_commands::ExecuteCommandsStep;
pub use prepare_stage_db::{stage_db_name, PrepareStageDbStep, MAX_DB_NAME_LEN, STAGE_DB_PREFIX};
pub use rename_table::{RenameTableGlobalData, RenameTableKwargs, RenameTableStep, RENAME_TABLE_CODE};
