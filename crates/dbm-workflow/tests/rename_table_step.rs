use dbm_workflow::flows::steps::{RenameTableGlobalData, RenameTableKwargs, RenameTableStep, RENAME_TABLE_CODE};
use dbm_workflow::{FlowRuntime, Step, StepContext, TransData, WorkflowError};
use drs_client::ScriptedExecutor;
use flow::{FlowEngine, InMemoryRunRepository, LogLevel, RootId, RunMeta, RunRepository};
use indexmap::IndexMap;
use serde_json::json;
use std::sync::Arc;

const ADDR: &str = "127.0.0.1:20000";

struct Harness {
  drs: Arc<ScriptedExecutor>,
  repo: Arc<InMemoryRunRepository>,
  ctx: StepContext,
}

fn harness() -> Harness {
  let drs = Arc::new(ScriptedExecutor::new());
  let repo = Arc::new(InMemoryRunRepository::new());
  let root_id = RootId::generate();
  repo.create_run(&RunMeta::new(root_id.clone(), "MYSQL_HA_TRUNCATE_DATA", "truncate_data", "admin", 1, json!({})))
      .unwrap();
  let repo_dyn: Arc<dyn RunRepository> = repo.clone();
  let runtime = FlowRuntime::new(drs.clone(), FlowEngine::new(repo_dyn));
  let ctx = StepContext::new(root_id, RENAME_TABLE_CODE, runtime);
  Harness { drs, repo, ctx }
}

fn step() -> RenameTableStep {
  RenameTableStep::new(RenameTableKwargs { node_name: "node-1".into(), bk_cloud_id: 0 },
                       RenameTableGlobalData { ip: "127.0.0.1".into(), port: 20000 })
}

fn trans_data(targets: &[(&str, &[&str])], map: &[(&str, &str)]) -> TransData {
  let mut td = TransData::default();
  for (db, tables) in targets {
    let tables: IndexMap<String, bool> = tables.iter().map(|t| (t.to_string(), false)).collect();
    td.targets.insert(db.to_string(), tables);
  }
  for (old, new) in map {
    td.old_new_map.insert(old.to_string(), new.to_string());
  }
  td
}

#[tokio::test]
async fn all_tables_renamed_and_marked() {
  let h = harness();
  let td = trans_data(&[("db1", &["t1", "t2"])], &[("db1", "db1_bak")]);

  let out = step().execute(&h.ctx, td).await.unwrap();

  assert!(out.success);
  assert!(out.trans_data.is_processed("db1", "t1"));
  assert!(out.trans_data.is_processed("db1", "t2"));
  assert_eq!(h.drs.sent_commands(),
             vec!["RENAME TABLE `db1`.`t1` TO `db1_bak`.`t1`", "RENAME TABLE `db1`.`t2` TO `db1_bak`.`t2`"]);
  let calls = h.drs.calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].force);
  assert_eq!(calls[0].addresses, vec![ADDR.to_string()]);
}

#[tokio::test]
async fn remote_error_fails_the_step_and_is_logged() {
  let h = harness();
  h.drs.fail_on_address(ADDR, "table not found");
  let td = trans_data(&[("db1", &["t1", "t2"])], &[("db1", "db1_bak")]);

  let out = step().execute(&h.ctx, td).await.unwrap();

  assert!(!out.success);
  let logs = h.repo.read_logs(&h.ctx.root_id).unwrap();
  let error = logs.iter().find(|l| l.level == LogLevel::Error).expect("error log");
  assert!(error.message.contains("node-1"));
  assert!(error.message.contains(ADDR));
  assert!(error.message.contains("table not found"));
}

#[tokio::test]
async fn first_failing_database_stops_the_rest() {
  let h = harness();
  h.drs.fail_on_command("`db1`.", "Access denied");
  let td = trans_data(&[("db1", &["t1"]), ("db2", &["t9"])], &[("db1", "s1"), ("db2", "s2")]);

  let out = step().execute(&h.ctx, td).await.unwrap();

  assert!(!out.success);
  assert_eq!(h.drs.call_count(), 1);
  // Marcada aunque falló: procesada significa intentada.
  assert!(out.trans_data.is_processed("db1", "t1"));
  assert!(!out.trans_data.is_processed("db2", "t9"));
}

#[tokio::test]
async fn databases_are_processed_in_target_order() {
  let h = harness();
  let td = trans_data(&[("db2", &["a"]), ("db1", &["b"])], &[("db1", "s1"), ("db2", "s2")]);

  let out = step().execute(&h.ctx, td).await.unwrap();

  assert!(out.success);
  assert!(out.trans_data.all_processed());
  let first: Vec<String> = h.drs.calls().into_iter().map(|c| c.cmds[0].clone()).collect();
  assert_eq!(first, vec!["RENAME TABLE `db2`.`a` TO `s2`.`a`", "RENAME TABLE `db1`.`b` TO `s1`.`b`"]);
}

#[tokio::test]
async fn database_without_tables_is_a_noop_success() {
  let h = harness();
  let td = trans_data(&[("db1", &[])], &[("db1", "db1_bak")]);

  let out = step().execute(&h.ctx, td).await.unwrap();

  assert!(out.success);
  assert_eq!(h.drs.call_count(), 0);
}

#[tokio::test]
async fn missing_stage_mapping_is_a_contract_violation() {
  let h = harness();
  let td = trans_data(&[("db1", &["t1"])], &[]);

  let err = step().execute(&h.ctx, td).await.unwrap_err();

  assert!(matches!(err, WorkflowError::ContractViolation(_)));
  assert_eq!(h.drs.call_count(), 0);
}

#[tokio::test]
async fn running_twice_sends_the_batch_twice() {
  let h = harness();
  let td = trans_data(&[("db1", &["t1"])], &[("db1", "db1_bak")]);

  let first = step().execute(&h.ctx, td).await.unwrap();
  let second = step().execute(&h.ctx, first.trans_data).await.unwrap();

  assert!(second.success);
  assert_eq!(h.drs.call_count(), 2);
}

#[tokio::test]
async fn backticks_in_names_stay_inside_the_quoted_identifier() {
  let h = harness();
  let td = trans_data(&[("db1", &["t` TO `x`.`t"])], &[("db1", "db1_bak")]);

  let out = step().execute(&h.ctx, td).await.unwrap();

  assert!(out.success);
  assert_eq!(h.drs.sent_commands(),
             vec!["RENAME TABLE `db1`.`t`` TO ``x``.``t` TO `db1_bak`.`t`` TO ``x``.``t`"]);
}

#[test]
fn step_name_carries_the_cluster() {
  assert_eq!(step().name(), RENAME_TABLE_CODE);
  assert_eq!(step().for_cluster(7).name(), "truncate_data_rename_table:7");
}
