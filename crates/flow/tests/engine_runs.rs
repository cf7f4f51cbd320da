use flow::{FlowError, InMemoryRunRepository, LogLevel, RootId, RunMeta, RunService, RunStatus};
use serde_json::json;
use std::sync::Arc;

#[test]
fn root_id_format_and_short_tag() {
  let id = RootId::generate();
  assert_eq!(id.as_str().len(), 32);
  assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
  assert!(id.as_str()[..8].chars().all(|c| c.is_ascii_digit()));

  let tag = id.short_tag();
  assert_eq!(tag.len(), 15);
  assert_eq!(&tag[..8], &id.as_str()[..8]);
  assert_eq!(&tag[8..9], "_");
  assert_ne!(RootId::generate(), id);
}

#[test]
fn lifecycle_through_engine_is_visible_in_inspect() {
  let service = RunService::new(Arc::new(InMemoryRunRepository::new()));
  let engine = service.engine();
  let id = RootId::generate();
  engine.register_run(&RunMeta::new(id.clone(), "MYSQL_HA_ENABLE", "enable", "admin", 2, json!({})))
        .unwrap();
  assert_eq!(service.inspect(&id).unwrap().meta.status, RunStatus::Created);

  engine.mark_running(&id).unwrap();
  engine.log(&id, "switch", "node", LogLevel::Info, "[node] ok").unwrap();
  engine.finish(&id, RunStatus::Succeeded, None).unwrap();

  let report = service.inspect(&id).unwrap();
  assert_eq!(report.meta.status, RunStatus::Succeeded);
  assert_eq!(report.logs.len(), 1);
  assert_eq!(report.logs[0].message, "[node] ok");
  assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn finish_requires_terminal_status() {
  let service = RunService::new(Arc::new(InMemoryRunRepository::new()));
  let engine = service.engine();
  let id = RootId::from("r");
  engine.register_run(&RunMeta::new(id.clone(), "t", "f", "u", 0, json!({}))).unwrap();
  assert!(matches!(engine.finish(&id, RunStatus::Running, None), Err(FlowError::Conflict(_))));
  assert!(matches!(service.inspect(&RootId::from("other")), Err(FlowError::NotFound(_))));
}
