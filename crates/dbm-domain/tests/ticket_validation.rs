use dbm_domain::details::{ClusterSwitchDetail, RollbackClusterDetail, TruncateDataDetail};
use dbm_domain::{DomainError, FieldError, Ticket, TicketType, MAX_TRUNCATE_DB_NAME_LEN};
use serde_json::{json, Value};

fn truncate(infos: Value) -> Value {
  json!({
    "uid": "42",
    "created_by": "admin",
    "bk_biz_id": 3,
    "ticket_type": "MYSQL_HA_TRUNCATE_DATA",
    "infos": infos
  })
}

fn fields(err: DomainError) -> Vec<FieldError> {
  match err {
    DomainError::InvalidPayload(f) => f,
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn valid_ticket_accepts_numbers_as_strings_and_back() {
  let mut raw = truncate(json!([{"cluster_id": 1, "ip": "10.0.0.1", "port": 3306,
                                 "targets": [{"db_name": "db1", "table_names": ["t1"]}]}]));
  raw["uid"] = json!(42);
  raw["bk_biz_id"] = json!("3");

  let ticket = Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).unwrap();
  assert_eq!(ticket.uid, "42");
  assert_eq!(ticket.bk_biz_id, 3);
  assert_eq!(ticket.infos[0].bk_cloud_id, 0);
  assert_eq!(ticket.header().ticket_type, TicketType::MysqlHaTruncateData);
}

#[test]
fn missing_required_field_names_the_field() {
  let raw = truncate(json!([{"cluster_id": 1, "port": 3306, "targets": [{"db_name": "db1"}]}]));
  let errs = fields(Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).unwrap_err());
  assert_eq!(errs.len(), 1);
  assert_eq!(errs[0].field, "ip");
}

#[test]
fn nested_errors_carry_their_path_and_are_all_reported() {
  let raw = truncate(json!([{"cluster_id": 1, "ip": "", "port": 0,
                             "targets": [{"db_name": "db1"}, {"db_name": "db1", "table_names": [" "]}]}]));
  let errs = fields(Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).unwrap_err());
  let paths: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();

  assert!(paths.contains(&"infos[0].ip"));
  assert!(paths.contains(&"infos[0].port"));
  assert!(paths.contains(&"infos[0].targets[1].db_name"));
  assert!(paths.contains(&"infos[0].targets[1].table_names[0]"));
  let mut sorted = paths.clone();
  sorted.sort();
  assert_eq!(paths, sorted);
}

#[test]
fn ticket_type_must_match_and_infos_must_not_be_empty() {
  let mut raw = truncate(json!([]));
  raw["ticket_type"] = json!("MYSQL_HA_ENABLE");
  let errs = fields(Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).unwrap_err());
  let paths: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
  assert_eq!(paths, vec!["infos", "ticket_type"]);
}

#[test]
fn proxy_addresses_must_parse() {
  let raw = json!({
    "uid": "1", "created_by": "admin", "bk_biz_id": 1, "ticket_type": "MYSQL_HA_DISABLE",
    "infos": [{"cluster_id": 1, "proxy_addresses": ["10.0.0.1:10000", "10.0.0.2"]}]
  });
  let errs = fields(Ticket::<ClusterSwitchDetail>::parse(&raw, TicketType::MysqlHaDisable).unwrap_err());
  assert_eq!(errs[0].field, "infos[0].proxy_addresses[1]");
}

#[test]
fn rollback_by_time_needs_a_time() {
  let raw = json!({
    "uid": "1", "created_by": "admin", "bk_biz_id": 1, "ticket_type": "MYSQL_ROLLBACK_CLUSTER",
    "infos": [{"cluster_id": 1, "rollback_cluster_id": 2, "rollback_ip": "10.0.0.9", "rollback_port": 3306,
               "backup_source": "remote", "rollback_type": "REMOTE_AND_TIME", "databases": ["a"]}]
  });
  let errs = fields(Ticket::<RollbackClusterDetail>::parse(&raw, TicketType::MysqlRollbackCluster).unwrap_err());
  assert!(errs.iter().any(|e| e.field == "infos[0].rollback_time"));
}

#[test]
fn identifiers_that_could_escape_quoting_are_rejected() {
  let raw = truncate(json!([{"cluster_id": 1, "ip": "10.0.0.1", "port": 3306,
                             "targets": [{"db_name": "d", "table_names": ["ok", "t` TO `x`.`t`; DROP DATABASE `prod"]}]}]));
  let errs = fields(Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).unwrap_err());
  assert_eq!(errs.len(), 1);
  assert_eq!(errs[0].field, "infos[0].targets[0].table_names[1]");

  let raw = json!({
    "uid": "1", "created_by": "admin", "bk_biz_id": 1, "ticket_type": "MYSQL_ROLLBACK_CLUSTER",
    "infos": [{"cluster_id": 1, "rollback_cluster_id": 2, "rollback_ip": "10.0.0.9", "rollback_port": 3306,
               "rollback_time": "2024-01-01T00:00:00Z", "backup_source": "remote",
               "rollback_type": "REMOTE_AND_TIME", "databases": ["a", "b`; DROP DATABASE c; -- "]}]
  });
  let errs = fields(Ticket::<RollbackClusterDetail>::parse(&raw, TicketType::MysqlRollbackCluster).unwrap_err());
  assert!(errs.iter().any(|e| e.field == "infos[0].databases[1]"));
}

#[test]
fn truncate_db_name_must_leave_room_for_the_stage_prefix() {
  let long = "x".repeat(MAX_TRUNCATE_DB_NAME_LEN + 1);
  let raw = truncate(json!([{"cluster_id": 1, "ip": "10.0.0.1", "port": 3306,
                             "targets": [{"db_name": long, "table_names": ["t"]}]}]));
  let errs = fields(Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).unwrap_err());
  assert_eq!(errs[0].field, "infos[0].targets[0].db_name");

  let fits = "x".repeat(MAX_TRUNCATE_DB_NAME_LEN);
  let raw = truncate(json!([{"cluster_id": 1, "ip": "10.0.0.1", "port": 3306,
                             "targets": [{"db_name": fits, "table_names": ["t"]}]}]));
  assert!(Ticket::<TruncateDataDetail>::parse(&raw, TicketType::MysqlHaTruncateData).is_ok());
}
