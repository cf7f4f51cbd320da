use dbm_domain::{EndpointAddress, ZoneId};
use drs_client::{align_results, CommandBatch, DrsError, DrsResult, HttpDrsClient, RemoteExecutor, ScriptedExecutor};
use std::time::Duration;

fn addrs(list: &[&str], zone: i64) -> Vec<EndpointAddress> {
  list.iter()
      .map(|a| EndpointAddress::parse(a, ZoneId(zone)).expect("addr"))
      .collect()
}

fn batch(cmds: &[&str]) -> CommandBatch {
  CommandBatch::new(cmds.iter().map(|c| c.to_string()).collect(), true)
}

#[tokio::test]
async fn one_result_per_address_in_order() {
  let drs = ScriptedExecutor::new();
  drs.fail_on_address("10.0.0.2:3306", "Access denied");
  let targets = addrs(&["10.0.0.1:3306", "10.0.0.2:3306", "10.0.0.3:3306"], 0);

  let res = drs.execute(&targets, &batch(&["SELECT 1"]), ZoneId(0)).await.expect("execute");

  assert_eq!(res.len(), targets.len());
  let order: Vec<_> = res.iter().map(|r| r.address.as_str()).collect();
  assert_eq!(order, vec!["10.0.0.1:3306", "10.0.0.2:3306", "10.0.0.3:3306"]);
  assert!(res[0].is_success());
  assert_eq!(res[1].error_msg, "Access denied");
  assert!(res[2].is_success());

  let calls = drs.calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].force);
  assert_eq!(calls[0].bk_cloud_id, 0);
}

#[tokio::test]
async fn empty_batch_is_a_noop() {
  let drs = ScriptedExecutor::new();
  let targets = addrs(&["10.0.0.1:3306"], 3);
  let res = drs.execute(&targets, &CommandBatch::default(), ZoneId(3)).await.expect("execute");
  assert_eq!(res, vec![DrsResult::success("10.0.0.1:3306")]);
  assert_eq!(drs.call_count(), 0);
}

#[tokio::test]
async fn empty_addresses_and_foreign_zone_are_contract_errors() {
  let drs = ScriptedExecutor::new();
  let err = drs.execute(&[], &batch(&["SELECT 1"]), ZoneId(0)).await.unwrap_err();
  assert_eq!(err, DrsError::EmptyAddresses);

  let targets = addrs(&["10.0.0.1:3306"], 1);
  let err = drs.execute(&targets, &batch(&["SELECT 1"]), ZoneId(0)).await.unwrap_err();
  assert!(matches!(err, DrsError::ZoneMismatch { expected: 0, actual: 1, .. }));
  assert_eq!(drs.call_count(), 0);
}

#[tokio::test]
async fn transport_failure_becomes_per_address_message() {
  let drs = ScriptedExecutor::new();
  drs.fail_transport("connection refused");
  let targets = addrs(&["10.0.0.1:3306", "10.0.0.2:3306"], 0);

  let res = drs.execute(&targets, &batch(&["SELECT 1"]), ZoneId(0)).await.expect("execute");
  assert_eq!(res.len(), 2);
  assert!(res.iter().all(|r| r.error_msg.contains("connection refused")));
}

#[test]
fn align_matches_by_address_and_fills_gaps() {
  let requested = vec!["a:1".to_string(), "b:2".to_string(), "c:3".to_string()];
  let returned = vec![DrsResult::failure("c:3", "boom"), DrsResult::success("a:1")];

  let aligned = align_results(&requested, returned);
  assert_eq!(aligned.len(), 3);
  assert!(aligned[0].is_success());
  assert!(!aligned[1].is_success());
  assert_eq!(aligned[1].address, "b:2");
  assert_eq!(aligned[2].error_msg, "boom");
}

#[tokio::test]
async fn http_client_reports_unreachable_service_per_address() {
  // Puerto 1 en loopback: conexión rechazada sin esperar al timeout.
  let client = HttpDrsClient::new("http://127.0.0.1:1", Duration::from_secs(2), Duration::from_secs(5)).expect("client");
  let targets = addrs(&["10.0.0.1:3306"], 0);

  let res = client.execute(&targets, &batch(&["SELECT 1"]), ZoneId(0)).await.expect("execute");
  assert_eq!(res.len(), 1);
  assert!(!res[0].is_success());
  assert!(res[0].error_msg.starts_with("error de transporte DRS"));
}
