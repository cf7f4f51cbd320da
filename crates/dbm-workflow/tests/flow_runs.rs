use async_trait::async_trait;
use dbm_workflow::{FlowBuilder, FlowRuntime, Step, StepContext, StepOutput, StepResult, TransData, WorkflowError};
use drs_client::ScriptedExecutor;
use flow::{FlowEngine, InMemoryRunRepository, RootId, RunMeta, RunRepository, RunStatus};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

enum Outcome {
  Ok,
  Fail,
  Abort,
}

/// Paso de prueba: registra su nombre, deja una marca en el contexto y
/// devuelve el resultado configurado.
struct ScriptedStep {
  name: &'static str,
  outcome: Outcome,
  trail: Arc<Mutex<Vec<String>>>,
  cancel_after: Option<Arc<AtomicBool>>,
}

#[async_trait]
impl Step for ScriptedStep {
  fn name(&self) -> &str {
    self.name
  }

  async fn execute(&self, ctx: &StepContext, mut trans_data: TransData) -> StepResult {
    self.trail.lock().unwrap().push(self.name.to_string());
    trans_data.old_new_map.insert(self.name.to_string(), format!("seen-{}", trans_data.old_new_map.len()));
    ctx.log_info(self.name, "ejecutado");
    if let Some(flag) = &self.cancel_after {
      flag.store(true, Ordering::SeqCst);
    }
    match self.outcome {
      Outcome::Ok => Ok(StepOutput::succeeded(trans_data)),
      Outcome::Fail => Ok(StepOutput::failed(trans_data)),
      Outcome::Abort => Err(WorkflowError::ContractViolation("falta una clave".into())),
    }
  }
}

struct Setup {
  repo: Arc<InMemoryRunRepository>,
  runtime: FlowRuntime,
  root_id: RootId,
  trail: Arc<Mutex<Vec<String>>>,
}

fn setup() -> Setup {
  let repo = Arc::new(InMemoryRunRepository::new());
  let root_id = RootId::generate();
  repo.create_run(&RunMeta::new(root_id.clone(), "TEST", "test", "admin", 1, json!({}))).unwrap();
  let repo_dyn: Arc<dyn RunRepository> = repo.clone();
  let runtime = FlowRuntime::new(Arc::new(ScriptedExecutor::new()), FlowEngine::new(repo_dyn));
  Setup { repo, runtime, root_id, trail: Arc::new(Mutex::new(Vec::new())) }
}

fn step(s: &Setup, name: &'static str, outcome: Outcome) -> ScriptedStep {
  ScriptedStep { name, outcome, trail: s.trail.clone(), cancel_after: None }
}

#[tokio::test]
async fn steps_run_in_order_and_see_previous_writes() {
  let s = setup();
  let flow = FlowBuilder::new(s.root_id.clone(), "ordered").step(step(&s, "a", Outcome::Ok))
                                                          .step(step(&s, "b", Outcome::Ok))
                                                          .build();
  assert_eq!(flow.step_names(), vec!["a", "b"]);

  let report = flow.run(s.runtime.clone(), Arc::new(AtomicBool::new(false))).await.unwrap();

  assert_eq!(report.status, RunStatus::Succeeded);
  assert_eq!(*s.trail.lock().unwrap(), vec!["a", "b"]);
  assert_eq!(report.trans_data.old_new_map["a"], "seen-0");
  assert_eq!(report.trans_data.old_new_map["b"], "seen-1");
  assert_eq!(s.repo.get_run(&s.root_id).unwrap().status, RunStatus::Succeeded);
}

#[tokio::test]
async fn first_false_halts_the_run() {
  let s = setup();
  let flow = FlowBuilder::new(s.root_id.clone(), "halting").step(step(&s, "a", Outcome::Ok))
                                                          .step(step(&s, "b", Outcome::Fail))
                                                          .step(step(&s, "c", Outcome::Ok))
                                                          .build();

  let report = flow.run(s.runtime.clone(), Arc::new(AtomicBool::new(false))).await.unwrap();

  assert_eq!(report.status, RunStatus::Failed);
  assert_eq!(report.failed_step.as_deref(), Some("b"));
  assert_eq!(*s.trail.lock().unwrap(), vec!["a", "b"]);
  let meta = s.repo.get_run(&s.root_id).unwrap();
  assert_eq!(meta.status, RunStatus::Failed);
  assert_eq!(meta.failed_step.as_deref(), Some("b"));
}

#[tokio::test]
async fn step_error_aborts_and_is_propagated() {
  let s = setup();
  let flow = FlowBuilder::new(s.root_id.clone(), "aborting").step(step(&s, "a", Outcome::Abort))
                                                           .step(step(&s, "b", Outcome::Ok))
                                                           .build();

  let err = flow.run(s.runtime.clone(), Arc::new(AtomicBool::new(false))).await.unwrap_err();

  assert!(matches!(err, WorkflowError::ContractViolation(_)));
  assert_eq!(*s.trail.lock().unwrap(), vec!["a"]);
  let meta = s.repo.get_run(&s.root_id).unwrap();
  assert_eq!(meta.status, RunStatus::Failed);
  let logs = s.repo.read_logs(&s.root_id).unwrap();
  assert!(logs.iter().any(|l| l.message.contains("falta una clave")));
}

#[tokio::test]
async fn cancel_is_honoured_between_steps() {
  let s = setup();
  let cancel = Arc::new(AtomicBool::new(false));
  let mut first = step(&s, "a", Outcome::Ok);
  first.cancel_after = Some(cancel.clone());
  let flow = FlowBuilder::new(s.root_id.clone(), "cancelled").step(first)
                                                            .step(step(&s, "b", Outcome::Ok))
                                                            .build();

  let report = flow.run(s.runtime.clone(), cancel).await.unwrap();

  assert_eq!(report.status, RunStatus::Revoked);
  assert_eq!(report.failed_step.as_deref(), Some("b"));
  assert_eq!(*s.trail.lock().unwrap(), vec!["a"]);
  assert_eq!(s.repo.get_run(&s.root_id).unwrap().status, RunStatus::Revoked);
}

#[tokio::test]
async fn empty_flow_succeeds_with_initial_context() {
  let s = setup();
  let mut td = TransData::default();
  td.old_new_map.insert("x".into(), "y".into());
  let flow = FlowBuilder::new(s.root_id.clone(), "empty").trans_data(td.clone()).build();

  let report = flow.run(s.runtime.clone(), Arc::new(AtomicBool::new(false))).await.unwrap();

  assert_eq!(report.status, RunStatus::Succeeded);
  assert_eq!(report.trans_data, td);
}

#[tokio::test]
async fn step_logs_land_in_the_run_trail_with_node_prefix() {
  let s = setup();
  let flow = FlowBuilder::new(s.root_id.clone(), "logged").step(step(&s, "a", Outcome::Ok)).build();
  flow.run(s.runtime.clone(), Arc::new(AtomicBool::new(false))).await.unwrap();

  let logs = s.repo.read_logs(&s.root_id).unwrap();
  assert_eq!(logs.len(), 1);
  assert_eq!(logs[0].message, "[a] ejecutado");
  assert_eq!(logs[0].step_name, "a");
}
