use dbm_domain::details::TruncateTarget;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Contexto compartido que viaja de un paso al siguiente dentro de una
/// ejecución.
///
/// - `targets`: base -> tabla -> procesada. Conserva el orden de inserción,
///   que es el orden en que se procesan.
/// - `old_new_map`: base original -> base de stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransData {
  #[serde(default)]
  pub targets: IndexMap<String, IndexMap<String, bool>>,
  #[serde(default)]
  pub old_new_map: IndexMap<String, String>,
}

impl TransData {
  /// Sustituye `targets` por las bases y tablas indicadas, todas sin
  /// procesar.
  pub fn load_targets(&mut self, targets: &[TruncateTarget]) {
    self.targets = targets.iter()
                          .map(|t| {
                            let tables = t.table_names.iter().map(|n| (n.clone(), false)).collect();
                            (t.db_name.clone(), tables)
                          })
                          .collect();
  }

  /// Marca una tabla como procesada. Devuelve `false` si no estaba en
  /// `targets`.
  pub fn mark_processed(&mut self, db: &str, table: &str) -> bool {
    match self.targets.get_mut(db).and_then(|tables| tables.get_mut(table)) {
      Some(flag) => {
        *flag = true;
        true
      }
      None => false,
    }
  }

  pub fn is_processed(&self, db: &str, table: &str) -> bool {
    self.targets
        .get(db)
        .and_then(|tables| tables.get(table))
        .copied()
        .unwrap_or(false)
  }

  pub fn all_processed(&self) -> bool {
    self.targets.values().all(|tables| tables.values().all(|done| *done))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_keeps_order_and_starts_unprocessed() {
    let mut td = TransData::default();
    td.load_targets(&[TruncateTarget { db_name: "b".into(), table_names: vec!["t2".into(), "t1".into()] },
                      TruncateTarget { db_name: "a".into(), table_names: vec![] }]);
    let dbs: Vec<_> = td.targets.keys().cloned().collect();
    assert_eq!(dbs, vec!["b", "a"]);
    let tables: Vec<_> = td.targets["b"].keys().cloned().collect();
    assert_eq!(tables, vec!["t2", "t1"]);
    assert!(!td.all_processed());

    assert!(td.mark_processed("b", "t2"));
    assert!(td.mark_processed("b", "t1"));
    assert!(!td.mark_processed("b", "missing"));
    assert!(td.is_processed("b", "t1"));
    assert!(td.all_processed());
  }
}
