//! Reglas de los identificadores de MySQL (bases y tablas) que llegan en
//! los tickets.

/// Longitud máxima de un identificador de MySQL.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Caracteres que el flujo de clear de datos añade al nombre de una base
/// para formar su base de stage: `stage_truncate_` + `YYYYMMDD_xxxxxx` + `_`.
pub const STAGE_DB_NAME_OVERHEAD: usize = 31;

/// Longitud máxima de una base que se va a vaciar.
pub const MAX_TRUNCATE_DB_NAME_LEN: usize = MAX_IDENTIFIER_LEN - STAGE_DB_NAME_OVERHEAD;

/// Motivo por el que `name` no es un identificador aceptable, si lo hay.
///
/// Se rechazan las comillas invertidas y los caracteres de control aunque
/// los comandos citen los identificadores.
pub fn identifier_problem(name: &str, max_len: usize) -> Option<String> {
  if name.trim().is_empty() {
    return Some("no puede estar vacío".into());
  }
  if name.contains('`') {
    return Some(format!("contiene una comilla invertida: {}", name));
  }
  if name.chars().any(char::is_control) {
    return Some("contiene caracteres de control".into());
  }
  if name.ends_with(' ') {
    return Some("no puede terminar en espacio".into());
  }
  if name.chars().count() > max_len {
    return Some(format!("supera {} caracteres", max_len));
  }
  None
}

/// Cita un identificador para usarlo en SQL: lo rodea de comillas
/// invertidas y duplica las que contenga.
pub fn quote_ident(name: &str) -> String {
  format!("`{}`", name.replace('`', "``"))
}
