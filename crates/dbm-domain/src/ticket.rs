// ticket.rs
//! Sobre común de los tickets y validación tipada de su detalle.
//!
//! Todos los tickets comparten el sobre `{uid, created_by, bk_biz_id,
//! ticket_type, infos}`; `infos` se deserializa al tipo de detalle concreto
//! que cada flujo declara (`TicketDetail`). La validación acumula errores por
//! campo en lugar de abortar en el primero.
use crate::errors::{DomainError, FieldError};
use crate::ticket_type::TicketType;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Contrato de los detalles (`infos[i]`) de un ticket.
///
/// Las reglas estructurales se declaran con `validator`; `check` añade las
/// reglas que dependen de varios campos (direcciones parseables, nombres
/// duplicados, etc.).
pub trait TicketDetail: DeserializeOwned + Validate + Send + Sync + 'static {
  fn check(&self, _path: &str) -> Vec<FieldError> {
    Vec::new()
  }
}

/// Cabecera del ticket sin el detalle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketHeader {
  pub uid: String,
  pub created_by: String,
  pub bk_biz_id: i64,
  pub ticket_type: TicketType,
}

/// Ticket validado con su detalle tipado.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct Ticket<D> {
  #[serde(deserialize_with = "string_or_number")]
  pub uid: String,
  pub created_by: String,
  #[serde(deserialize_with = "i64_from_string_or_number")]
  pub bk_biz_id: i64,
  pub ticket_type: TicketType,
  #[serde(default)]
  pub infos: Vec<D>,
}

impl<D: TicketDetail> Ticket<D> {
  /// Deserializa y valida `raw` como un ticket de tipo `expected`.
  ///
  /// Devuelve `DomainError::InvalidPayload` con todos los errores de campo
  /// encontrados.
  pub fn parse(raw: &JsonValue, expected: TicketType) -> Result<Self, DomainError> {
    let ticket: Ticket<D> =
      serde_json::from_value(raw.clone()).map_err(|e| DomainError::InvalidPayload(vec![field_error_from_serde(&e)]))?;

    let mut errors = Vec::new();
    if ticket.ticket_type != expected {
      errors.push(FieldError::new("ticket_type",
                                  format!("se esperaba {}, se recibió {}", expected, ticket.ticket_type)));
    }
    if ticket.uid.trim().is_empty() {
      errors.push(FieldError::new("uid", "no puede estar vacío"));
    }
    if ticket.created_by.trim().is_empty() {
      errors.push(FieldError::new("created_by", "no puede estar vacío"));
    }
    if ticket.infos.is_empty() {
      errors.push(FieldError::new("infos", "debe contener al menos un elemento"));
    }
    for (i, info) in ticket.infos.iter().enumerate() {
      let path = format!("infos[{}]", i);
      if let Err(e) = info.validate() {
        collect_validation_errors(&path, &e, &mut errors);
      }
      errors.extend(info.check(&path));
    }

    if errors.is_empty() {
      Ok(ticket)
    } else {
      errors.sort_by(|a, b| a.field.cmp(&b.field));
      Err(DomainError::InvalidPayload(errors))
    }
  }

  pub fn header(&self) -> TicketHeader {
    TicketHeader { uid: self.uid.clone(),
                   created_by: self.created_by.clone(),
                   bk_biz_id: self.bk_biz_id,
                   ticket_type: self.ticket_type }
  }
}

/// Aplana `ValidationErrors` (incluidos anidados y listas) en rutas
/// legibles bajo `prefix`.
pub fn collect_validation_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
  for (field, kind) in errors.errors() {
    let path = format!("{}.{}", prefix, field);
    match kind {
      ValidationErrorsKind::Field(errs) => {
        for e in errs {
          let message = e.message
                         .as_ref()
                         .map(|m| m.to_string())
                         .unwrap_or_else(|| e.code.to_string());
          out.push(FieldError::new(path.clone(), message));
        }
      }
      ValidationErrorsKind::Struct(inner) => collect_validation_errors(&path, inner, out),
      ValidationErrorsKind::List(items) => {
        for (idx, inner) in items {
          collect_validation_errors(&format!("{}[{}]", path, idx), inner, out);
        }
      }
    }
  }
}

fn field_error_from_serde(e: &serde_json::Error) -> FieldError {
  let msg = e.to_string();
  let field = msg.strip_prefix("missing field `")
                 .and_then(|rest| rest.split('`').next())
                 .unwrap_or("payload");
  FieldError::new(field, msg.clone())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
  where D: Deserializer<'de>
{
  match JsonValue::deserialize(deserializer)? {
    JsonValue::String(s) => Ok(s),
    JsonValue::Number(n) => Ok(n.to_string()),
    other => Err(de::Error::custom(format!("se esperaba texto o número, se recibió {}", other))),
  }
}

fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
  where D: Deserializer<'de>
{
  match JsonValue::deserialize(deserializer)? {
    JsonValue::Number(n) => n.as_i64().ok_or_else(|| de::Error::custom(format!("entero fuera de rango: {}", n))),
    JsonValue::String(s) => s.trim()
                             .parse::<i64>()
                             .map_err(|_| de::Error::custom(format!("entero inválido: {}", s))),
    other => Err(de::Error::custom(format!("se esperaba entero, se recibió {}", other))),
  }
}
