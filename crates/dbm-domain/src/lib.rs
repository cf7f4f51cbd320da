mod address;
pub mod details;
mod errors;
mod identifier;
mod ticket;
mod ticket_type;

pub use address::{EndpointAddress, ZoneId, IP_PORT_DIVIDER};
pub use errors::{join_field_errors, DomainError, FieldError};
pub use identifier::{identifier_problem, quote_ident, MAX_IDENTIFIER_LEN, MAX_TRUNCATE_DB_NAME_LEN, STAGE_DB_NAME_OVERHEAD};
pub use ticket::{collect_validation_errors, Ticket, TicketDetail, TicketHeader};
pub use ticket_type::{ClusterPhase, IamAction, TicketType};
