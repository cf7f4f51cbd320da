pub mod registry;

pub use registry::{builtin_registry, init_registry, register_builtin_flows, registry, Binding, FlowParamBuilder,
                   PreparedFlow, RegistryBuilder, TicketRegistry};
