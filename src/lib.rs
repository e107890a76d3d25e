// Module layout (Clean Architecture style)
// - bootstrap: configuration and the service container
// - infrastructure: Postgres adapters
// - presentation: HTTP handlers, session handling and routing
// - application: ports, use cases and access rules
// - domain: core models and validation

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
