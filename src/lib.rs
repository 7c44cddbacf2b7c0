// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: Postgres repositories, token keys, throttling
// - presentation: HTTP handlers and routing
// - application: ports, use cases, validation and password hashing
// - domain: users and friend requests

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub mod test_support;
