// Crate entry point. Re-export modules so tests and the binary can import them.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.

pub mod config;
pub mod graphql;
pub mod http;
pub mod store;
