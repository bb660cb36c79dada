//! Typed entities, one module per endpoint family.
//!
//! Every entity derives `PartialEq` so scenarios compare by value, and
//! serializes to the exact wire shape (camelCase field names, optional
//! fields omitted when absent).

pub mod auth;
pub mod card;
pub mod country;
pub mod graphql;
pub mod user;

pub use auth::{LoginFailure, LoginRequest};
pub use card::{Card, CardRequest};
pub use country::Country;
pub use graphql::GraphQlRequest;
pub use user::{Address, CreatedUser, UserRequest};
