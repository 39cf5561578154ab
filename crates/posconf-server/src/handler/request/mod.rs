//! Request payloads and query parameters.

mod authentication;
mod pagination;
mod submissions;
mod validations;

pub use authentication::LoginRequest;
pub use pagination::PaginationRequest;
pub use submissions::{
    ConfigurationRequest, CredentialRequest, FormRequest, RemoteAccess, TaskFlags,
};
