pub mod auth;
pub mod rate_limit;
pub mod request_id;

pub use auth::{
    hash_api_key, ApiKeyAuth, AuthContext, Capability, CredentialStore, MySqlCredentialStore,
    Principal, Role,
};
pub use rate_limit::RateLimiter;
pub use request_id::{CorrelationId, RequestId};
