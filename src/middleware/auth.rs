use crate::core::AppError;
use crate::middleware::request_id::CorrelationId;
use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// What an authenticated caller is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read dashboards, charts and summaries
    ViewReports,
    /// Produce monthly and printable reports
    ExportReports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin => &[Capability::ViewReports, Capability::ExportReports],
            Role::Customer => &[],
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" | "user" => Ok(Role::Customer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub name: String,
    pub role: Role,
}

/// Request-scoped auth context handed explicitly to handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub principal: Principal,
    pub request_id: Option<String>,
}

impl AuthContext {
    pub fn can(&self, capability: Capability) -> bool {
        self.principal.role.capabilities().contains(&capability)
    }

    /// Fail with `Forbidden` unless the principal holds `capability`
    pub fn require(&self, capability: Capability) -> crate::core::Result<()> {
        if self.can(capability) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = self.principal.user_id,
                request_id = self.request_id.as_deref().unwrap_or("unknown"),
                ?capability,
                "Capability check failed"
            );
            Err(AppError::forbidden(format!(
                "Missing capability {:?}",
                capability
            )))
        }
    }
}

impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let extensions = req.extensions();
        let context = extensions
            .get::<Principal>()
            .cloned()
            .map(|principal| AuthContext {
                principal,
                request_id: extensions.get::<CorrelationId>().map(|id| id.0.clone()),
            })
            .ok_or_else(|| AppError::unauthorized("No authenticated principal"));

        ready(context)
    }
}

/// Lookup of principals by hashed API key
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_key_hash(&self, key_hash: &str) -> crate::core::Result<Option<Principal>>;
}

pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApiKeyRow {
    user_id: i64,
    name: String,
    role: String,
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_key_hash(&self, key_hash: &str) -> crate::core::Result<Option<Principal>> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT k.user_id, u.name, u.role
            FROM api_keys k
            JOIN users u ON u.id = k.user_id
            WHERE k.key_hash = ? AND k.is_active = TRUE
            LIMIT 1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let role = row
                .role
                .parse::<Role>()
                .map_err(|e| AppError::internal(format!("User {}: {}", row.user_id, e)))?;
            Ok(Principal {
                user_id: row.user_id,
                name: row.name,
                role,
            })
        })
        .transpose()
    }
}

/// SHA-256 hex digest under which API keys are stored
pub fn hash_api_key(api_key: &str) -> String {
    hex::encode(Sha256::digest(api_key.as_bytes()))
}

/// Paths reachable without credentials
pub fn is_public_path(path: &str) -> bool {
    matches!(path, "/" | "/health" | "/ready")
}

/// API key authentication middleware
pub struct ApiKeyAuth {
    store: Arc<dyn CredentialStore>,
}

impl ApiKeyAuth {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn CredentialStore>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let store = self.store.clone();

        Box::pin(async move {
            if is_public_path(req.path()) {
                return svc.call(req).await.map(|res| res.map_into_right_body());
            }

            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());

            let outcome = match api_key {
                Some(key) => match store.find_by_key_hash(&hash_api_key(&key)).await {
                    Ok(Some(principal)) => Ok(principal),
                    Ok(None) => Err(AppError::unauthorized("Invalid API key")),
                    Err(e) => Err(e),
                },
                None => Err(AppError::unauthorized("Missing X-API-Key header")),
            };

            match outcome {
                Ok(principal) => {
                    tracing::debug!(user_id = principal.user_id, "Authenticated request");
                    req.extensions_mut().insert(principal);
                    svc.call(req).await.map(|res| res.map_into_right_body())
                }
                Err(err) => {
                    tracing::warn!(path = %req.path(), error = %err, "Rejected request");
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_left_body())
                }
            }
        })
    }
}
