//! Authorization middleware and the `Principal` extractor.
//!
//! For every request the middleware reads the session username, resolves it
//! through the [`UserDetailsService`] port, evaluates the
//! [`AuthorizationPolicy`] and either forwards the request (with the
//! [`Principal`] stored in request extensions) or answers 401/403 with the
//! JSON error envelope. Must be wrapped inside the session middleware.

use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::ports::{LookupError, UserDetailsService};
use crate::domain::{AuthorizationPolicy, Decision, Error, Principal, Requirement};

use super::session::SessionContext;

/// Middleware factory enforcing the authorization policy.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use usuarios::domain::DatabaseUserDetailsService;
/// use usuarios::inbound::http::authorization::Authorize;
/// use usuarios::outbound::persistence::InMemoryUserRepository;
///
/// let details = DatabaseUserDetailsService::new(Arc::new(InMemoryUserRepository::new()));
/// let _app = App::new().wrap(Authorize::new(Arc::new(details)));
/// ```
#[derive(Clone)]
pub struct Authorize {
    details: Arc<dyn UserDetailsService>,
    policy: AuthorizationPolicy,
}

impl Authorize {
    /// Enforce the default policy table using `details` for lookups.
    pub fn new(details: Arc<dyn UserDetailsService>) -> Self {
        Self::with_policy(details, AuthorizationPolicy::default())
    }

    /// Enforce a custom policy table.
    pub fn with_policy(details: Arc<dyn UserDetailsService>, policy: AuthorizationPolicy) -> Self {
        Self { details, policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service: Rc::new(service),
            details: Arc::clone(&self.details),
            policy: self.policy,
        }))
    }
}

/// Service wrapper produced by [`Authorize`].
pub struct AuthorizeMiddleware<S> {
    service: Rc<S>,
    details: Arc<dyn UserDetailsService>,
    policy: AuthorizationPolicy,
}

/// Resolve the session username into a principal.
///
/// A username the store no longer knows clears the session and counts as
/// anonymous.
async fn resolve_principal(
    req: &ServiceRequest,
    details: &dyn UserDetailsService,
) -> Result<Option<Principal>, Error> {
    let session = SessionContext::new(req.get_session());
    let Some(username) = session.username()? else {
        return Ok(None);
    };

    match details.load(&username).await {
        Ok(credential) => Ok(Some(credential.into_principal())),
        Err(LookupError::NotFound { username }) => {
            warn!(%username, "session refers to an unknown user; clearing it");
            session.clear();
            Ok(None)
        }
        Err(LookupError::Internal { message }) => {
            Err(Error::internal(format!("principal lookup failed: {message}")))
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let details = Arc::clone(&self.details);
        let policy = self.policy;

        Box::pin(async move {
            let method = req.method().as_str().to_owned();
            // The router matches on the percent-decoded path; so must the policy.
            let path = req.match_info().as_str().to_owned();
            let requirement = policy.requirement_for(&method, &path);

            let principal = match resolve_principal(&req, details.as_ref()).await {
                Ok(principal) => principal,
                Err(error) if requirement == Requirement::Public => {
                    warn!(%error, %path, "principal lookup failed on public path");
                    None
                }
                Err(error) => return Ok(req.error_response(error).map_into_right_body()),
            };

            match policy.evaluate(&method, &path, principal.as_ref()) {
                Decision::Permit => {
                    if let Some(principal) = principal {
                        req.extensions_mut().insert(principal);
                    }
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Decision::Unauthenticated => {
                    debug!(%method, %path, "request rejected: authentication required");
                    let error = Error::unauthorized("authentication required");
                    Ok(req.error_response(error).map_into_right_body())
                }
                Decision::Forbidden => {
                    debug!(%method, %path, "request rejected: insufficient role");
                    let error = Error::forbidden("access denied");
                    Ok(req.error_response(error).map_into_right_body())
                }
            }
        })
    }
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .cloned()
                .ok_or_else(|| Error::unauthorized("authentication required")),
        )
    }
}

#[cfg(test)]
#[path = "authorization_tests.rs"]
mod tests;
