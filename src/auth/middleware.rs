// This file is part of the product Wanderlist.
// SPDX-FileCopyrightText: 2025-2026 Wanderlist Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpRequest};
use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc; // services are per-thread

use super::types::{AccessToken, CurrentUser};
use crate::config::ValidatedConfig;
use crate::error::ApiError;
use crate::provider::ProviderAuth;

/// Trait to add authentication accessors to HttpRequest
pub trait AuthRequest {
    fn current_user(&self) -> Option<CurrentUser>;
    fn bearer_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool;
}

impl AuthRequest for HttpRequest {
    fn current_user(&self) -> Option<CurrentUser> {
        self.extensions().get::<CurrentUser>().cloned()
    }

    fn bearer_token(&self) -> Option<String> {
        self.extensions()
            .get::<AccessToken>()
            .map(|token| token.0.clone())
    }

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Fail a handler early when no validated identity is attached.
pub fn require_auth(req: &HttpRequest) -> Result<(CurrentUser, String), ApiError> {
    match (req.current_user(), req.bearer_token()) {
        (Some(user), Some(token)) => Ok((user, token)),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Middleware that resolves the auth cookie into a [`CurrentUser`].
///
/// The token is validated against the provider's auth API on every request;
/// an invalid or expired token simply leaves the request unauthenticated and
/// lets handlers decide whether that is an error.
pub struct AuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let provider_auth = req.app_data::<Data<ProviderAuth>>().cloned();
        let config = req.app_data::<Data<ValidatedConfig>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            if let (Some(provider_auth), Some(config)) = (provider_auth, config) {
                if let Some(cookie) = req.cookie(&config.auth.cookie_name) {
                    let token = cookie.value().to_string();
                    if !token.is_empty() {
                        match provider_auth.get_user(&token).await {
                            Ok(user) => {
                                req.extensions_mut().insert(CurrentUser {
                                    id: user.id,
                                    email: user.email,
                                });
                                req.extensions_mut().insert(AccessToken(token));
                            }
                            Err(err) => {
                                // Stale cookies are routine; not worth more than debug.
                                log::debug!("Auth cookie rejected by provider: {}", err);
                            }
                        }
                    }
                }
            }

            service.call(req).await
        })
    }
}
