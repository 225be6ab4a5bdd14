//! Webhook signature middleware for Actix Web.
//!
//! This module provides a middleware that checks the signature of incoming webhook deliveries before the handler
//! sees them.
//!
//! The processor signs each delivery over the raw request body with the endpoint's shared webhook secret, and sends
//! the result in the `Stripe-Signature` header. Verification must therefore happen on the raw bytes, before any JSON
//! parsing; the middleware extracts the body, verifies it, and re-injects it as the request payload for the handler.
//!
//! Wrap the webhook resource with this middleware; nothing else on the server needs it.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_http::h1;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorBadRequest,
    web,
    Error,
};
use cbr_common::Secret;
use futures::future::LocalBoxFuture;
use log::{trace, warn};
use stripe_tools::webhook::{verify_signature, SIGNATURE_HEADER};

use crate::errors::ServerError;

pub struct StripeSigMiddlewareFactory {
    secret: Secret<String>,
    // If false, then the middleware will not check the signature and always allow the call
    enabled: bool,
}

impl StripeSigMiddlewareFactory {
    pub fn new(secret: Secret<String>, enabled: bool) -> Self {
        StripeSigMiddlewareFactory { secret, enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for StripeSigMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = StripeSigMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StripeSigMiddlewareService {
            secret: self.secret.clone(),
            enabled: self.enabled,
            service: Rc::new(service),
        }))
    }
}

pub struct StripeSigMiddlewareService<S> {
    secret: Secret<String>,
    enabled: bool,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for StripeSigMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let secret = self.secret.clone();
        let enabled = self.enabled;
        Box::pin(async move {
            trace!("🔐️ Checking webhook signature for request");
            if !enabled {
                trace!("🔐️ Signature checks are disabled. Allowing request.");
                return service.call(req).await;
            }
            let header = req
                .headers()
                .get(SIGNATURE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| {
                    warn!("🔐️ No signature header found in webhook request. Denying access.");
                    Error::from(ServerError::InvalidSignature)
                })?;
            let data = req.extract::<web::Bytes>().await.map_err(|e| {
                warn!("🔐️ Failed to extract request data: {:?}", e);
                ErrorBadRequest("Failed to extract request data.")
            })?;
            match verify_signature(&secret, &header, data.as_ref()) {
                Ok(()) => {
                    trace!("🔐️ Webhook signature check for request ✅️");
                    req.set_payload(bytes_to_payload(data));
                    service.call(req).await
                },
                Err(e) => {
                    warn!("🔐️ Webhook signature rejected: {e}. Denying access.");
                    Err(Error::from(ServerError::InvalidSignature))
                },
            }
        })
    }
}

fn bytes_to_payload(buf: web::Bytes) -> Payload {
    let (_, mut pl) = h1::Payload::create(true);
    pl.unread_data(buf);
    Payload::from(pl)
}
