use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::services::SessionContext;
use crate::state::AppState;

/// Resolves the session cookie once per request. Signed-in users are stored in
/// request extensions (read them with `web::ReqData<User>`); anonymous
/// requests are answered with 401.
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                log::error!("❌ AppState is not registered");
                let res = HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "error": "Server misconfigured"
                }));
                return Ok(req.into_response(res).map_into_right_body());
            };

            let ctx = SessionContext::from_request(req.request());
            match state.sessions.current_user(&ctx).await {
                Some(user) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                None => {
                    log::warn!("🔒 Unauthenticated request to {}", req.path());
                    let res = HttpResponse::Unauthorized().json(serde_json::json!({
                        "success": false,
                        "error": "Not authenticated"
                    }));
                    Ok(req.into_response(res).map_into_right_body())
                }
            }
        })
    }
}
