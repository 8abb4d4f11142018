use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use subtle::ConstantTimeEq;
use tracing::{debug, info, trace};

use crate::api::constants::TOKEN_HEADER;
use crate::api::services::catalog::{ApiResponse, ErrorCode};

/// 共享密钥校验中间件
///
/// 请求必须在 `X-Token` 头里带上与配置一致的 token。
/// 配置的 token 为空时，整组接口视为未启用并返回 404。
#[derive(Clone)]
pub struct TokenGate {
    token: Rc<str>,
}

impl TokenGate {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            token: Rc::from(token.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGateMiddleware {
            service: Rc::new(service),
            token: self.token.clone(),
        }))
    }
}

pub struct TokenGateMiddleware<S> {
    service: Rc<S>,
    token: Rc<str>,
}

impl<S, B> TokenGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    fn handle_disabled(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("API token not configured - returning 404");
        req.into_response(
            HttpResponse::NotFound()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body("Not Found")
                .map_into_right_body(),
        )
    }

    fn handle_unauthorized(
        req: ServiceRequest,
        code: ErrorCode,
        message: &str,
    ) -> ServiceResponse<EitherBody<B>> {
        info!("Token check failed for {}: {}", req.path(), message);
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: code as i32,
                    message: message.to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn extract_token(req: &ServiceRequest) -> Option<&str> {
        req.headers()
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 常量时间比较
    fn token_matches(expected: &str, presented: &str) -> bool {
        expected.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl<S, B> Service<ServiceRequest> for TokenGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let token = self.token.clone();

        Box::pin(async move {
            if token.is_empty() {
                return Ok(Self::handle_disabled(req));
            }

            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            let verdict = match Self::extract_token(&req) {
                None => Err((
                    ErrorCode::TokenMissing,
                    "Unauthorized: missing API token",
                )),
                Some(presented) if Self::token_matches(&token, presented) => Ok(()),
                Some(_) => Err((
                    ErrorCode::TokenInvalid,
                    "Unauthorized: invalid API token",
                )),
            };

            match verdict {
                Ok(()) => {
                    trace!("Token check passed for {}", req.path());
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                Err((code, message)) => Ok(Self::handle_unauthorized(req, code, message)),
            }
        })
    }
}
