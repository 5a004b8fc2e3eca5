use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::TokenUserInfo;
use crate::error::AppError;

/// Extracts the verified identity placed into request extensions by
/// `AuthMiddleware`.
///
/// On routes the middleware does not cover (or if it failed to insert the
/// identity) this extractor answers with 401 rather than guessing.
#[derive(Debug, Clone)]
pub struct AuthUser(pub TokenUserInfo);

impl FromRequest for AuthUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<TokenUserInfo>().cloned() {
            Some(user_info) => ready(Ok(AuthUser(user_info))),
            None => {
                let err = AppError::Unauthorized(
                    "No authenticated identity on request. Is AuthMiddleware active?".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
