use actix_web::{
    dev::Payload, error::InternalError, web, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures::future::LocalBoxFuture;

use super::users::ErrorResponse;
use crate::models::UserFields;

/// Request body as user fields.
///
/// Only `application/json` bodies are parsed. A missing or empty body, or any
/// other content type, yields an empty field set; a JSON body that is not an
/// object is rejected with 400.
pub struct UserBody(pub UserFields);

impl UserBody {
    pub fn into_inner(self) -> UserFields {
        self.0
    }
}

fn is_json(req: &HttpRequest) -> bool {
    let content_type = req.content_type();
    content_type.eq_ignore_ascii_case("application/json")
}

impl FromRequest for UserBody {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let json = is_json(req);
        let req = req.clone();
        let bytes = web::Bytes::from_request(&req, payload);

        Box::pin(async move {
            let bytes = bytes.await?;

            if !json || bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(UserBody(UserFields::new()));
            }

            serde_json::from_slice::<UserFields>(&bytes)
                .map(UserBody)
                .map_err(|err| {
                    log::warn!("⚠️ Rejected body on {} {}: {}", req.method(), req.path(), err);
                    let response = HttpResponse::BadRequest().json(ErrorResponse {
                        error: "Invalid request body".to_string(),
                        details: Some(err.to_string()),
                    });
                    InternalError::from_response(err, response).into()
                })
        })
    }
}
