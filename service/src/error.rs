use log::error;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::{JsonSchema, Map};
use rocket_okapi::response::OpenApiResponderInner;
use sea_orm::DbErr;
use std::fmt::{Debug, Display, Formatter};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Responder, Clone, PartialEq)]
pub enum GenericError {
    /// Input broke a rule before anything was written
    #[response(status = 422)]
    Validation(String),
    /// Deletion refused because other rows still point at the target
    #[response(status = 409)]
    ReferentialBlock(String),
    #[response(status = 404)]
    NotFound(String),
    /// A blocking store call failed
    #[response(status = 500)]
    Store(String),
}

impl GenericError {
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::ReferentialBlock(msg)
            | Self::NotFound(msg)
            | Self::Store(msg) => msg,
        }
    }
}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GenericError {}

impl From<DbErr> for GenericError {
    fn from(e: DbErr) -> Self {
        error!("Encountered db err: {:#?}", e);
        Self::Store(e.to_string())
    }
}

impl OpenApiResponderInner for GenericError {
    fn responses(_: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                The player, team or tournament asked for does not exist.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "409".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [409 Conflict](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/409)\n\
                The row is still referenced by other rows and was not deleted. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "422".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [422 Unprocessable Entity](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422)\n\
                The request broke a rule, e.g. duplicate or non-contiguous placements. Nothing was written. \
                ".to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                A required database step failed. Steps that already ran are not rolled back. \
                ".to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}
