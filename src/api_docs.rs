use crate::api;
use crate::domain::{MergedRecord, Source};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::lookup::lookup_isbn,
        api::lookup::lookup_book,
        api::translate::translate,
    ),
    components(
        schemas(
            MergedRecord,
            Source,
            api::translate::TranslateRequest,
            api::translate::TranslateResponse,
        )
    ),
    tags(
        (name = "biblioresolve", description = "ISBN metadata resolution API")
    )
)]
pub struct ApiDoc;
