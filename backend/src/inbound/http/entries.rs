//! Volunteer sign-ups and testimonials.
//!
//! ```text
//! POST /api/v1/volunteer                     (bearer)
//! GET  /api/v1/volunteer
//! POST /api/v1/dashboard/create-testimonial  (bearer)
//! ```
//!
//! Bodies are stored as given, provided they are JSON objects.

use actix_web::{HttpResponse, get, post, web};
use serde_json::Value;
use tracing::info;

use crate::domain::{ApiResult, EntryKind};
use crate::inbound::http::auth::AuthenticatedDonor;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    AckResponse, DocumentListResponse, DocumentSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::object_body;

async fn append(
    state: &HttpState,
    donor: &AuthenticatedDonor,
    kind: EntryKind,
    body: Value,
) -> ApiResult<HttpResponse> {
    let fields = object_body(body)?;
    let entry = state.entries.append(kind, fields).await?;
    info!(
        collection = kind.collection(),
        id = %entry.id,
        submitted_by = %donor.email(),
        "entry appended"
    );
    Ok(HttpResponse::Ok().json(Envelope::ack()))
}

/// Record a volunteer sign-up.
#[utoipa::path(
    post,
    path = "/api/v1/volunteer",
    request_body(content = DocumentSchema, description = "Free-form sign-up form"),
    responses(
        (status = 200, description = "Sign-up stored", body = AckResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "createVolunteer",
    security(("bearer" = []))
)]
#[post("/volunteer")]
pub async fn create_volunteer(
    state: web::Data<HttpState>,
    donor: AuthenticatedDonor,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    append(&state, &donor, EntryKind::Volunteer, payload.into_inner()).await
}

/// List volunteer sign-ups in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/volunteer",
    responses(
        (status = 200, description = "Volunteer sign-ups", body = DocumentListResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "listVolunteers",
    security([])
)]
#[get("/volunteer")]
pub async fn list_volunteers(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.entries.list(EntryKind::Volunteer).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(entries)))
}

/// Record a donor testimonial.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/create-testimonial",
    request_body(content = DocumentSchema, description = "Free-form testimonial"),
    responses(
        (status = 200, description = "Testimonial stored", body = AckResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "createTestimonial",
    security(("bearer" = []))
)]
#[post("/dashboard/create-testimonial")]
pub async fn create_testimonial(
    state: web::Data<HttpState>,
    donor: AuthenticatedDonor,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    append(&state, &donor, EntryKind::Testimonial, payload.into_inner()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entry, RecordId};
    use crate::inbound::http::test_utils::{StateBuilder, donor_bearer};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    async fn send(builder: StateBuilder, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(builder.build()).service(
                web::scope("/api/v1")
                    .service(create_volunteer)
                    .service(list_volunteers)
                    .service(create_testimonial),
            ),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[rstest]
    #[case("/api/v1/volunteer", EntryKind::Volunteer)]
    #[case("/api/v1/dashboard/create-testimonial", EntryKind::Testimonial)]
    #[actix_web::test]
    async fn entries_land_in_their_collection(#[case] uri: &str, #[case] expected: EntryKind) {
        let mut builder = StateBuilder::default();
        builder.accept_donor_token();
        builder
            .entries
            .expect_append()
            .withf(move |kind, fields| *kind == expected && fields["rating"] == 5)
            .times(1)
            .return_once(|_, fields| {
                Ok(Entry {
                    id: RecordId::from_counter(1),
                    fields,
                })
            });

        let (status, body) = send(
            builder,
            actix_test::TestRequest::post()
                .uri(uri)
                .insert_header(donor_bearer())
                .set_json(json!({ "rating": 5 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[actix_web::test]
    async fn sign_ups_require_a_token() {
        let (status, _) = send(
            StateBuilder::default(),
            actix_test::TestRequest::post()
                .uri("/api/v1/volunteer")
                .set_json(json!({ "name": "Grace" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn volunteers_are_listed_without_a_token() {
        let mut builder = StateBuilder::default();
        builder
            .entries
            .expect_list()
            .withf(|kind| *kind == EntryKind::Volunteer)
            .return_once(|_| {
                let mut fields = crate::domain::Fields::new();
                fields.insert("name".to_owned(), json!("Grace"));
                Ok(vec![Entry {
                    id: RecordId::from_counter(2),
                    fields,
                }])
            });

        let (status, body) =
            send(builder, actix_test::TestRequest::get().uri("/api/v1/volunteer")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Grace");
        assert_eq!(body["data"][0]["_id"], "000000000000000000000002");
    }
}
