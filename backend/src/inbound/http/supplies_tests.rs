//! Handler tests for the donation endpoints.

use super::*;
use crate::domain::{PasswordHash, RecordId, SupplyRecord, User};
use crate::inbound::http::test_utils::{DONOR_EMAIL, StateBuilder, donor_bearer};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const RECORD_ID: &str = "65a1f0c2b3d4e5f60718293a";

#[fixture]
fn builder() -> StateBuilder {
    let mut builder = StateBuilder::default();
    builder.accept_donor_token();
    builder
}

fn record(title: &str, quantity: f64) -> SupplyRecord {
    serde_json::from_value(json!({
        "_id": RECORD_ID,
        "email": DONOR_EMAIL,
        "title": title,
        "category": "Grains",
        "quantity": quantity,
    }))
    .expect("record fixture")
}

async fn send(builder: StateBuilder, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new().app_data(builder.build()).service(
            web::scope("/api/v1")
                .service(create_supply)
                .service(list_donations)
                .service(get_donation)
                .service(update_donation)
                .service(delete_donation)
                .service(get_donor),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[rstest]
#[actix_web::test]
async fn create_stores_the_donation_for_the_token_owner(mut builder: StateBuilder) {
    builder
        .supply_commands
        .expect_create()
        .withf(|supply| {
            supply.owner().as_ref() == DONOR_EMAIL
                && supply.details().title() == "Rice"
                && supply.details().quantity().value() == 12.0
        })
        .times(1)
        .return_once(|supply| Ok(supply.into_record(RecordId::from_counter(1))));

    let (status, body) = send(
        builder,
        actix_test::TestRequest::post()
            .uri("/api/v1/create-supply")
            .insert_header(donor_bearer())
            .set_json(json!({ "title": "Rice", "category": "Grains", "quantity": "12" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": CREATED_MESSAGE }));
}

#[rstest]
#[actix_web::test]
async fn create_requires_a_token(builder: StateBuilder) {
    let (status, _) = send(
        builder,
        actix_test::TestRequest::post()
            .uri("/api/v1/create-supply")
            .set_json(json!({ "title": "Rice", "category": "Grains", "quantity": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn create_rejects_donations_for_someone_else(builder: StateBuilder) {
    let (status, body) = send(
        builder,
        actix_test::TestRequest::post()
            .uri("/api/v1/create-supply")
            .insert_header(donor_bearer())
            .set_json(json!({
                "email": "grace@example.org",
                "title": "Rice",
                "category": "Grains",
                "quantity": 1,
            })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[case(json!({ "category": "Grains", "quantity": 1 }), "title")]
#[case(json!({ "title": "Rice", "quantity": 1 }), "category")]
#[case(json!({ "title": "Rice", "category": "Grains" }), "quantity")]
#[case(json!({ "title": "Rice", "category": "Grains", "quantity": -3 }), "quantity")]
#[actix_web::test]
async fn create_validates_the_form(
    builder: StateBuilder,
    #[case] form: Value,
    #[case] field: &str,
) {
    let (status, body) = send(
        builder,
        actix_test::TestRequest::post()
            .uri("/api/v1/create-supply")
            .insert_header(donor_bearer())
            .set_json(form),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn list_returns_every_record_with_message(mut builder: StateBuilder) {
    builder
        .supplies
        .expect_list_all()
        .return_once(|| Ok(vec![record("Rice", 2.0)]));

    let (status, body) = send(builder, actix_test::TestRequest::get().uri("/api/v1/all-donation")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], LISTED_MESSAGE);
    assert_eq!(body["data"][0]["_id"], RECORD_ID);
    assert_eq!(body["data"][0]["quantity"], 2);
}

#[rstest]
#[actix_web::test]
async fn empty_lists_still_succeed(mut builder: StateBuilder) {
    builder.supplies.expect_list_all().return_once(|| Ok(Vec::new()));

    let (status, body) = send(builder, actix_test::TestRequest::get().uri("/api/v1/all-donation")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn get_rejects_malformed_ids_before_touching_the_store(builder: StateBuilder) {
    let (status, body) = send(builder, actix_test::TestRequest::get().uri("/api/v1/donation/42")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!({ "field": "id", "code": "invalid_id", "value": "42" }));
}

#[rstest]
#[actix_web::test]
async fn get_reports_missing_records(mut builder: StateBuilder) {
    builder
        .supplies
        .expect_find()
        .return_once(|_| Err(Error::not_found("Donation not found")));

    let (status, _) = send(
        builder,
        actix_test::TestRequest::get().uri(&format!("/api/v1/donation/{RECORD_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(UpdateOutcome::Modified, UPDATED_MESSAGE)]
#[case(UpdateOutcome::Unchanged, UNCHANGED_MESSAGE)]
#[actix_web::test]
async fn update_reports_whether_anything_changed(
    mut builder: StateBuilder,
    #[case] outcome: UpdateOutcome,
    #[case] message: &str,
) {
    builder
        .supply_commands
        .expect_update()
        .withf(|actor, id, details| {
            actor.as_ref() == DONOR_EMAIL && id.as_ref() == RECORD_ID && details.title() == "Oats"
        })
        .return_once(move |_, _, _| Ok(outcome));

    let (status, body) = send(
        builder,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/update-donation/{RECORD_ID}"))
            .insert_header(donor_bearer())
            .set_json(json!({ "title": "Oats", "category": "Grains", "quantity": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], message);
}

#[rstest]
#[actix_web::test]
async fn update_by_a_stranger_is_forbidden(mut builder: StateBuilder) {
    builder
        .supply_commands
        .expect_update()
        .return_once(|_, _, _| Err(Error::forbidden("You do not own this donation")));

    let (status, _) = send(
        builder,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/update-donation/{RECORD_ID}"))
            .insert_header(donor_bearer())
            .set_json(json!({ "title": "Oats", "category": "Grains", "quantity": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[case(Ok(()), StatusCode::OK)]
#[case(Err(Error::not_found("Donation not found")), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_distinguishes_missing_records(
    mut builder: StateBuilder,
    #[case] outcome: Result<(), Error>,
    #[case] expected: StatusCode,
) {
    builder
        .supply_commands
        .expect_delete()
        .return_once(move |_, _| outcome);

    let (status, _) = send(
        builder,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/delete-donation/{RECORD_ID}"))
            .insert_header(donor_bearer()),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[actix_web::test]
async fn donor_lookup_returns_the_profile(mut builder: StateBuilder) {
    builder
        .profiles
        .expect_donor_profile()
        .withf(|email| email.as_ref() == "grace@example.org")
        .return_once(|email| {
            Ok(User::new(email.clone(), "Grace", PasswordHash::new("$argon2id$stub")).profile())
        });

    let (status, body) = send(
        builder,
        actix_test::TestRequest::get()
            .uri("/api/v1/getAllSupply/grace@example.org")
            .insert_header(donor_bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], DONOR_MESSAGE);
    assert_eq!(body["data"]["name"], "Grace");
    assert!(body["data"].get("password").is_none());
}

#[rstest]
#[actix_web::test]
async fn donor_lookup_requires_a_token(builder: StateBuilder) {
    let (status, _) = send(
        builder,
        actix_test::TestRequest::get().uri("/api/v1/getAllSupply/grace@example.org"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
