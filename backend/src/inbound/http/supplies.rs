//! Donation ("supply") handlers.
//!
//! ```text
//! POST   /api/v1/create-supply            (bearer)
//! GET    /api/v1/all-donation
//! GET    /api/v1/donation/{id}
//! PUT    /api/v1/update-donation/{id}     (bearer, owner only)
//! DELETE /api/v1/delete-donation/{id}     (bearer, owner only)
//! GET    /api/v1/getAllSupply/{email}     (bearer)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Error, Fields, NewSupply, Quantity, SupplyDetails, SupplyValidationError,
    UpdateOutcome,
};
use crate::inbound::http::auth::AuthenticatedDonor;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    AckResponse, ErrorSchema, ProfileResponse, SupplyListResponse, SupplyResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_email, parse_record_id, supply_error};

pub(crate) const CREATED_MESSAGE: &str = "Donation added Successfully";
pub(crate) const LISTED_MESSAGE: &str = "Donations are retrieve Successfully";
pub(crate) const FOUND_MESSAGE: &str = "Donation is retrieve Successfully";
pub(crate) const UPDATED_MESSAGE: &str = "Donation is updated Successfully";
pub(crate) const UNCHANGED_MESSAGE: &str = "Donation is unchanged";
pub(crate) const DELETED_MESSAGE: &str = "Donation is deleted Successfully";
pub(crate) const DONOR_MESSAGE: &str = "Donor Information is retrieve Successfully";

/// Donation form used by create and update.
///
/// `quantity` accepts numbers or numeric strings. On create, members beyond
/// the declared ones are stored with the record; update replaces only
/// `title`, `category`, `description` and `quantity`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplyRequest {
    #[serde(default)]
    #[schema(example = "Rice")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Grains")]
    pub category: String,
    #[serde(default)]
    #[schema(example = "Two sacks of basmati")]
    pub description: String,
    #[schema(value_type = Option<f64>, example = 12)]
    pub quantity: Option<Quantity>,
    /// Must match the token's email when present.
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Fields,
}

impl SupplyRequest {
    fn details(&self) -> Result<SupplyDetails, Error> {
        let quantity = self
            .quantity
            .ok_or_else(|| supply_error(SupplyValidationError::InvalidQuantity))?;
        SupplyDetails::try_new(&self.title, &self.category, &self.description, quantity)
            .map_err(supply_error)
    }
}

/// Record a donation owned by the authenticated donor.
#[utoipa::path(
    post,
    path = "/api/v1/create-supply",
    request_body = SupplyRequest,
    responses(
        (status = 200, description = "Donation stored", body = AckResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Body email differs from the token", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "createSupply",
    security(("bearer" = []))
)]
#[post("/create-supply")]
pub async fn create_supply(
    state: web::Data<HttpState>,
    donor: AuthenticatedDonor,
    payload: web::Json<SupplyRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    if let Some(email) = request.email.as_deref().map(str::trim) {
        if email != donor.email().as_ref() {
            return Err(Error::forbidden(
                "Donations can only be created for your own account",
            ));
        }
    }
    let details = request.details()?;
    let supply = NewSupply::new(donor.into_email(), details).with_extra(request.extra);
    state.supply_commands.create(supply).await?;
    Ok(HttpResponse::Ok().json(Envelope::message(CREATED_MESSAGE)))
}

/// List every donation in store order.
#[utoipa::path(
    get,
    path = "/api/v1/all-donation",
    responses(
        (status = 200, description = "All donations", body = SupplyListResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "listDonations",
    security([])
)]
#[get("/all-donation")]
pub async fn list_donations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state.supplies.list_all().await?;
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(LISTED_MESSAGE, records)))
}

/// Fetch one donation.
#[utoipa::path(
    get,
    path = "/api/v1/donation/{id}",
    params(("id" = String, Path, description = "24-digit hex record id")),
    responses(
        (status = 200, description = "Donation", body = SupplyResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such donation", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "getDonation",
    security([])
)]
#[get("/donation/{id}")]
pub async fn get_donation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let record = state.supplies.find(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(FOUND_MESSAGE, record)))
}

/// Replace the details of a donation owned by the caller.
#[utoipa::path(
    put,
    path = "/api/v1/update-donation/{id}",
    params(("id" = String, Path, description = "24-digit hex record id")),
    request_body = SupplyRequest,
    responses(
        (status = 200, description = "Updated or unchanged", body = AckResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller does not own the donation", body = ErrorSchema),
        (status = 404, description = "No such donation", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "updateDonation",
    security(("bearer" = []))
)]
#[put("/update-donation/{id}")]
pub async fn update_donation(
    state: web::Data<HttpState>,
    donor: AuthenticatedDonor,
    path: web::Path<String>,
    payload: web::Json<SupplyRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    let details = payload.details()?;
    let message = match state
        .supply_commands
        .update(donor.email(), &id, details)
        .await?
    {
        UpdateOutcome::Modified => UPDATED_MESSAGE,
        UpdateOutcome::Unchanged => UNCHANGED_MESSAGE,
        UpdateOutcome::NotFound => return Err(Error::not_found("Donation not found")),
    };
    Ok(HttpResponse::Ok().json(Envelope::message(message)))
}

/// Delete a donation owned by the caller.
#[utoipa::path(
    delete,
    path = "/api/v1/delete-donation/{id}",
    params(("id" = String, Path, description = "24-digit hex record id")),
    responses(
        (status = 200, description = "Deleted", body = AckResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller does not own the donation", body = ErrorSchema),
        (status = 404, description = "No such donation", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "deleteDonation",
    security(("bearer" = []))
)]
#[delete("/delete-donation/{id}")]
pub async fn delete_donation(
    state: web::Data<HttpState>,
    donor: AuthenticatedDonor,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(&path)?;
    state.supply_commands.delete(donor.email(), &id).await?;
    Ok(HttpResponse::Ok().json(Envelope::message(DELETED_MESSAGE)))
}

/// Look up a donor's public profile by email.
#[utoipa::path(
    get,
    path = "/api/v1/getAllSupply/{email}",
    params(("email" = String, Path, description = "Donor email")),
    responses(
        (status = 200, description = "Donor profile", body = ProfileResponse),
        (status = 400, description = "Malformed email", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such donor", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "getDonor",
    security(("bearer" = []))
)]
#[get("/getAllSupply/{email}")]
pub async fn get_donor(
    state: web::Data<HttpState>,
    _donor: AuthenticatedDonor,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&path)?;
    let profile = state.profiles.donor_profile(&email).await?;
    Ok(HttpResponse::Ok().json(Envelope::data_with_message(DONOR_MESSAGE, profile)))
}

#[cfg(test)]
#[path = "supplies_tests.rs"]
mod tests;
