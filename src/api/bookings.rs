//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, BookingQuery, CreateBooking, UpdateBookingStatus},
};

use super::AuthenticatedUser;

/// Submit a booking request
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created as PENDING", body = BookingDetails),
        (status = 400, description = "Invalid input, overlapping booking, or equipment unavailable"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state
        .services
        .bookings
        .create(claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/bookings/my",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Caller's bookings, newest first", body = Vec<BookingDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .my_bookings(claims.user_id, query.status)
        .await?;
    Ok(Json(bookings))
}

/// List pending booking requests, priority-ordered
#[utoipa::path(
    get,
    path = "/bookings/pending",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending queue: high priority first, oldest first within a priority", body = Vec<BookingDetails>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn pending_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_admin()?;

    let bookings = state.services.bookings.pending().await?;
    Ok(Json(bookings))
}

/// List all bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "All bookings, newest first", body = Vec<BookingDetails>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_admin()?;

    let bookings = state.services.bookings.all(query.status).await?;
    Ok(Json(bookings))
}

/// Approve, reject or cancel a booking request
#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Booking updated", body = BookingDetails),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBookingStatus>,
) -> AppResult<Json<BookingDetails>> {
    claims.require_admin()?;

    let booking = state
        .services
        .bookings
        .update_status(claims.user_id, id, request)
        .await?;
    Ok(Json(booking))
}
