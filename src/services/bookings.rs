//! Booking request handling and the admin approval workflow

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{BookingCreatedDetails, BookingStatusChangeDetails},
        booking::{overlaps, Booking, BookingDetails, CreateBooking, UpdateBookingStatus},
        enums::{AuditAction, BookingStatus, Priority},
        equipment::Equipment,
    },
    repository::{bookings::NewBooking, Repository},
};

use super::audit::AuditService;

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    audit: AuditService,
}

impl BookingsService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// Create a booking request.
    ///
    /// The requested interval must not overlap any PENDING/APPROVED booking
    /// for the same equipment. The overlap check and the insert are separate
    /// statements; two concurrent requests can both pass the check before
    /// either writes (see DESIGN.md).
    pub async fn create(&self, user_id: i32, request: CreateBooking) -> AppResult<BookingDetails> {
        if request.purpose.trim().is_empty() {
            return Err(AppError::Validation("Purpose is required".to_string()));
        }
        if request.start_time >= request.end_time {
            return Err(AppError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        let equipment = self
            .repository
            .equipment
            .get_by_id(request.equipment_id)
            .await?;
        if !equipment.is_available {
            return Err(AppError::Unavailable(
                "Equipment is not available".to_string(),
            ));
        }

        let active = self
            .repository
            .bookings
            .active_for_equipment(request.equipment_id)
            .await?;
        let has_overlap = active.iter().any(|existing| {
            overlaps(
                request.start_time,
                request.end_time,
                existing.start_time,
                existing.end_time,
            )
        });
        if has_overlap {
            return Err(AppError::Conflict(
                "Equipment is already booked for the selected time period".to_string(),
            ));
        }

        let priority = Priority::from(request.priority.clone());
        let booking = self
            .repository
            .bookings
            .insert(&NewBooking {
                user_id,
                equipment_id: request.equipment_id,
                start_time: request.start_time,
                end_time: request.end_time,
                purpose: &request.purpose,
                notes: request.notes.as_deref(),
                priority,
            })
            .await?;

        self.audit
            .record(
                user_id,
                AuditAction::BookingCreated,
                &BookingCreatedDetails {
                    booking_id: booking.id,
                    equipment_id: equipment.id,
                    equipment_name: equipment.name.clone(),
                    start_time: booking.start_time,
                    end_time: booking.end_time,
                    purpose: booking.purpose.clone(),
                },
            )
            .await;

        Ok(with_equipment_display(booking, &equipment))
    }

    /// Admin status transition: PENDING -> APPROVED/REJECTED/CANCELLED.
    ///
    /// Overlap is not re-validated here; two overlapping PENDING requests
    /// can both be approved (acknowledged policy gap).
    pub async fn update_status(
        &self,
        admin_user_id: i32,
        booking_id: i32,
        request: UpdateBookingStatus,
    ) -> AppResult<BookingDetails> {
        // PENDING is the only status with no audit action, and the only one
        // that is not a settable target.
        let action = AuditAction::for_status(request.status)
            .ok_or_else(|| AppError::Validation("Invalid status".to_string()))?;

        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let previous_status = booking.status;

        let equipment = self
            .repository
            .equipment
            .find_by_id(booking.equipment_id)
            .await?;
        let user = self.repository.users.find_by_id(booking.user_id).await?;

        let updated = self
            .repository
            .bookings
            .update_status(booking_id, request.status, request.admin_notes.as_deref())
            .await?;

        let equipment_name = equipment
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "Unknown Equipment".to_string());
        let user_name = user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        self.audit
            .record(
                admin_user_id,
                action,
                &BookingStatusChangeDetails {
                    booking_id,
                    equipment_id: updated.equipment_id,
                    equipment_name: equipment_name.clone(),
                    user_id: updated.user_id,
                    user_name: user_name.clone(),
                    previous_status,
                    new_status: updated.status,
                    admin_notes: request.admin_notes.clone(),
                },
            )
            .await;

        let mut details = match equipment {
            Some(ref e) => with_equipment_display(updated, e),
            None => with_missing_equipment(updated),
        };
        details.user_name = Some(user_name);
        details.user_email = user.as_ref().map(|u| u.email.clone());
        details.user_role = user.map(|u| u.role);
        Ok(details)
    }

    /// Bookings owned by the caller, newest first
    pub async fn my_bookings(
        &self,
        user_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list_for_user(user_id, status).await
    }

    /// Admin pending queue: high priority first, oldest first within a
    /// priority.
    pub async fn pending(&self) -> AppResult<Vec<BookingDetails>> {
        let mut bookings = self.repository.bookings.list_pending().await?;
        sort_pending_queue(&mut bookings);
        Ok(bookings)
    }

    /// All bookings (admin), optionally filtered by status, newest first
    pub async fn all(&self, status: Option<BookingStatus>) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list_all(status).await
    }
}

/// Order the pending queue by priority rank, then submission time. This
/// in-memory sort is the canonical ordering; it must match what an indexed
/// `ORDER BY priority_rank, created_at` would produce, tie-breaks included.
fn sort_pending_queue(bookings: &mut [BookingDetails]) {
    bookings.sort_by_key(|b| (b.priority.rank(), b.created_at));
}

fn with_equipment_display(booking: Booking, equipment: &Equipment) -> BookingDetails {
    BookingDetails {
        id: booking.id,
        user_id: booking.user_id,
        equipment_id: booking.equipment_id,
        start_time: booking.start_time,
        end_time: booking.end_time,
        status: booking.status,
        purpose: booking.purpose,
        notes: booking.notes,
        admin_notes: booking.admin_notes,
        priority: booking.priority,
        created_at: booking.created_at,
        updated_at: booking.updated_at,
        user_name: None,
        user_email: None,
        user_role: None,
        equipment_name: equipment.name.clone(),
        category: Some(equipment.category.clone()),
        image_url: equipment.image_url.clone(),
    }
}

fn with_missing_equipment(booking: Booking) -> BookingDetails {
    BookingDetails {
        id: booking.id,
        user_id: booking.user_id,
        equipment_id: booking.equipment_id,
        start_time: booking.start_time,
        end_time: booking.end_time,
        status: booking.status,
        purpose: booking.purpose,
        notes: booking.notes,
        admin_notes: booking.admin_notes,
        priority: booking.priority,
        created_at: booking.created_at,
        updated_at: booking.updated_at,
        user_name: None,
        user_email: None,
        user_role: None,
        equipment_name: "Unknown Equipment".to_string(),
        category: None,
        image_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn pending(id: i32, priority: Priority, created_offset_min: i64) -> BookingDetails {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let created = base + Duration::minutes(created_offset_min);
        BookingDetails {
            id,
            user_id: 1,
            equipment_id: 1,
            start_time: base + Duration::hours(24),
            end_time: base + Duration::hours(32),
            status: BookingStatus::Pending,
            purpose: "lab session".to_string(),
            notes: None,
            admin_notes: None,
            priority,
            created_at: created,
            updated_at: created,
            user_name: None,
            user_email: None,
            user_role: None,
            equipment_name: "Microscope".to_string(),
            category: Some("Lab".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn pending_queue_orders_by_priority_rank() {
        // Submitted in order low, high, medium
        let mut queue = vec![
            pending(1, Priority::Low, 0),
            pending(2, Priority::High, 1),
            pending(3, Priority::Medium, 2),
        ];
        sort_pending_queue(&mut queue);
        let ids: Vec<i32> = queue.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn equal_priority_keeps_oldest_first() {
        let mut queue = vec![
            pending(1, Priority::Medium, 30),
            pending(2, Priority::Medium, 10),
            pending(3, Priority::Medium, 20),
        ];
        sort_pending_queue(&mut queue);
        let ids: Vec<i32> = queue.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn sort_matches_indexed_ordering_on_mixed_input() {
        let mut queue = vec![
            pending(1, Priority::Low, 0),
            pending(2, Priority::Medium, 1),
            pending(3, Priority::High, 2),
            pending(4, Priority::Medium, 3),
            pending(5, Priority::High, 4),
        ];
        sort_pending_queue(&mut queue);
        let ids: Vec<i32> = queue.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 5, 2, 4, 1]);
    }
}
