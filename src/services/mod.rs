//! Business logic services

pub mod audit;
pub mod bookings;
pub mod equipment;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub equipment: equipment::EquipmentService,
    pub bookings: bookings::BookingsService,
    pub audit: audit::AuditService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let audit = audit::AuditService::new(repository.clone());
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository, audit.clone()),
            audit,
        }
    }
}
