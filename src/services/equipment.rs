//! Equipment catalog service

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List available equipment. Category filters in the store; the search
    /// term is a substring match applied in memory over name and
    /// description, preserving the name ordering of the fetched set.
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let equipment = self
            .repository
            .equipment
            .list_available(query.category.as_deref())
            .await?;

        let Some(search) = query.search.as_deref() else {
            return Ok(equipment);
        };
        let needle = search.to_lowercase();

        Ok(equipment
            .into_iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item
                        .description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        if data.name.trim().is_empty() || data.category.trim().is_empty() {
            return Err(AppError::Validation(
                "Name, category, and quantity are required".to_string(),
            ));
        }
        if data.quantity < 1 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn set_availability(&self, id: i32, is_available: bool) -> AppResult<Equipment> {
        self.repository.equipment.set_availability(id, is_available).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
