//! Catalog service: owner-scoped CRUD over chargeable services.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult};
use crate::core::normalize::normalize_search;
use crate::core::query::{Paginated, clamp_limit, clamp_page};
use crate::services::{CreateService, Service, ServiceListQuery, UpdateService};
use crate::store::filter::text_search;
use crate::store::{Collection, Filter, FindOptions, MemoryCollection};

/// Owner-scoped catalog operations
#[derive(Clone)]
pub struct ServiceCatalog {
    services: Arc<dyn Collection<Service>>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceCatalog {
    /// Create a catalog over a fresh in-memory collection
    pub fn new() -> Self {
        Self::with_collection(Arc::new(MemoryCollection::new()))
    }

    /// Create a catalog over an existing collection
    pub fn with_collection(services: Arc<dyn Collection<Service>>) -> Self {
        Self { services }
    }

    fn live_record(id: Uuid, owner_id: Uuid) -> Filter {
        Filter::new()
            .eq("id", id)
            .eq("owner_id", owner_id)
            .eq("is_deleted", false)
    }

    fn list_filter(owner_id: Uuid, query: &ServiceListQuery) -> Filter {
        let mut filter = Filter::new().eq("owner_id", owner_id).eq("is_deleted", false);

        if let Some(is_active) = query.is_active {
            filter = filter.eq("is_active", is_active);
        }
        if let Some(building_id) = query.building_id {
            // Applies to everything, or names the building explicitly
            filter = filter.or(vec![
                Filter::new().eq("building_scope", "ALL"),
                Filter::new().contains("building_ids", building_id),
            ]);
        }
        if let Some(search) = query.search.as_deref() {
            if let Some(probe) = text_search(search, "name_normalized", &["name", "unit"]) {
                filter = filter.and(probe);
            }
        }
        filter
    }

    /// Create a catalog entry for the owner
    pub async fn create(&self, owner_id: Uuid, req: CreateService) -> ApiResult<Service> {
        let now = chrono::Utc::now();
        let service = Service {
            id: Uuid::new_v4(),
            owner_id,
            name_normalized: normalize_search(&req.name),
            name: req.name,
            unit: req.unit,
            price_type: req.price_type.unwrap_or_default(),
            fixed_price: req.fixed_price,
            price_tiers: req.price_tiers.unwrap_or_default(),
            building_scope: req.building_scope.unwrap_or_default(),
            building_ids: req.building_ids.unwrap_or_default(),
            is_active: req.is_active.unwrap_or(true),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        Ok(self.services.insert(service).await?)
    }

    /// List the owner's live services, newest first; page fetch and count
    /// run concurrently.
    pub async fn find_all(
        &self,
        owner_id: Uuid,
        query: &ServiceListQuery,
    ) -> ApiResult<Paginated<Service>> {
        let page = clamp_page(query.page);
        let limit = clamp_limit(query.limit);
        let filter = Self::list_filter(owner_id, query);
        let options = FindOptions::page((page - 1) * limit, limit);

        let (data, total) = futures::try_join!(
            self.services.find(&filter, options),
            self.services.count(&filter)
        )?;

        Ok(Paginated::new(data, page, limit, total))
    }

    /// Fetch one live service owned by the caller
    pub async fn find_one(&self, id: Uuid, owner_id: Uuid) -> ApiResult<Service> {
        self.services
            .find_one(&Self::live_record(id, owner_id))
            .await?
            .ok_or(ApiError::NotFound {
                resource: "Service",
            })
    }

    /// Update a live service; absent fields stay untouched
    pub async fn update(&self, id: Uuid, owner_id: Uuid, req: UpdateService) -> ApiResult<Service> {
        let updated = self
            .services
            .update_one(
                &Self::live_record(id, owner_id),
                Box::new(move |service: &mut Service| {
                    if let Some(name) = req.name {
                        service.name_normalized = normalize_search(&name);
                        service.name = name;
                    }
                    if let Some(unit) = req.unit {
                        service.unit = unit;
                    }
                    if let Some(price_type) = req.price_type {
                        service.price_type = price_type;
                    }
                    if let Some(fixed_price) = req.fixed_price {
                        service.fixed_price = Some(fixed_price);
                    }
                    if let Some(price_tiers) = req.price_tiers {
                        service.price_tiers = price_tiers;
                    }
                    if let Some(building_scope) = req.building_scope {
                        service.building_scope = building_scope;
                    }
                    if let Some(building_ids) = req.building_ids {
                        service.building_ids = building_ids;
                    }
                    if let Some(is_active) = req.is_active {
                        service.is_active = is_active;
                    }
                    service.updated_at = chrono::Utc::now();
                }),
            )
            .await?;

        updated.ok_or(ApiError::NotFound {
            resource: "Service",
        })
    }

    /// Soft-delete a live service
    pub async fn remove(&self, id: Uuid, owner_id: Uuid) -> ApiResult<()> {
        let removed = self
            .services
            .update_one(
                &Self::live_record(id, owner_id),
                Box::new(|service: &mut Service| {
                    service.is_deleted = true;
                    service.updated_at = chrono::Utc::now();
                }),
            )
            .await?;

        match removed {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound {
                resource: "Service",
            }),
        }
    }
}
