//! Tenant service: owner-scoped CRUD with uniqueness checks and code
//! generation.
//!
//! Phone, ID-card and code uniqueness are enforced by querying before
//! writing. There is no transaction spanning the check and the write, so two
//! concurrent creates for the same phone can both pass; the storage layer
//! carries no unique index to catch them.

use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, ConflictCode};
use crate::core::normalize::normalize_search;
use crate::core::query::{Paginated, clamp_limit, clamp_page};
use crate::store::filter::text_search;
use crate::store::{Collection, Filter, FindOptions, MemoryCollection, StoreError};
use crate::tenants::{CreateTenant, Tenant, TenantListQuery, TenantStatus, UpdateTenant};

/// Raw fields probed by the raw-term half of the search union
const SEARCH_FIELDS: &[&str] = &["full_name", "code", "phone", "id_card"];

/// Format a non-negative integer in uppercase base36
fn base36_upper(mut n: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

/// Generate a tenant code candidate: `T-<base36 millis>-<4-digit random>`
fn generate_code() -> String {
    let timestamp = base36_upper(chrono::Utc::now().timestamp_millis());
    let random: u32 = rand::rng().random_range(1000..10000);
    format!("T-{timestamp}-{random}")
}

/// Owner-scoped tenant operations
#[derive(Clone)]
pub struct TenantService {
    tenants: Arc<dyn Collection<Tenant>>,
}

impl Default for TenantService {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantService {
    /// Create a service over a fresh in-memory collection
    pub fn new() -> Self {
        Self::with_collection(Arc::new(MemoryCollection::new()))
    }

    /// Create a service over an existing collection
    pub fn with_collection(tenants: Arc<dyn Collection<Tenant>>) -> Self {
        Self { tenants }
    }

    /// Filter selecting the owner's single live record with this id
    fn live_record(id: Uuid, owner_id: Uuid) -> Filter {
        Filter::new()
            .eq("id", id)
            .eq("owner_id", owner_id)
            .eq("is_deleted", false)
    }

    /// Build the list filter: owner scope, tombstone guard, exact scoping
    /// ids, and the two-probe search union.
    fn list_filter(owner_id: Uuid, query: &TenantListQuery) -> Filter {
        let mut filter = Filter::new().eq("owner_id", owner_id).eq("is_deleted", false);

        if let Some(status) = query.status {
            filter = filter.eq("status", status.as_str());
        }
        if let Some(room_id) = query.current_room_id {
            filter = filter.eq("current_room_id", room_id);
        }
        if let Some(search) = query.search.as_deref() {
            if let Some(probe) = text_search(search, "full_name_normalized", SEARCH_FIELDS) {
                filter = filter.and(probe);
            }
        }
        filter
    }

    /// Reject duplicates of `phone` among the owner's live tenants,
    /// excluding `exclude_id` when updating.
    async fn check_phone_free(
        &self,
        owner_id: Uuid,
        phone: &str,
        exclude_id: Option<Uuid>,
    ) -> ApiResult<()> {
        let mut filter = Filter::new()
            .eq("owner_id", owner_id)
            .eq("phone", phone)
            .eq("is_deleted", false);
        if let Some(id) = exclude_id {
            filter = filter.ne("id", id);
        }
        if self.tenants.find_one(&filter).await?.is_some() {
            return Err(ApiError::Conflict {
                code: ConflictCode::PhoneExists,
            });
        }
        Ok(())
    }

    /// Same as [`Self::check_phone_free`] for the ID card.
    async fn check_id_card_free(
        &self,
        owner_id: Uuid,
        id_card: &str,
        exclude_id: Option<Uuid>,
    ) -> ApiResult<()> {
        let mut filter = Filter::new()
            .eq("owner_id", owner_id)
            .eq("id_card", id_card)
            .eq("is_deleted", false);
        if let Some(id) = exclude_id {
            filter = filter.ne("id", id);
        }
        if self.tenants.find_one(&filter).await?.is_some() {
            return Err(ApiError::Conflict {
                code: ConflictCode::IdCardExists,
            });
        }
        Ok(())
    }

    /// Generate a code and re-query up to 5 times on collision, appending an
    /// extra random digit each round. The final candidate is used unchecked
    /// when every attempt collided.
    async fn unique_code(&self, owner_id: Uuid) -> Result<String, StoreError> {
        let mut code = generate_code();
        let mut attempts = 0;
        while attempts < 5 {
            let existing = self
                .tenants
                .find_one(
                    &Filter::new()
                        .eq("owner_id", owner_id)
                        .eq("code", code.as_str()),
                )
                .await?;
            if existing.is_none() {
                return Ok(code);
            }
            let extra: u32 = rand::rng().random_range(0..10);
            code = format!("{}{}", generate_code(), extra);
            attempts += 1;
        }
        tracing::warn!(
            owner_id = %owner_id,
            code = %code,
            "tenant code still colliding after 5 attempts, using last candidate unchecked"
        );
        Ok(code)
    }

    /// Create a tenant for the owner.
    ///
    /// Rejects a caller-supplied `RENTING` status, enforces phone/ID-card
    /// uniqueness among the owner's live tenants, generates the code and
    /// derives the normalized name.
    pub async fn create(&self, owner_id: Uuid, req: CreateTenant) -> ApiResult<Tenant> {
        if req.status == Some(TenantStatus::Renting) {
            return Err(ApiError::forbidden("Cannot manually set status to RENTING"));
        }

        self.check_phone_free(owner_id, &req.phone, None).await?;
        self.check_id_card_free(owner_id, &req.id_card, None).await?;

        let code = self.unique_code(owner_id).await?;
        let now = chrono::Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            owner_id,
            code,
            full_name_normalized: normalize_search(&req.full_name),
            full_name: req.full_name,
            phone: req.phone,
            id_card: req.id_card,
            status: req.status.unwrap_or_default(),
            current_room_id: req.current_room_id,
            email: req.email,
            address: req.address,
            note: req.note,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(tenant_id = %tenant.id, code = %tenant.code, "tenant created");
        Ok(self.tenants.insert(tenant).await?)
    }

    /// List the owner's live tenants, newest first. The page fetch and the
    /// total count run concurrently.
    pub async fn find_all(
        &self,
        owner_id: Uuid,
        query: &TenantListQuery,
    ) -> ApiResult<Paginated<Tenant>> {
        let page = clamp_page(query.page);
        let limit = clamp_limit(query.limit);
        let filter = Self::list_filter(owner_id, query);
        let options = FindOptions::page((page - 1) * limit, limit);

        let (data, total) = futures::try_join!(
            self.tenants.find(&filter, options),
            self.tenants.count(&filter)
        )?;

        Ok(Paginated::new(data, page, limit, total))
    }

    /// Fetch one live tenant owned by the caller
    pub async fn find_one(&self, id: Uuid, owner_id: Uuid) -> ApiResult<Tenant> {
        self.tenants
            .find_one(&Self::live_record(id, owner_id))
            .await?
            .ok_or(ApiError::NotFound { resource: "Tenant" })
    }

    /// Update a tenant through the external API path
    pub async fn update(&self, id: Uuid, owner_id: Uuid, req: UpdateTenant) -> ApiResult<Tenant> {
        self.apply_update(id, owner_id, req, false).await
    }

    /// System-managed update path: allows `RENTING`, used by room/contract
    /// transitions.
    pub async fn update_internal(
        &self,
        id: Uuid,
        owner_id: Uuid,
        req: UpdateTenant,
    ) -> ApiResult<Tenant> {
        self.apply_update(id, owner_id, req, true).await
    }

    async fn apply_update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        req: UpdateTenant,
        internal: bool,
    ) -> ApiResult<Tenant> {
        if !internal && req.status == Some(TenantStatus::Renting) {
            return Err(ApiError::forbidden("Cannot manually set status to RENTING"));
        }

        if let Some(phone) = req.phone.as_deref() {
            self.check_phone_free(owner_id, phone, Some(id)).await?;
        }
        if let Some(id_card) = req.id_card.as_deref() {
            self.check_id_card_free(owner_id, id_card, Some(id)).await?;
        }

        let updated = self
            .tenants
            .update_one(
                &Self::live_record(id, owner_id),
                Box::new(move |tenant: &mut Tenant| {
                    if let Some(full_name) = req.full_name {
                        tenant.full_name_normalized = normalize_search(&full_name);
                        tenant.full_name = full_name;
                    }
                    if let Some(phone) = req.phone {
                        tenant.phone = phone;
                    }
                    if let Some(id_card) = req.id_card {
                        tenant.id_card = id_card;
                    }
                    if let Some(status) = req.status {
                        tenant.status = status;
                    }
                    if let Some(room_id) = req.current_room_id {
                        tenant.current_room_id = Some(room_id);
                    }
                    if let Some(email) = req.email {
                        tenant.email = Some(email);
                    }
                    if let Some(address) = req.address {
                        tenant.address = Some(address);
                    }
                    if let Some(note) = req.note {
                        tenant.note = Some(note);
                    }
                    tenant.updated_at = chrono::Utc::now();
                }),
            )
            .await?;

        updated.ok_or(ApiError::NotFound { resource: "Tenant" })
    }

    /// Soft-delete a live tenant; its phone and ID card become reusable
    pub async fn remove(&self, id: Uuid, owner_id: Uuid) -> ApiResult<()> {
        let removed = self
            .tenants
            .update_one(
                &Self::live_record(id, owner_id),
                Box::new(|tenant: &mut Tenant| {
                    tenant.is_deleted = true;
                    tenant.updated_at = chrono::Utc::now();
                }),
            )
            .await?;

        match removed {
            Some(tenant) => {
                tracing::debug!(tenant_id = %tenant.id, "tenant soft-deleted");
                Ok(())
            }
            None => Err(ApiError::NotFound { resource: "Tenant" }),
        }
    }
}
