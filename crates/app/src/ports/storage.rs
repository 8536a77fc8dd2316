//! Storage port — repository trait for building documents.

use std::future::Future;

use buildings_domain::building::Building;
use buildings_domain::error::BuildingsError;
use buildings_domain::id::{AreaId, BuildingId};
use buildings_domain::pattern::LikePattern;

/// A zero-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// Repository for persisting and querying [`Building`] documents.
///
/// Implementations perform no validation; that is the service's job.
pub trait BuildingRepository {
    /// Insert the building, or overwrite the stored one with the same id.
    fn save(
        &self,
        building: Building,
    ) -> impl Future<Output = Result<Building, BuildingsError>> + Send;

    /// Get a building by its key.
    fn find_by_id(
        &self,
        id: &BuildingId,
    ) -> impl Future<Output = Result<Option<Building>, BuildingsError>> + Send;

    /// Get every stored building.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send;

    /// Get all buildings whose `company_id` equals `company_id`.
    fn find_by_company_id(
        &self,
        company_id: &str,
    ) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send;

    /// Get the buildings of a company whose name matches `pattern`, ordered
    /// by name. Returns every match when `page` is `None`.
    fn find_by_company_id_and_name_like(
        &self,
        company_id: &str,
        pattern: &LikePattern,
        page: Option<PageRequest>,
    ) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send;

    /// Get the building of a company that contains `area_id` anywhere in
    /// its area tree. When several do, the one with the lowest id wins.
    fn find_by_company_and_area_id(
        &self,
        company_id: &str,
        area_id: &AreaId,
    ) -> impl Future<Output = Result<Option<Building>, BuildingsError>> + Send;

    /// Get the buildings listing `phone_number` verbatim, each at most once.
    fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send;

    /// Count the buildings owned by `company_id`.
    fn count_by_company_id(
        &self,
        company_id: &str,
    ) -> impl Future<Output = Result<u64, BuildingsError>> + Send;

    /// Remove every stored building.
    fn delete_all(&self) -> impl Future<Output = Result<(), BuildingsError>> + Send;
}
