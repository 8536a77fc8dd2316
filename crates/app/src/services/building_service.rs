//! Building service — use-cases for storing and querying buildings.

use buildings_domain::building::Building;
use buildings_domain::error::{BuildingsError, NotFoundError};
use buildings_domain::id::{AreaId, BuildingId};
use buildings_domain::pattern::LikePattern;

use crate::ports::{BuildingRepository, PageRequest};

/// Page size used when paging is left at its default.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// How name searches are split into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Every match is returned and the page index is ignored.
    Disabled,
    /// Pages of `size` buildings, ordered by name.
    Fixed { size: u32 },
}

impl Default for Paging {
    fn default() -> Self {
        Self::Fixed {
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paging {
    /// Translate a zero-based page index into the form the repository expects.
    #[must_use]
    pub fn request(self, page: u32) -> Option<PageRequest> {
        match self {
            Self::Disabled => None,
            Self::Fixed { size } => Some(PageRequest::new(page, size)),
        }
    }
}

/// Application service for building documents.
///
/// A thin facade over [`BuildingRepository`]: it validates payloads before
/// they are written and translates page indexes, nothing more.
pub struct BuildingService<R> {
    repo: R,
    paging: Paging,
}

impl<R: BuildingRepository> BuildingService<R> {
    /// Create a new service backed by the given repository, with default paging.
    pub fn new(repo: R) -> Self {
        Self::with_paging(repo, Paging::default())
    }

    pub fn with_paging(repo: R, paging: Paging) -> Self {
        Self { repo, paging }
    }

    /// Borrow the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validate and upsert a building.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingsError::Validation`] if invariants fail, in which
    /// case nothing is written, or a storage error from the repository.
    #[tracing::instrument(skip(self, building), fields(building_id = %building.id))]
    pub async fn save(&self, building: Building) -> Result<Building, BuildingsError> {
        building.validate()?;
        self.repo.save(building).await
    }

    /// Look up a building by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingsError::NotFound`] when no building with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: &BuildingId) -> Result<Building, BuildingsError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Building",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the buildings of a company.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_company_id(
        &self,
        company_id: &str,
    ) -> Result<Vec<Building>, BuildingsError> {
        self.repo.find_by_company_id(company_id).await
    }

    /// Search a company's buildings by name pattern, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, pattern), fields(pattern = %pattern))]
    pub async fn find_by_company_id_and_name_like(
        &self,
        company_id: &str,
        pattern: &LikePattern,
        page: u32,
    ) -> Result<Vec<Building>, BuildingsError> {
        let request = self.paging.request(page);
        self.repo
            .find_by_company_id_and_name_like(company_id, pattern, request)
            .await
    }

    /// Find the company's building containing `area_id` at any depth.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingsError::NotFound`] when no building of the company
    /// contains that area, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_company_and_area_id(
        &self,
        company_id: &str,
        area_id: &AreaId,
    ) -> Result<Building, BuildingsError> {
        self.repo
            .find_by_company_and_area_id(company_id, area_id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Building",
                    id: format!("{company_id}/area:{area_id}"),
                }
                .into()
            })
    }

    /// List the buildings reachable at `phone_number`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Vec<Building>, BuildingsError> {
        self.repo.find_by_phone_number(phone_number).await
    }

    /// Count the buildings of a company.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn count_buildings(&self, company_id: &str) -> Result<u64, BuildingsError> {
        self.repo.count_by_company_id(company_id).await
    }

    /// Flip the colour of every stored building and persist the result.
    ///
    /// Each document is written separately; concurrent writers may
    /// interleave with this pass.
    ///
    /// # Errors
    ///
    /// Returns the first storage error; buildings saved before it stay
    /// inverted.
    #[tracing::instrument(skip(self))]
    pub async fn invert_colors(&self) -> Result<Vec<Building>, BuildingsError> {
        let buildings = self.repo.find_all().await?;
        let mut updated = Vec::with_capacity(buildings.len());
        for mut building in buildings {
            building.invert_color();
            updated.push(self.repo.save(building).await?);
        }
        tracing::info!(count = updated.len(), "inverted building colors");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildings_domain::area::Area;
    use buildings_domain::color::Color;
    use buildings_domain::error::ValidationError;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryBuildingRepo {
        store: Mutex<BTreeMap<BuildingId, Building>>,
    }

    impl InMemoryBuildingRepo {
        fn filtered(&self, predicate: impl Fn(&Building) -> bool) -> Vec<Building> {
            let store = self.store.lock().unwrap();
            store.values().filter(|&b| predicate(b)).cloned().collect()
        }
    }

    impl BuildingRepository for InMemoryBuildingRepo {
        fn save(
            &self,
            building: Building,
        ) -> impl Future<Output = Result<Building, BuildingsError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(building.id.clone(), building.clone());
            async { Ok(building) }
        }

        fn find_by_id(
            &self,
            id: &BuildingId,
        ) -> impl Future<Output = Result<Option<Building>, BuildingsError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(id).cloned();
            async { Ok(result) }
        }

        fn find_all(&self) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send {
            let result = self.filtered(|_| true);
            async { Ok(result) }
        }

        fn find_by_company_id(
            &self,
            company_id: &str,
        ) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send {
            let result = self.filtered(|b| b.company_id == company_id);
            async { Ok(result) }
        }

        fn find_by_company_id_and_name_like(
            &self,
            company_id: &str,
            pattern: &LikePattern,
            page: Option<PageRequest>,
        ) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send {
            let mut result =
                self.filtered(|b| b.company_id == company_id && pattern.matches(&b.name));
            result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            if let Some(page) = page {
                result = result
                    .into_iter()
                    .skip(usize::try_from(page.offset()).unwrap())
                    .take(page.size as usize)
                    .collect();
            }
            async { Ok(result) }
        }

        fn find_by_company_and_area_id(
            &self,
            company_id: &str,
            area_id: &AreaId,
        ) -> impl Future<Output = Result<Option<Building>, BuildingsError>> + Send {
            let result = self
                .filtered(|b| b.company_id == company_id && b.contains_area(area_id))
                .into_iter()
                .next();
            async { Ok(result) }
        }

        fn find_by_phone_number(
            &self,
            phone_number: &str,
        ) -> impl Future<Output = Result<Vec<Building>, BuildingsError>> + Send {
            let result = self.filtered(|b| b.has_phone_number(phone_number));
            async { Ok(result) }
        }

        fn count_by_company_id(
            &self,
            company_id: &str,
        ) -> impl Future<Output = Result<u64, BuildingsError>> + Send {
            let result = self.filtered(|b| b.company_id == company_id).len() as u64;
            async move { Ok(result) }
        }

        fn delete_all(&self) -> impl Future<Output = Result<(), BuildingsError>> + Send {
            self.store.lock().unwrap().clear();
            async { Ok(()) }
        }
    }

    fn make_service() -> BuildingService<InMemoryBuildingRepo> {
        BuildingService::new(InMemoryBuildingRepo::default())
    }

    fn building(id: &str, name: &str, company_id: &str) -> Building {
        Building::builder()
            .id(id)
            .name(name)
            .company_id(company_id)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_save_and_find_building_by_id() {
        let svc = make_service();
        let saved = svc
            .save(building("building::1", "couchbase", "company::2"))
            .await
            .unwrap();

        let fetched = svc.find_by_id(&saved.id).await.unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn should_overwrite_building_with_same_id() {
        let svc = make_service();
        svc.save(building("building::1", "old", "company::2"))
            .await
            .unwrap();
        svc.save(building("building::1", "new", "company::2"))
            .await
            .unwrap();

        let fetched = svc.find_by_id(&BuildingId::from("building::1")).await.unwrap();
        assert_eq!(fetched.name, "new");
        assert_eq!(svc.count_buildings("company::2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_reject_save_without_writing_when_name_is_empty() {
        let svc = make_service();
        let mut invalid = building("building::1", "couchbase", "company::2");
        invalid.name = String::new();

        let result = svc.save(invalid).await;
        assert!(matches!(
            result,
            Err(BuildingsError::Validation(ValidationError::EmptyName))
        ));

        let lookup = svc.find_by_id(&BuildingId::from("building::1")).await;
        assert!(matches!(lookup, Err(BuildingsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_building_missing() {
        let svc = make_service();
        let result = svc.find_by_id(&BuildingId::from("nope")).await;
        assert!(matches!(result, Err(BuildingsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_translate_page_index_into_fixed_pages() {
        let svc = BuildingService::with_paging(
            InMemoryBuildingRepo::default(),
            Paging::Fixed { size: 2 },
        );
        for (id, name) in [("b1", "cou-a"), ("b2", "cou-b"), ("b3", "cou-c")] {
            svc.save(building(id, name, "company::2")).await.unwrap();
        }
        let pattern = LikePattern::from("cou%");

        let first = svc
            .find_by_company_id_and_name_like("company::2", &pattern, 0)
            .await
            .unwrap();
        let second = svc
            .find_by_company_id_and_name_like("company::2", &pattern, 1)
            .await
            .unwrap();

        let names = |page: &[Building]| page.iter().map(|b| b.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first), vec!["cou-a", "cou-b"]);
        assert_eq!(names(&second), vec!["cou-c"]);
    }

    #[tokio::test]
    async fn should_return_every_match_when_paging_disabled() {
        let svc = BuildingService::with_paging(InMemoryBuildingRepo::default(), Paging::Disabled);
        for i in 0..25 {
            svc.save(building(&format!("b{i}"), &format!("cou{i:02}"), "company::2"))
                .await
                .unwrap();
        }

        let all = svc
            .find_by_company_id_and_name_like("company::2", &LikePattern::from("cou%"), 7)
            .await
            .unwrap();
        assert_eq!(all.len(), 25);
    }

    #[tokio::test]
    async fn should_find_building_by_nested_area() {
        let svc = make_service();
        let target = Building::builder()
            .id("building::1")
            .name("couchbase")
            .company_id("company::2")
            .area(Area::new("ref1", "ref1name").with_child(Area::new("ref1ref1", "ref1ref1name")))
            .build()
            .unwrap();
        svc.save(target.clone()).await.unwrap();
        svc.save(building("building::2", "other", "company::2"))
            .await
            .unwrap();

        let found = svc
            .find_by_company_and_area_id("company::2", &AreaId::from("ref1ref1"))
            .await
            .unwrap();
        assert_eq!(found, target);
    }

    #[tokio::test]
    async fn should_return_not_found_when_area_belongs_to_other_company() {
        let svc = make_service();
        svc.save(
            Building::builder()
                .id("building::1")
                .name("couchbase")
                .company_id("company::2")
                .area(Area::new("ref1", "ref1name"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let result = svc
            .find_by_company_and_area_id("company::9", &AreaId::from("ref1"))
            .await;
        assert!(matches!(result, Err(BuildingsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_invert_every_color() {
        let svc = make_service();
        let mut black = building("building::1", "dark", "company::2");
        black.color = Color::Black;
        svc.save(black).await.unwrap();
        svc.save(building("building::2", "light", "company::2"))
            .await
            .unwrap();

        let updated = svc.invert_colors().await.unwrap();
        assert_eq!(updated.len(), 2);

        let dark = svc.find_by_id(&BuildingId::from("building::1")).await.unwrap();
        let light = svc.find_by_id(&BuildingId::from("building::2")).await.unwrap();
        assert_eq!(dark.color, Color::White);
        assert_eq!(light.color, Color::Black);
    }

    #[tokio::test]
    async fn should_count_only_matching_company() {
        let svc = make_service();
        svc.save(building("b1", "one", "company::2")).await.unwrap();
        svc.save(building("b2", "two", "company::2")).await.unwrap();
        svc.save(building("b3", "three", "company::5"))
            .await
            .unwrap();

        assert_eq!(svc.count_buildings("company::2").await.unwrap(), 2);
    }

    #[test]
    fn should_default_to_pages_of_twenty() {
        assert_eq!(Paging::default().request(2), Some(PageRequest::new(2, 20)));
        assert_eq!(Paging::Disabled.request(2), None);
    }
}
