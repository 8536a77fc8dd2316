//! `SQLite` implementation of [`BuildingRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use buildings_app::ports::{BuildingRepository, PageRequest};
use buildings_domain::building::Building;
use buildings_domain::document;
use buildings_domain::error::BuildingsError;
use buildings_domain::id::{AreaId, BuildingId};
use buildings_domain::pattern::LikePattern;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Building);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Building> {
        value.map(|w| w.0)
    }

    fn all(values: Vec<Self>) -> Vec<Building> {
        values.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let document: &str = row.try_get("document")?;
        let building: Building = document::from_json(document).map_err(|source| {
            sqlx::Error::Decode(Box::new(StorageError::Decode { id, source }))
        })?;
        Ok(Self(building))
    }
}

const UPSERT: &str = r"
    INSERT INTO buildings (id, company_id, name, phone_numbers, document)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET company_id = excluded.company_id,
        name = excluded.name,
        phone_numbers = excluded.phone_numbers,
        document = excluded.document
";

const SELECT_BY_ID: &str = "SELECT id, document FROM buildings WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, document FROM buildings ORDER BY id";
const SELECT_BY_COMPANY: &str = r"
    SELECT id, document FROM buildings
    WHERE company_id = ?
    ORDER BY id
";

const SELECT_BY_COMPANY_AND_NAME: &str = r"
    SELECT id, document FROM buildings
    WHERE company_id = ? AND name GLOB ?
    ORDER BY name, id
";

const SELECT_PAGE_BY_COMPANY_AND_NAME: &str = r"
    SELECT id, document FROM buildings
    WHERE company_id = ? AND name GLOB ?
    ORDER BY name, id
    LIMIT ? OFFSET ?
";

const SELECT_BY_PHONE_NUMBER: &str = r"
    SELECT id, document FROM buildings
    WHERE EXISTS (
        SELECT 1 FROM json_each(buildings.phone_numbers)
        WHERE json_each.value = ?
    )
    ORDER BY id
";

const COUNT_BY_COMPANY: &str = "SELECT COUNT(*) FROM buildings WHERE company_id = ?";
const DELETE_ALL: &str = "DELETE FROM buildings";

/// `SQLite`-backed building repository.
///
/// Each building is stored as one JSON document; `company_id`, `name` and
/// the phone number list are duplicated into columns for filtering and
/// ordering.
pub struct SqliteBuildingRepository {
    pool: SqlitePool,
}

impl SqliteBuildingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BuildingRepository for SqliteBuildingRepository {
    async fn save(&self, building: Building) -> Result<Building, BuildingsError> {
        let encode = |source| StorageError::Encode {
            id: building.id.clone(),
            source,
        };
        let phone_numbers = serde_json::to_string(&building.phone_numbers).map_err(encode)?;
        let document = serde_json::to_string(&building).map_err(encode)?;

        sqlx::query(UPSERT)
            .bind(building.id.as_str())
            .bind(&building.company_id)
            .bind(&building.name)
            .bind(&phone_numbers)
            .bind(&document)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        tracing::debug!(building_id = %building.id, "saved building");
        Ok(building)
    }

    async fn find_by_id(&self, id: &BuildingId) -> Result<Option<Building>, BuildingsError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self) -> Result<Vec<Building>, BuildingsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::all(rows))
    }

    async fn find_by_company_id(&self, company_id: &str) -> Result<Vec<Building>, BuildingsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_COMPANY)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::all(rows))
    }

    async fn find_by_company_id_and_name_like(
        &self,
        company_id: &str,
        pattern: &LikePattern,
        page: Option<PageRequest>,
    ) -> Result<Vec<Building>, BuildingsError> {
        let glob = pattern.to_glob();

        let rows: Vec<Wrapper> = match page {
            None => {
                sqlx::query_as(SELECT_BY_COMPANY_AND_NAME)
                    .bind(company_id)
                    .bind(&glob)
                    .fetch_all(&self.pool)
                    .await
            }
            Some(page) => {
                let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
                sqlx::query_as(SELECT_PAGE_BY_COMPANY_AND_NAME)
                    .bind(company_id)
                    .bind(&glob)
                    .bind(i64::from(page.size))
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(StorageError::from)?;

        Ok(Wrapper::all(rows))
    }

    async fn find_by_company_and_area_id(
        &self,
        company_id: &str,
        area_id: &AreaId,
    ) -> Result<Option<Building>, BuildingsError> {
        // Narrow by company in SQL, then walk each area tree in memory.
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_COMPANY)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::all(rows)
            .into_iter()
            .find(|building| building.contains_area(area_id)))
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Vec<Building>, BuildingsError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_PHONE_NUMBER)
            .bind(phone_number)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::all(rows))
    }

    async fn count_by_company_id(&self, company_id: &str) -> Result<u64, BuildingsError> {
        let (count,): (i64,) = sqlx::query_as(COUNT_BY_COMPANY)
            .bind(company_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete_all(&self) -> Result<(), BuildingsError> {
        let result = sqlx::query(DELETE_ALL)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        tracing::debug!(deleted = result.rows_affected(), "deleted all buildings");
        Ok(())
    }
}
