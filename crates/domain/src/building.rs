//! Building — the stored document, owned by exactly one company.

use serde::{Deserialize, Serialize};

use crate::area::{self, Area};
use crate::color::Color;
use crate::error::{BuildingsError, ValidationError};
use crate::id::{AreaId, BuildingId};

/// A building document.
///
/// Serialises to the persisted JSON shape: `id`, `name`, `companyId`,
/// `areas`, `phoneNumbers` and `color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    /// Owning company. A plain filter field, not a foreign key.
    pub company_id: String,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub color: Color,
}

impl Building {
    /// Create a builder for constructing a [`Building`].
    #[must_use]
    pub fn builder() -> BuildingBuilder {
        BuildingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingsError::Validation`] when `id`, `name` or
    /// `company_id` is empty.
    pub fn validate(&self) -> Result<(), BuildingsError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.company_id.is_empty() {
            return Err(ValidationError::EmptyCompanyId.into());
        }
        Ok(())
    }

    /// Search the whole area tree, at any depth, for an area with `id`.
    #[must_use]
    pub fn find_area(&self, id: &AreaId) -> Option<&Area> {
        area::find_in(&self.areas, id)
    }

    /// Whether an area with `id` appears anywhere in the tree.
    #[must_use]
    pub fn contains_area(&self, id: &AreaId) -> bool {
        self.find_area(id).is_some()
    }

    /// Whether `phone_number` is listed verbatim.
    #[must_use]
    pub fn has_phone_number(&self, phone_number: &str) -> bool {
        self.phone_numbers.iter().any(|n| n == phone_number)
    }

    /// Swap white and black.
    pub fn invert_color(&mut self) {
        self.color = self.color.inverted();
    }
}

/// Step-by-step builder for [`Building`].
#[derive(Debug, Default)]
pub struct BuildingBuilder {
    id: Option<BuildingId>,
    name: Option<String>,
    company_id: Option<String>,
    areas: Vec<Area>,
    phone_numbers: Vec<String>,
    color: Color,
}

impl BuildingBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<BuildingId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn company_id(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    #[must_use]
    pub fn area(mut self, area: Area) -> Self {
        self.areas.push(area);
        self
    }

    #[must_use]
    pub fn areas(mut self, areas: impl IntoIterator<Item = Area>) -> Self {
        self.areas.extend(areas);
        self
    }

    #[must_use]
    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_numbers.push(phone_number.into());
        self
    }

    #[must_use]
    pub fn phone_numbers<S: Into<String>>(mut self, numbers: impl IntoIterator<Item = S>) -> Self {
        self.phone_numbers.extend(numbers.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Consume the builder, validate, and return a [`Building`].
    ///
    /// A missing id is replaced by a freshly generated one.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingsError::Validation`] if `name` or `company_id` is
    /// missing or empty, or if an explicit id is empty.
    pub fn build(self) -> Result<Building, BuildingsError> {
        let building = Building {
            id: self.id.unwrap_or_else(BuildingId::generate),
            name: self.name.unwrap_or_default(),
            company_id: self.company_id.unwrap_or_default(),
            areas: self.areas,
            phone_numbers: self.phone_numbers,
            color: self.color,
        };
        building.validate()?;
        Ok(building)
    }
}
