//! Command-line commands and their execution against the building service.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use buildings_app::ports::BuildingRepository;
use buildings_app::services::building_service::BuildingService;
use buildings_domain::building::Building;
use buildings_domain::document;
use buildings_domain::id::{AreaId, BuildingId};
use buildings_domain::pattern::LikePattern;

#[derive(Parser, Debug)]
#[command(name = "buildingctl")]
#[command(about = "Store and query building documents", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Save every building of a JSON array file
    Import { path: PathBuf },
    /// Fetch one building by id
    Get { id: String },
    /// List the buildings of a company
    Company { company_id: String },
    /// Search a company's buildings by name (`%` and `_` wildcards)
    Search {
        company_id: String,
        pattern: String,
        /// Zero-based page index
        #[arg(default_value_t = 0)]
        page: u32,
    },
    /// Find the building of a company containing an area, at any depth
    Area { company_id: String, area_id: String },
    /// List the buildings with a phone number
    Phone { number: String },
    /// Count the buildings of a company
    Count { company_id: String },
    /// Flip the colour of every building
    InvertColors,
}

impl Command {
    /// Run the command and return its result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns any service error (validation, not found, storage), or an
    /// I/O or JSON error while reading an import file.
    pub async fn run<R: BuildingRepository>(
        self,
        service: &BuildingService<R>,
    ) -> anyhow::Result<String> {
        match self {
            Self::Import { path } => render(&import(service, &path).await?),
            Self::Get { id } => render(&service.find_by_id(&BuildingId::from(id)).await?),
            Self::Company { company_id } => {
                render(&service.find_by_company_id(&company_id).await?)
            }
            Self::Search {
                company_id,
                pattern,
                page,
            } => render(
                &service
                    .find_by_company_id_and_name_like(
                        &company_id,
                        &LikePattern::from(pattern.as_str()),
                        page,
                    )
                    .await?,
            ),
            Self::Area {
                company_id,
                area_id,
            } => render(
                &service
                    .find_by_company_and_area_id(&company_id, &AreaId::from(area_id))
                    .await?,
            ),
            Self::Phone { number } => render(&service.find_by_phone_number(&number).await?),
            Self::Count { company_id } => render(&service.count_buildings(&company_id).await?),
            Self::InvertColors => render(&service.invert_colors().await?),
        }
    }
}

/// Save every building in the file, or none of them if any is invalid.
async fn import<R: BuildingRepository>(
    service: &BuildingService<R>,
    path: &Path,
) -> anyhow::Result<Vec<Building>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let buildings: Vec<Building> = document::from_json(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    for (index, building) in buildings.iter().enumerate() {
        building
            .validate()
            .with_context(|| format!("building #{index} in {} is invalid", path.display()))?;
    }

    let mut saved = Vec::with_capacity(buildings.len());
    for building in buildings {
        saved.push(service.save(building).await?);
    }
    tracing::info!(count = saved.len(), "imported buildings");
    Ok(saved)
}

fn render<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
