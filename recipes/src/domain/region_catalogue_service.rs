//! Region catalogue reads and the seed import.
//!
//! Reads fail soft: a store failure is logged and the caller receives an
//! empty result, so browsing screens keep rendering. The import fails fast
//! and leaves already-written records in place.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::ports::{
    Collection, DocumentStore, DocumentStoreError, decode_document, decode_documents,
    encode_document,
};
use crate::domain::{Error, Recipe, RecipeRecord, Region, RegionId, RegionRecord};

/// Foreign-key field on recipe documents.
pub(crate) const REGION_ID_FIELD: &str = "regionId";

/// Counts of documents written by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Region documents written.
    pub regions_written: usize,
    /// Recipe documents written.
    pub recipes_written: usize,
}

/// Service exposing regions with their recipes and the admin seed import.
#[derive(Clone)]
pub struct RegionCatalogueService<S> {
    store: Arc<S>,
}

impl<S> RegionCatalogueService<S> {
    /// Create a new service over the given document store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> RegionCatalogueService<S>
where
    S: DocumentStore,
{
    /// Every region with its recipes, ordered as the store returns them.
    ///
    /// Returns an empty list when the store fails.
    pub async fn get_all_regions(&self) -> Vec<Region> {
        match self.load_all_regions().await {
            Ok(regions) => regions,
            Err(error) => {
                warn!(error = %error, "failed to load regions; returning empty catalogue");
                Vec::new()
            }
        }
    }

    /// The region with `id` and its recipes.
    ///
    /// Returns `None` when the region is absent or the store fails.
    pub async fn get_region_by_id(&self, id: &RegionId) -> Option<Region> {
        match self.load_region(id).await {
            Ok(region) => region,
            Err(error) => {
                warn!(region_id = %id, error = %error, "failed to load region");
                None
            }
        }
    }

    /// Recipes whose `regionId` equals `id`.
    ///
    /// Returns an empty list when the store fails.
    pub async fn recipes_for_region(&self, id: &RegionId) -> Vec<Recipe> {
        match self.load_recipes(id).await {
            Ok(recipes) => recipes,
            Err(error) => {
                warn!(region_id = %id, error = %error, "failed to load recipes");
                Vec::new()
            }
        }
    }

    /// Write every region and its recipes to the store.
    ///
    /// Each region record is written before its recipes; each recipe is
    /// tagged with the owning region id. Existing documents with the same ids
    /// are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] with `StoreUnavailable` (transport) or
    /// `InternalError` (encoding) for the first failed write. Earlier writes
    /// are not rolled back.
    pub async fn import_seed_data(&self, regions: &[Region]) -> Result<ImportSummary, Error> {
        let mut summary = ImportSummary::default();
        for region in regions {
            let (record, recipes) = region.clone().into_parts();
            let region_id = record.id.clone();
            self.write(Collection::Regions, region_id.as_ref(), &record)
                .await?;
            summary.regions_written += 1;

            for recipe in recipes {
                let recipe_id = recipe.id.clone();
                let tagged = RecipeRecord::new(recipe, region_id.clone());
                self.write(Collection::Recipes, recipe_id.as_ref(), &tagged)
                    .await?;
                summary.recipes_written += 1;
            }
            info!(
                region_id = %region_id,
                recipe_count = region.recipes.len(),
                "imported region"
            );
        }

        info!(
            regions_written = summary.regions_written,
            recipes_written = summary.recipes_written,
            "seed import complete"
        );
        Ok(summary)
    }

    /// Run [`Self::import_seed_data`] and report only success or failure.
    ///
    /// The failure is logged.
    pub async fn import_seed_data_reported(&self, regions: &[Region]) -> bool {
        match self.import_seed_data(regions).await {
            Ok(_) => true,
            Err(error) => {
                warn!(code = ?error.code(), error = %error, "seed import failed");
                false
            }
        }
    }

    async fn write<T: serde::Serialize>(
        &self,
        collection: Collection,
        id: &str,
        record: &T,
    ) -> Result<(), Error> {
        let document = encode_document(record).map_err(map_write_error)?;
        self.store
            .upsert_by_id(collection, id, document)
            .await
            .map_err(map_write_error)
    }

    async fn load_all_regions(&self) -> Result<Vec<Region>, DocumentStoreError> {
        let documents = self.store.list_all(Collection::Regions).await?;
        let records: Vec<RegionRecord> = decode_documents(documents)?;
        let mut regions = Vec::with_capacity(records.len());
        for record in records {
            let recipes = self.load_recipes(&record.id).await?;
            regions.push(Region::from_record(record, recipes));
        }
        Ok(regions)
    }

    async fn load_region(&self, id: &RegionId) -> Result<Option<Region>, DocumentStoreError> {
        let Some(document) = self
            .store
            .get_by_id(Collection::Regions, id.as_ref())
            .await?
        else {
            return Ok(None);
        };
        let record: RegionRecord = decode_document(document)?;
        let recipes = self.load_recipes(&record.id).await?;
        Ok(Some(Region::from_record(record, recipes)))
    }

    async fn load_recipes(&self, id: &RegionId) -> Result<Vec<Recipe>, DocumentStoreError> {
        let documents = self
            .store
            .list_by_equality(
                Collection::Recipes,
                REGION_ID_FIELD,
                &Value::String(id.to_string()),
            )
            .await?;
        let records: Vec<RecipeRecord> = decode_documents(documents)?;
        Ok(records.into_iter().map(|record| record.recipe).collect())
    }
}

fn map_write_error(error: DocumentStoreError) -> Error {
    match error {
        DocumentStoreError::Unavailable { message } => {
            Error::store_unavailable(format!("document store unavailable: {message}"))
        }
        DocumentStoreError::Decode { message } => {
            Error::internal(format!("document encoding failed: {message}"))
        }
    }
}
