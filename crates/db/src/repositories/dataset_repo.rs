//! Repository for the `datasets_metadata` table.

use mdip_core::types::DbId;

use super::{apply_patch, delete_by_id, fetch_all_as, fetch_optional_as, inserted_id, Assignments};
use crate::error::DbError;
use crate::gateway::Gateway;
use crate::models::dataset::{CreateDataset, Dataset, UpdateDataset};
use crate::schema::Table;
use crate::value::SqlValue;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, source, category, size";

/// Provides CRUD operations for dataset metadata.
pub struct DatasetRepo;

impl DatasetRepo {
    /// Insert a new dataset, returning its id.
    ///
    /// Missing source and category are stored empty and read back as the
    /// display defaults; a missing size is stored as 0.
    pub fn create(db: &Gateway, input: &CreateDataset) -> Result<DbId, DbError> {
        let id = inserted_id(
            db,
            "INSERT INTO datasets_metadata (name, source, category, size)
             VALUES (?, ?, ?, ?)",
            &[
                SqlValue::from(&input.name),
                SqlValue::from(input.source.as_deref().unwrap_or_default()),
                SqlValue::from(input.category.as_deref().unwrap_or_default()),
                SqlValue::Integer(input.size.unwrap_or(0)),
            ],
        )?;
        tracing::debug!(id, name = %input.name, "Dataset created");
        Ok(id)
    }

    /// List all datasets, newest id first.
    pub fn list(db: &Gateway) -> Result<Vec<Dataset>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM datasets_metadata ORDER BY id DESC");
        fetch_all_as(db, &query, &[])
    }

    /// Find a dataset by id.
    pub fn find_by_id(db: &Gateway, id: DbId) -> Result<Option<Dataset>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM datasets_metadata WHERE id = ?");
        fetch_optional_as(db, &query, &[SqlValue::Integer(id)])
    }

    /// Update a dataset. Only non-`None` fields in `input` are applied.
    pub fn update(db: &Gateway, id: DbId, input: &UpdateDataset) -> Result<u64, DbError> {
        let assignments = Assignments::new()
            .set("name", input.name.as_deref())
            .set("source", input.source.as_deref())
            .set("category", input.category.as_deref())
            .set("size", input.size);
        apply_patch(db, Table::DatasetsMetadata, id, assignments)
    }

    /// Permanently delete a dataset. Returns rows removed (0 or 1).
    pub fn delete(db: &Gateway, id: DbId) -> Result<u64, DbError> {
        delete_by_id(db, Table::DatasetsMetadata, id)
    }

    /// Datasets above the large-size threshold.
    pub fn list_large(db: &Gateway) -> Result<Vec<Dataset>, DbError> {
        Ok(Self::list(db)?
            .into_iter()
            .filter(Dataset::is_large)
            .collect())
    }

    /// Datasets in `category`, compared case-insensitively against the
    /// displayed category (so "uncategorized" matches rows without one).
    pub fn list_by_category(db: &Gateway, category: &str) -> Result<Vec<Dataset>, DbError> {
        Ok(Self::list(db)?
            .into_iter()
            .filter(|dataset| dataset.category.eq_ignore_ascii_case(category))
            .collect())
    }

    /// Sum of all dataset sizes in megabytes.
    pub fn total_size(db: &Gateway) -> Result<i64, DbError> {
        Ok(Self::list(db)?.iter().map(|dataset| dataset.size).sum())
    }
}
