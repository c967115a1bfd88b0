// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Embedded product catalog backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `products`: id → serialized Product (JSON bytes)
//! - `product_slug_index`: composite key (slug|id) → id
//!
//! The catalog is read-only from the API's point of view; writes happen
//! through the ingestion pipeline that owns the data directory.

use std::path::Path;

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};
use uuid::Uuid;

use crate::models::{NewProduct, Page, Pagination, Product, ProductSummary};

/// Primary table: product id → serialized Product (JSON bytes).
const PRODUCTS: TableDefinition<&str, &[u8]> = TableDefinition::new("products");

/// Index: composite key `slug|id` → product id, for slug range scans.
const SLUG_INDEX: TableDefinition<&str, &str> = TableDefinition::new("product_slug_index");

/// Default number of items per page.
const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page size cap; keeps single responses bounded.
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Sort order for card listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
}

impl SortOrder {
    /// Parse the `sortBy` query value; anything unrecognized means latest.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("oldest") => SortOrder::Oldest,
            _ => SortOrder::Latest,
        }
    }
}

/// Build a composite key for the slug index table.
fn slug_key(slug: &str, id: &str) -> String {
    format!("{slug}|{id}")
}

/// Range bounds covering every id under one slug.
fn slug_range(slug: &str) -> (String, String) {
    (format!("{slug}|"), format!("{slug}|\u{10FFFF}"))
}

/// Clamp raw pagination query values to valid ranges.
fn clamp_paging(page: Option<u64>, page_size: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}

fn paginate(page: u64, page_size: u64, total_items: u64) -> Pagination {
    let total_pages = total_items.div_ceil(page_size);
    Pagination {
        current_page: page,
        page_size,
        total_items,
        total_pages,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}

/// Embedded ACID product store.
pub struct ProductCatalog {
    db: Database,
}

impl ProductCatalog {
    /// Open (or create) the catalog database at the given path.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;
        Self::initialize(db)
    }

    /// Catalog backed by an in-memory database, for tests.
    #[cfg(test)]
    pub fn in_memory() -> CatalogResult<Self> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::initialize(db)
    }

    fn initialize(db: Database) -> CatalogResult<Self> {
        // Pre-create tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PRODUCTS)?;
            let _ = write_txn.open_table(SLUG_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert a catalog entry and its slug index row.
    pub fn insert(&self, new: NewProduct) -> CatalogResult<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            slug: new.slug,
            name: new.name,
            company: new.company,
            short_description: new.short_description,
            website: new.website,
            logo_url: new.logo_url,
            category: new.category,
            completion_percentage: new.completion_percentage.min(100),
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_vec(&product)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut products = write_txn.open_table(PRODUCTS)?;
            products.insert(product.id.as_str(), json.as_slice())?;

            let mut index = write_txn.open_table(SLUG_INDEX)?;
            index.insert(
                slug_key(&product.slug, &product.id).as_str(),
                product.id.as_str(),
            )?;
        }
        write_txn.commit()?;

        Ok(product)
    }

    /// Fetch one product by id.
    pub fn get(&self, id: &str) -> CatalogResult<Option<Product>> {
        let read_txn = self.db.begin_read()?;
        let products = read_txn.open_table(PRODUCTS)?;

        match products.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All products carrying the given slug.
    pub fn by_slug(&self, slug: &str) -> CatalogResult<Vec<Product>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(SLUG_INDEX)?;
        let products = read_txn.open_table(PRODUCTS)?;

        let (start, end) = slug_range(slug);
        let mut results = Vec::new();

        for entry in index.range(start.as_str()..end.as_str())? {
            let (_, id) = entry?;
            if let Some(guard) = products.get(id.value())? {
                results.push(serde_json::from_slice(guard.value())?);
            }
        }

        Ok(results)
    }

    /// Paginated listing in stable id order.
    pub fn list(&self, page: Option<u64>, page_size: Option<u64>) -> CatalogResult<Page<Product>> {
        let (page, page_size) = clamp_paging(page, page_size);

        let read_txn = self.db.begin_read()?;
        let products = read_txn.open_table(PRODUCTS)?;
        let total_items = products.len()?;

        let skip = page.saturating_sub(1).saturating_mul(page_size);
        let mut data = Vec::new();

        for entry in products.iter()?.skip(skip as usize).take(page_size as usize) {
            let (_, guard) = entry?;
            data.push(serde_json::from_slice(guard.value())?);
        }

        Ok(Page {
            success: true,
            data,
            pagination: paginate(page, page_size, total_items),
        })
    }

    /// Paginated card listing sorted by creation time.
    pub fn list_minimal(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
        sort: SortOrder,
    ) -> CatalogResult<Page<ProductSummary>> {
        let (page, page_size) = clamp_paging(page, page_size);

        let read_txn = self.db.begin_read()?;
        let products = read_txn.open_table(PRODUCTS)?;
        let total_items = products.len()?;

        // The catalog is small enough to sort in memory; the primary table
        // has no time-ordered index.
        let mut all: Vec<Product> = Vec::with_capacity(total_items as usize);
        for entry in products.iter()? {
            let (_, guard) = entry?;
            all.push(serde_json::from_slice(guard.value())?);
        }

        match sort {
            SortOrder::Latest => all.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => all.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        let skip = page.saturating_sub(1).saturating_mul(page_size);
        let data = all
            .into_iter()
            .skip(skip as usize)
            .take(page_size as usize)
            .map(ProductSummary::from)
            .collect();

        Ok(Page {
            success: true,
            data,
            pagination: paginate(page, page_size, total_items),
        })
    }
}
