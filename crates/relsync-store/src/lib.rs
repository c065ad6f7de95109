//! Relsync Storage Layer
//!
//! Implements the relationship store, catalog and item summary traits on top
//! of a single SQLite database.
//!
//! # Architecture
//!
//! - `items`: head revision data per content item
//! - `slots` / `templates`: the catalog
//! - `relationships`: one row per linked (owner revision, dependent revision, slot)
//!
//! # Examples
//!
//! ```
//! use relsync_domain::{Catalog, ContentId, ContentTypeId, ItemSummary, ItemSummaryResolver, Revision};
//! use relsync_store::SqliteStore;
//!
//! let store = SqliteStore::in_memory().unwrap();
//! store.add_slot("related", Some("ActiveAssembly")).unwrap();
//! store
//!     .put_item(&ItemSummary::new(ContentId::new(7), ContentTypeId::new(1), Revision::new(1)))
//!     .unwrap();
//!
//! assert!(store.find_slot_by_name("related").unwrap().is_some());
//! assert!(store.load_summary(ContentId::new(7)).unwrap().is_some());
//! ```

#![warn(missing_docs)]

use relsync_domain::traits::{Catalog, ItemSummaryResolver, RelationshipStore};
use relsync_domain::{
    ContentId, ContentTypeId, ItemSummary, Locator, Relationship, RelationshipFilter,
    RelationshipId, RelationshipSet, Revision, Side, Slot, SlotId, Template, TemplateId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A catalog entry with the same name already exists
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const RELATIONSHIP_COLUMNS: &str = "r.id, r.owner_id, r.owner_revision, r.dependent_id, \
     r.dependent_revision, r.slot_id, r.template_id";

/// SQLite-based implementation of the relationship store, catalog and item
/// summary resolver
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use relsync_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("relsync.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert or replace the summary of an item
    pub fn put_item(&self, summary: &ItemSummary) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO items (id, content_type, current_revision, edit_revision)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
             content_type = excluded.content_type,
             current_revision = excluded.current_revision,
             edit_revision = excluded.edit_revision",
            params![
                summary.id.value(),
                summary.content_type.value() as i64,
                summary.current_revision.value(),
                summary.edit_revision.map(|r| r.value()),
            ],
        )?;
        Ok(())
    }

    /// Register a slot
    ///
    /// Fails with [`StoreError::Duplicate`] if a slot with the name exists.
    pub fn add_slot(&self, name: &str, relationship_name: Option<&str>) -> Result<Slot, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidData("slot name may not be blank".to_string()));
        }
        if self.find_slot_by_name(name)?.is_some() {
            return Err(StoreError::Duplicate(format!("slot '{}'", name)));
        }

        self.conn.execute(
            "INSERT INTO slots (name, relationship_name) VALUES (?1, ?2)",
            params![name, relationship_name],
        )?;
        let id = SlotId::new(self.conn.last_insert_rowid() as u64);
        debug!("Added slot '{}' as {}", name, id);

        Ok(Slot::new(id, name, relationship_name.map(str::to_string)))
    }

    /// Register a template, optionally scoped to a content type
    ///
    /// Several templates may share a name as long as their content types differ.
    pub fn add_template(
        &self,
        name: &str,
        content_type: Option<ContentTypeId>,
    ) -> Result<Template, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidData("template name may not be blank".to_string()));
        }

        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM templates WHERE name = ?1 AND content_type IS ?2",
                params![name, content_type.map(|t| t.value() as i64)],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if exists {
            let scope = content_type.map_or_else(|| "any type".to_string(), |t| format!("type {}", t));
            return Err(StoreError::Duplicate(format!("template '{}' for {}", name, scope)));
        }

        self.conn.execute(
            "INSERT INTO templates (name, content_type) VALUES (?1, ?2)",
            params![name, content_type.map(|t| t.value() as i64)],
        )?;
        let id = TemplateId::new(self.conn.last_insert_rowid() as u64);
        debug!("Added template '{}' as {}", name, id);

        Ok(Template::new(id, name, content_type))
    }

    /// Number of stored relationship rows
    pub fn relationship_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM relationships", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Map a row selected with `RELATIONSHIP_COLUMNS`
    fn relationship_from_row(row: &Row<'_>) -> rusqlite::Result<Relationship> {
        let owner = Locator::new(ContentId::new(row.get(1)?), Revision::new(row.get(2)?));
        let dependent = Locator::new(ContentId::new(row.get(3)?), Revision::new(row.get(4)?));
        let slot = SlotId::new(row.get::<_, i64>(5)? as u64);
        let template = TemplateId::new(row.get::<_, i64>(6)? as u64);

        Ok(Relationship::new(owner, dependent, slot, template)
            .with_id(RelationshipId::new(row.get::<_, i64>(0)? as u64)))
    }

    fn slot_from_row(row: &Row<'_>) -> rusqlite::Result<Slot> {
        Ok(Slot::new(
            SlotId::new(row.get::<_, i64>(0)? as u64),
            row.get::<_, String>(1)?,
            row.get(2)?,
        ))
    }

    fn template_from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
        let content_type: Option<i64> = row.get(2)?;
        Ok(Template::new(
            TemplateId::new(row.get::<_, i64>(0)? as u64),
            row.get::<_, String>(1)?,
            content_type.map(|t| ContentTypeId::new(t as u64)),
        ))
    }

    /// Column prefix of a side in the relationships table
    fn side_column(side: Side) -> &'static str {
        match side {
            Side::Owner => "owner",
            Side::Dependent => "dependent",
        }
    }
}

impl RelationshipStore for SqliteStore {
    type Error = StoreError;

    fn query(&self, filter: &RelationshipFilter) -> Result<RelationshipSet, Self::Error> {
        let mut sql = format!("SELECT {} FROM relationships r", RELATIONSHIP_COLUMNS);

        for side in filter.head_revision_sides() {
            let column = Self::side_column(side);
            sql.push_str(&format!(
                " JOIN items {column}_item ON {column}_item.id = r.{column}_id
                  AND (r.{column}_revision = {column}_item.current_revision
                       OR r.{column}_revision = {column}_item.edit_revision)"
            ));
        }

        sql.push_str(" WHERE r.slot_id = ?");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(filter.slot.value() as i64)];

        if let Some(owner) = filter.owner {
            sql.push_str(" AND r.owner_id = ?");
            params.push(Box::new(owner.value()));
        }

        if let Some(dependent) = filter.dependent {
            sql.push_str(" AND r.dependent_id = ?");
            params.push(Box::new(dependent.value()));
        }

        sql.push_str(" ORDER BY r.id");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let relationships = stmt
            .query_map(&param_refs[..], Self::relationship_from_row)?
            .collect::<Result<RelationshipSet, _>>()?;

        Ok(relationships)
    }

    fn save(&self, relationships: &RelationshipSet) -> Result<(), Self::Error> {
        if relationships.is_empty() {
            return Ok(());
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO relationships
                 (owner_id, owner_revision, dependent_id, dependent_revision, slot_id, template_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for relationship in relationships {
                inserted += stmt.execute(params![
                    relationship.owner.id.value(),
                    relationship.owner.revision.value(),
                    relationship.dependent.id.value(),
                    relationship.dependent.revision.value(),
                    relationship.slot.value() as i64,
                    relationship.template.value() as i64,
                ])?;
            }
        }
        tx.commit()?;

        debug!("Saved {} of {} relationships", inserted, relationships.len());
        Ok(())
    }

    fn delete(&self, relationships: &RelationshipSet) -> Result<(), Self::Error> {
        if relationships.is_empty() {
            return Ok(());
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut removed = 0;
        {
            let mut by_id = tx.prepare("DELETE FROM relationships WHERE id = ?1")?;
            let mut by_link = tx.prepare(
                "DELETE FROM relationships
                 WHERE owner_id = ?1 AND owner_revision = ?2
                 AND dependent_id = ?3 AND dependent_revision = ?4 AND slot_id = ?5",
            )?;

            for relationship in relationships {
                removed += match relationship.id {
                    Some(id) => by_id.execute(params![id.value() as i64])?,
                    None => by_link.execute(params![
                        relationship.owner.id.value(),
                        relationship.owner.revision.value(),
                        relationship.dependent.id.value(),
                        relationship.dependent.revision.value(),
                        relationship.slot.value() as i64,
                    ])?,
                };
            }
        }
        tx.commit()?;

        debug!("Deleted {} of {} relationships", removed, relationships.len());
        Ok(())
    }
}

impl Catalog for SqliteStore {
    type Error = StoreError;

    fn find_slot_by_name(&self, name: &str) -> Result<Option<Slot>, Self::Error> {
        let slot = self
            .conn
            .query_row(
                "SELECT id, name, relationship_name FROM slots WHERE name = ?1",
                params![name],
                Self::slot_from_row,
            )
            .optional()?;
        Ok(slot)
    }

    fn find_template_by_name(&self, name: &str) -> Result<Option<Template>, Self::Error> {
        let template = self
            .conn
            .query_row(
                "SELECT id, name, content_type FROM templates WHERE name = ?1 ORDER BY id LIMIT 1",
                params![name],
                Self::template_from_row,
            )
            .optional()?;
        Ok(template)
    }

    fn find_template_by_name_and_type(
        &self,
        name: &str,
        content_type: ContentTypeId,
    ) -> Result<Option<Template>, Self::Error> {
        let template = self
            .conn
            .query_row(
                "SELECT id, name, content_type FROM templates
                 WHERE name = ?1 AND content_type = ?2 ORDER BY id LIMIT 1",
                params![name, content_type.value() as i64],
                Self::template_from_row,
            )
            .optional()?;
        Ok(template)
    }
}

impl ItemSummaryResolver for SqliteStore {
    type Error = StoreError;

    fn load_summary(&self, id: ContentId) -> Result<Option<ItemSummary>, Self::Error> {
        let summary = self
            .conn
            .query_row(
                "SELECT content_type, current_revision, edit_revision FROM items WHERE id = ?1",
                params![id.value()],
                |row| {
                    let edit_revision: Option<u32> = row.get(2)?;
                    let summary = ItemSummary::new(
                        id,
                        ContentTypeId::new(row.get::<_, i64>(0)? as u64),
                        Revision::new(row.get(1)?),
                    );
                    Ok(match edit_revision {
                        Some(revision) => summary.with_edit_revision(Revision::new(revision)),
                        None => summary,
                    })
                },
            )
            .optional()?;
        Ok(summary)
    }
}
