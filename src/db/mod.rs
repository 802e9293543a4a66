pub mod dao;
mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::types::{FromSql, FromSqlError, ValueRef};
use rusqlite::Connection;

use crate::models::*;
use crate::{Error, Result};
use dao::{FromRow, SqlKind, SqlParam};

/// Handle to the project store.
///
/// One SQLite connection sits behind a mutex; each data-access call locks it
/// for exactly one transaction, and the guard releases it on every exit path.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path.parent().ok_or_else(|| {
            Error::Config(format!("database path {} has no parent directory", path.display()))
        })?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        tracing::info!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "workbench")
            .ok_or_else(|| Error::Config("could not determine data directory".to_string()))?;
        let db_path = dirs.data_dir().join("workbench.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Project operations
    // ============================================================

    /// Insert a project's five scalar columns inside one transaction and
    /// hand back the project with its generated id set.
    ///
    /// Any failure between begin and commit rolls the transaction back and
    /// surfaces as a single [`Error::Persist`] carrying the original cause.
    /// The id is assigned only after a successful commit.
    pub fn insert_project(&self, mut project: Project) -> Result<Project> {
        let conn = self.conn.lock().expect("database lock poisoned");

        dao::begin(&conn).map_err(|e| Error::Persist(Box::new(e)))?;

        match Self::insert_project_in_tx(&conn, &project) {
            Ok(project_id) => {
                project.project_id = Some(project_id);
                tracing::debug!(project_id, "Inserted project");
                Ok(project)
            }
            Err(err) => {
                if let Err(rb) = dao::rollback(&conn) {
                    tracing::warn!("Rollback after failed insert also failed: {rb}");
                }
                Err(Error::Persist(Box::new(err)))
            }
        }
    }

    /// Runs inside the transaction opened by `insert_project`; the commit is
    /// part of the fallible body so a commit failure also rolls back.
    fn insert_project_in_tx(conn: &Connection, project: &Project) -> Result<i64> {
        let mut stmt = conn.prepare(
            "INSERT INTO project (project_name, estimated_hours, actual_hours, difficulty, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        dao::bind(&mut stmt, 1, &SqlParam::text(project.project_name.clone()), SqlKind::Text)?;
        dao::bind(&mut stmt, 2, &SqlParam::decimal(project.estimated_hours), SqlKind::Decimal)?;
        dao::bind(&mut stmt, 3, &SqlParam::decimal(project.actual_hours), SqlKind::Decimal)?;
        dao::bind(&mut stmt, 4, &SqlParam::integer(project.difficulty), SqlKind::Integer)?;
        dao::bind(&mut stmt, 5, &SqlParam::text(project.notes.clone()), SqlKind::Text)?;
        stmt.raw_execute()?;
        drop(stmt);

        let project_id = dao::last_insert_id(conn, "project")?;
        dao::commit(conn)?;
        Ok(project_id)
    }

    /// Fetch one project with its materials, steps, and categories.
    ///
    /// Rows go through the generic mapper; child collections are filled from
    /// their own queries, steps ordered by `step_order`.
    pub fn fetch_project(&self, project_id: i64) -> Result<Option<Project>> {
        let conn = self.conn.lock().expect("database lock poisoned");

        let mut stmt = conn.prepare("SELECT * FROM project WHERE project_id = ?1")?;
        let mut rows = stmt.query([project_id])?;
        let mut project: Project = match rows.next()? {
            Some(row) => dao::extract(row)?,
            None => return Ok(None),
        };
        drop(rows);
        drop(stmt);

        project.materials = Self::collect(&conn, "SELECT * FROM material WHERE project_id = ?1", project_id)?;
        project.steps = Self::collect(
            &conn,
            "SELECT * FROM step WHERE project_id = ?1 ORDER BY step_order",
            project_id,
        )?;
        project.categories = Self::collect(
            &conn,
            "SELECT c.category_id, c.category_name
             FROM category c
             JOIN project_category pc ON pc.category_id = c.category_id
             WHERE pc.project_id = ?1
             ORDER BY c.category_name",
            project_id,
        )?;

        Ok(Some(project))
    }

    fn collect<T: FromRow>(conn: &Connection, sql: &str, project_id: i64) -> Result<Vec<T>> {
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([project_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(dao::extract(row)?);
        }
        Ok(items)
    }
}

// ============================================================
// Field-to-column tables
// ============================================================

impl FromRow for Project {
    const TARGET: &'static str = "Project";

    fn fields() -> &'static [&'static str] {
        // The collection fields never match a result column; extract leaves
        // their empty vecs in place.
        &[
            "project_id",
            "project_name",
            "estimated_hours",
            "actual_hours",
            "difficulty",
            "notes",
            "materials",
            "steps",
            "categories",
        ]
    }

    fn assign(&mut self, field: &str, value: ValueRef<'_>) -> std::result::Result<(), FromSqlError> {
        match field {
            "project_id" => self.project_id = Some(i64::column_result(value)?),
            "project_name" => self.project_name = Some(String::column_result(value)?),
            "estimated_hours" => self.estimated_hours = Some(dao::decimal(value)?),
            "actual_hours" => self.actual_hours = Some(dao::decimal(value)?),
            "difficulty" => self.difficulty = Some(i32::column_result(value)?),
            "notes" => self.notes = Some(String::column_result(value)?),
            _ => {}
        }
        Ok(())
    }
}

impl FromRow for Material {
    const TARGET: &'static str = "Material";

    fn fields() -> &'static [&'static str] {
        &["material_id", "project_id", "material_name", "num_required", "cost"]
    }

    fn assign(&mut self, field: &str, value: ValueRef<'_>) -> std::result::Result<(), FromSqlError> {
        match field {
            "material_id" => self.material_id = Some(i64::column_result(value)?),
            "project_id" => self.project_id = Some(i64::column_result(value)?),
            "material_name" => self.material_name = Some(String::column_result(value)?),
            "num_required" => self.num_required = Some(i32::column_result(value)?),
            "cost" => self.cost = Some(dao::decimal(value)?),
            _ => {}
        }
        Ok(())
    }
}

impl FromRow for Step {
    const TARGET: &'static str = "Step";

    fn fields() -> &'static [&'static str] {
        &["step_id", "project_id", "step_text", "step_order"]
    }

    fn assign(&mut self, field: &str, value: ValueRef<'_>) -> std::result::Result<(), FromSqlError> {
        match field {
            "step_id" => self.step_id = Some(i64::column_result(value)?),
            "project_id" => self.project_id = Some(i64::column_result(value)?),
            "step_text" => self.step_text = Some(String::column_result(value)?),
            "step_order" => self.step_order = Some(i32::column_result(value)?),
            _ => {}
        }
        Ok(())
    }
}

impl FromRow for Category {
    const TARGET: &'static str = "Category";

    fn fields() -> &'static [&'static str] {
        &["category_id", "category_name"]
    }

    fn assign(&mut self, field: &str, value: ValueRef<'_>) -> std::result::Result<(), FromSqlError> {
        match field {
            "category_id" => self.category_id = Some(i64::column_result(value)?),
            "category_name" => self.category_name = Some(String::column_result(value)?),
            _ => {}
        }
        Ok(())
    }
}
