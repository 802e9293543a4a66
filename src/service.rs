use crate::db::Database;
use crate::models::Project;
use crate::Result;

/// Thin service layer between the shell and the data layer.
#[derive(Clone)]
pub struct ProjectService {
    db: Database,
}

impl ProjectService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new project and return it with its generated id.
    pub fn add_project(&self, project: Project) -> Result<Project> {
        self.db.insert_project(project)
    }

    /// Look up a project and its child collections by id.
    pub fn fetch_project(&self, project_id: i64) -> Result<Option<Project>> {
        self.db.fetch_project(project_id)
    }
}
