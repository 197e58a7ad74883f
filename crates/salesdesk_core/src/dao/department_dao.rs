//! Department DAO backed by the `department` table.

use super::{
    checked_row, classify_delete_error, require_saved, require_unsaved, Dao, DaoError, DaoResult,
};
use crate::model::department::{Department, DepartmentId};
use crate::model::Entity;
use rusqlite::{params, Connection, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name FROM department";

/// SQLite-backed department DAO.
pub struct SqliteDepartmentDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Dao for SqliteDepartmentDao<'_> {
    type Entity = Department;

    fn insert(&self, department: &Department) -> DaoResult<DepartmentId> {
        require_unsaved(department)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO department (name) VALUES (?1);",
            [department.name.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn update(&self, department: &Department) -> DaoResult<()> {
        let id = require_saved(department)?;

        let changed = self.conn.execute(
            "UPDATE department SET name = ?1 WHERE id = ?2;",
            params![department.name.as_str(), id],
        )?;
        if changed == 0 {
            return Err(DaoError::NotFound {
                kind: Department::KIND,
                id,
            });
        }

        Ok(())
    }

    fn delete_by_key(&self, id: DepartmentId) -> DaoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx
            .execute("DELETE FROM department WHERE id = ?1;", [id])
            .map_err(|err| classify_delete_error(Department::KIND, id, err))?;
        if changed == 0 {
            return Err(DaoError::NotFound {
                kind: Department::KIND,
                id,
            });
        }
        tx.commit()?;

        Ok(())
    }

    fn find_by_key(&self, id: DepartmentId) -> DaoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> DaoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }

        Ok(departments)
    }
}

fn parse_department_row(row: &Row<'_>) -> DaoResult<Department> {
    let id: DepartmentId = row.get("id")?;
    checked_row(Department::with_id(id, row.get::<_, String>("name")?))
}
