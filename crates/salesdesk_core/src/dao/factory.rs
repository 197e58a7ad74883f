//! DAO construction over one opened store.

use super::department_dao::SqliteDepartmentDao;
use super::seller_dao::SqliteSellerDao;
use rusqlite::Connection;

/// Builds DAOs sharing the connection returned by `db::open_store`.
///
/// Which store backs the DAOs is decided by `StoreConfig` when the
/// connection is opened, not here.
#[derive(Clone, Copy)]
pub struct DaoFactory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> DaoFactory<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn department_dao(&self) -> SqliteDepartmentDao<'conn> {
        SqliteDepartmentDao::new(self.conn)
    }

    pub fn seller_dao(&self) -> SqliteSellerDao<'conn> {
        SqliteSellerDao::new(self.conn)
    }
}
