//! Seller DAO backed by the `seller` table.
//!
//! # Invariants
//! - `birth_date` is stored as ISO `YYYY-MM-DD` text.
//! - Inserting or updating a seller whose department does not exist fails
//!   with a storage error from the foreign key.

use super::{
    checked_row, classify_delete_error, require_saved, require_unsaved, Dao, DaoError, DaoResult,
};
use crate::model::department::DepartmentId;
use crate::model::seller::{Seller, SellerId};
use crate::model::Entity;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};

const SELLER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    birth_date,
    base_salary,
    department_id
FROM seller";

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed seller DAO.
pub struct SqliteSellerDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSellerDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists sellers of one department ordered by identity ascending.
    pub fn find_by_department(&self, department_id: DepartmentId) -> DaoResult<Vec<Seller>> {
        self.query_sellers(
            &format!("{SELLER_SELECT_SQL} WHERE department_id = ?1 ORDER BY id ASC;"),
            [department_id],
        )
    }

    fn query_sellers(&self, sql: &str, params: impl Params) -> DaoResult<Vec<Seller>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut sellers = Vec::new();
        while let Some(row) = rows.next()? {
            sellers.push(parse_seller_row(row)?);
        }

        Ok(sellers)
    }
}

impl Dao for SqliteSellerDao<'_> {
    type Entity = Seller;

    fn insert(&self, seller: &Seller) -> DaoResult<SellerId> {
        require_unsaved(seller)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO seller (
                name,
                email,
                birth_date,
                base_salary,
                department_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                seller.name.as_str(),
                seller.email.as_str(),
                date_to_db(seller.birth_date),
                seller.base_salary,
                seller.department_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn update(&self, seller: &Seller) -> DaoResult<()> {
        let id = require_saved(seller)?;

        let changed = self.conn.execute(
            "UPDATE seller
             SET
                name = ?1,
                email = ?2,
                birth_date = ?3,
                base_salary = ?4,
                department_id = ?5
             WHERE id = ?6;",
            params![
                seller.name.as_str(),
                seller.email.as_str(),
                date_to_db(seller.birth_date),
                seller.base_salary,
                seller.department_id,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(DaoError::NotFound {
                kind: Seller::KIND,
                id,
            });
        }

        Ok(())
    }

    fn delete_by_key(&self, id: SellerId) -> DaoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx
            .execute("DELETE FROM seller WHERE id = ?1;", [id])
            .map_err(|err| classify_delete_error(Seller::KIND, id, err))?;
        if changed == 0 {
            return Err(DaoError::NotFound {
                kind: Seller::KIND,
                id,
            });
        }
        tx.commit()?;

        Ok(())
    }

    fn find_by_key(&self, id: SellerId) -> DaoResult<Option<Seller>> {
        let mut sellers =
            self.query_sellers(&format!("{SELLER_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(sellers.pop())
    }

    fn find_all(&self) -> DaoResult<Vec<Seller>> {
        self.query_sellers(&format!("{SELLER_SELECT_SQL} ORDER BY id ASC;"), [])
    }
}

fn parse_seller_row(row: &Row<'_>) -> DaoResult<Seller> {
    let id: SellerId = row.get("id")?;

    let date_text: String = row.get("birth_date")?;
    let birth_date = NaiveDate::parse_from_str(&date_text, STORED_DATE_FORMAT).map_err(|_| {
        DaoError::InvalidData(format!(
            "invalid date `{date_text}` in seller.birth_date for id {id}"
        ))
    })?;

    let seller = Seller::new(
        row.get::<_, String>("name")?,
        row.get::<_, String>("email")?,
        birth_date,
        row.get("base_salary")?,
        row.get("department_id")?,
    );
    checked_row(seller.with_id(id))
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}
