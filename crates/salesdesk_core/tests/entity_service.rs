use chrono::NaiveDate;
use rusqlite::Connection;
use salesdesk_core::db::{open_db_in_memory, DbError};
use salesdesk_core::{
    Dao, DaoError, DaoFactory, DaoResult, Department, DepartmentService, Entity, EntityService,
    Seller, SellerService, ServiceError,
};

fn seller_in(department_id: i64) -> Seller {
    Seller::new(
        "Bob Brown",
        "bob@example.com",
        NaiveDate::from_ymd_opt(1998, 4, 21).unwrap(),
        1000.0,
        department_id,
    )
}

fn department_service(conn: &Connection) -> DepartmentService<'_> {
    EntityService::new(DaoFactory::new(conn).department_dao())
}

#[test]
fn save_without_identity_inserts_and_assigns_identity() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);

    let mut department = Department::new("Sales");
    service.save_or_update(&mut department).unwrap();

    let id = department.id().expect("identity should be assigned");
    let all = service.find_all().unwrap();
    assert!(all.iter().any(|stored| stored.id() == Some(id) && stored.name == "Sales"));
}

#[test]
fn save_with_identity_updates_without_changing_count() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);

    let mut books = Department::new("Books");
    service.save_or_update(&mut books).unwrap();
    service
        .save_or_update(&mut Department::new("Music"))
        .unwrap();
    let before = service.find_all().unwrap().len();

    books.name = "Books & Comics".to_string();
    service.save_or_update(&mut books).unwrap();

    let after = service.find_all().unwrap();
    assert_eq!(after.len(), before);
    let stored = service.find_by_key(books.id().unwrap()).unwrap().unwrap();
    assert_eq!(stored.name, "Books & Comics");
}

#[test]
fn save_with_stale_identity_is_a_persistence_error() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);

    let mut ghost = Department::with_id(31, "Ghost");
    let err = service.save_or_update(&mut ghost).unwrap_err();

    assert!(matches!(err, ServiceError::Persistence(_)));
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "department not found: 31");
    assert!(service.find_all().unwrap().is_empty());
}

#[test]
fn rejected_record_keeps_table_listable() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);
    service
        .save_or_update(&mut Department::new("Sales"))
        .unwrap();

    let mut blank = Department::new("");
    let err = service.save_or_update(&mut blank).unwrap_err();

    assert!(matches!(err, ServiceError::Persistence(DaoError::InvalidData(_))));
    assert_eq!(blank.id(), None);
    let all = service.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Sales");
}

#[test]
fn remove_referenced_department_is_integrity_error_and_keeps_record() {
    let conn = open_db_in_memory().unwrap();
    let departments = department_service(&conn);
    let sellers: SellerService<'_> = EntityService::new(DaoFactory::new(&conn).seller_dao());

    let mut sales = Department::new("Sales");
    departments.save_or_update(&mut sales).unwrap();
    sellers
        .save_or_update(&mut seller_in(sales.id().unwrap()))
        .unwrap();

    let err = departments.remove(&sales).unwrap_err();
    match &err {
        ServiceError::Integrity(message) => assert!(message.contains("still referenced")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(departments
        .find_all()
        .unwrap()
        .iter()
        .any(|stored| stored.id() == sales.id()));
}

#[test]
fn remove_deletes_unreferenced_record() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);

    let mut sales = Department::new("Sales");
    service.save_or_update(&mut sales).unwrap();
    service.remove(&sales).unwrap();

    assert!(service.find_all().unwrap().is_empty());
}

#[test]
fn remove_without_identity_fails_fast() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);

    let err = service.remove(&Department::new("Unsaved")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::MissingIdentity { kind: "department" }
    ));
}

#[test]
fn remove_stale_record_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = department_service(&conn);

    let mut sales = Department::new("Sales");
    service.save_or_update(&mut sales).unwrap();
    service.remove(&sales).unwrap();

    let err = service.remove(&sales).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn seller_with_unknown_department_is_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let sellers: SellerService<'_> = EntityService::new(DaoFactory::new(&conn).seller_dao());

    let mut orphan = seller_in(12);
    let err = sellers.save_or_update(&mut orphan).unwrap_err();

    assert!(matches!(err, ServiceError::Persistence(DaoError::Storage(_))));
    assert_eq!(orphan.id(), None);
    assert!(sellers.find_all().unwrap().is_empty());
}

struct UnreachableStoreDao;

impl Dao for UnreachableStoreDao {
    type Entity = Department;

    fn insert(&self, _entity: &Department) -> DaoResult<i64> {
        Err(unreachable_store())
    }

    fn update(&self, _entity: &Department) -> DaoResult<()> {
        Err(unreachable_store())
    }

    fn delete_by_key(&self, _id: i64) -> DaoResult<()> {
        Err(unreachable_store())
    }

    fn find_by_key(&self, _id: i64) -> DaoResult<Option<Department>> {
        Err(unreachable_store())
    }

    fn find_all(&self) -> DaoResult<Vec<Department>> {
        Err(unreachable_store())
    }
}

fn unreachable_store() -> DaoError {
    DaoError::Storage(DbError::Sqlite(rusqlite::Error::InvalidPath(
        "/unreachable/store.sqlite3".into(),
    )))
}

#[test]
fn storage_failures_keep_original_message() {
    let service = EntityService::new(UnreachableStoreDao);

    let mut department = Department::new("Sales");
    let err = service.save_or_update(&mut department).unwrap_err();

    assert!(matches!(err, ServiceError::Persistence(DaoError::Storage(_))));
    assert_eq!(err.to_string(), unreachable_store().to_string());
    assert_eq!(department.id(), None);

    let err = service.remove(&Department::with_id(1, "Sales")).unwrap_err();
    assert!(matches!(err, ServiceError::Persistence(_)));
    assert!(!err.is_not_found());
}
