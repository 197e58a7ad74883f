//! Command-line collaborator for the record core.
//!
//! # Responsibility
//! - Exercise the core contract (services, forms, sessions) from a shell.
//! - Keep output deterministic so scripts can parse it.
//!
//! Store and logging come from `SALESDESK_*` environment variables.

use clap::{Parser, Subcommand};
use log::info;
use salesdesk_core::{
    CoreConfig, Dao, DaoFactory, DataChangeListener, Department, DepartmentForm,
    DepartmentService, EditSession, Entity, EntityService, Seller, SellerForm, SellerService,
    ServiceError, SqliteDepartmentDao, SqliteSellerDao, SubmitError,
};
use std::process::ExitCode;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "salesdesk", version, about = "Manage departments and sellers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print core health and version.
    Ping,
    /// List departments ordered by id.
    Departments,
    /// List sellers ordered by id.
    Sellers {
        /// Only sellers of this department.
        #[arg(long)]
        department: Option<i64>,
    },
    /// Create a department.
    AddDepartment {
        name: String,
    },
    /// Rename an existing department.
    RenameDepartment {
        id: i64,
        name: String,
    },
    /// Delete a department that has no sellers.
    RemoveDepartment {
        id: i64,
    },
    /// Create a seller; all field errors are reported together.
    AddSeller {
        name: String,
        email: String,
        /// Birth date as dd/mm/yyyy.
        birth_date: String,
        base_salary: String,
        #[arg(long)]
        department: Option<i64>,
    },
    /// Delete a seller.
    RemoveSeller {
        id: i64,
    },
}

/// Prints the record count whenever a mutation succeeds.
struct CountLine<'a, D: Dao> {
    label: &'static str,
    service: &'a EntityService<D>,
}

impl<D: Dao> DataChangeListener for CountLine<'_, D> {
    fn on_data_changed(&self) {
        match self.service.find_all() {
            Ok(rows) => println!("{} now: {}", self.label, rows.len()),
            Err(err) => eprintln!("warning: {} refresh failed: {err}", self.label),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    if let Command::Ping = command {
        println!("salesdesk_core ping={}", salesdesk_core::ping());
        println!("salesdesk_core version={}", salesdesk_core::core_version());
        return Ok(());
    }

    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    config.start_logging().map_err(|err| err.to_string())?;
    let conn = salesdesk_core::db::open_store(&config.store).map_err(|err| err.to_string())?;
    info!("event=cli_command module=cli status=start");

    let factory = DaoFactory::new(&conn);
    let departments: DepartmentService<'_> = EntityService::new(factory.department_dao());
    let sellers: SellerService<'_> = EntityService::new(factory.seller_dao());

    match command {
        Command::Ping => Ok(()),
        Command::Departments => {
            for department in departments.find_all().map_err(describe_service)? {
                print_department(&department);
            }
            Ok(())
        }
        Command::Sellers { department } => {
            let rows = match department {
                Some(department_id) => sellers
                    .dao()
                    .find_by_department(department_id)
                    .map_err(|err| err.to_string())?,
                None => sellers.find_all().map_err(describe_service)?,
            };
            for seller in &rows {
                print_seller(seller);
            }
            Ok(())
        }
        Command::AddDepartment { name } => {
            let mut session = department_session(&departments);
            let saved = session
                .submit(&DepartmentForm { id: None, name })
                .map_err(describe_submit)?;
            print_department(&saved);
            Ok(())
        }
        Command::RenameDepartment { id, name } => {
            let mut session = department_session(&departments);
            let saved = session
                .submit(&DepartmentForm { id: Some(id), name })
                .map_err(describe_submit)?;
            print_department(&saved);
            Ok(())
        }
        Command::RemoveDepartment { id } => {
            let department = departments
                .find_by_key(id)
                .map_err(describe_service)?
                .ok_or_else(|| format!("department not found: {id}"))?;
            department_session(&departments)
                .remove(&department)
                .map_err(describe_service)
        }
        Command::AddSeller {
            name,
            email,
            birth_date,
            base_salary,
            department,
        } => {
            let form = SellerForm {
                id: None,
                name,
                email,
                birth_date,
                base_salary,
                department_id: department,
            };
            let mut session = seller_session(&sellers);
            let saved = session.submit(&form).map_err(describe_submit)?;
            print_seller(&saved);
            Ok(())
        }
        Command::RemoveSeller { id } => {
            let seller = sellers
                .find_by_key(id)
                .map_err(describe_service)?
                .ok_or_else(|| format!("seller not found: {id}"))?;
            seller_session(&sellers)
                .remove(&seller)
                .map_err(describe_service)
        }
    }
}

fn department_session<'a>(
    service: &'a DepartmentService<'a>,
) -> EditSession<'a, SqliteDepartmentDao<'a>> {
    let mut session = EditSession::new(service);
    session.subscribe(Rc::new(CountLine {
        label: "departments",
        service,
    }));
    session
}

fn seller_session<'a>(service: &'a SellerService<'a>) -> EditSession<'a, SqliteSellerDao<'a>> {
    let mut session = EditSession::new(service);
    session.subscribe(Rc::new(CountLine {
        label: "sellers",
        service,
    }));
    session
}

fn print_department(department: &Department) {
    println!(
        "{}\t{}",
        department.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
        department.name
    );
}

fn print_seller(seller: &Seller) {
    println!(
        "{}\t{}\t{}\t{}\t{:.2}\t{}",
        seller.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
        seller.name,
        seller.email,
        seller.birth_date.format("%d/%m/%Y"),
        seller.base_salary,
        seller.department_id
    );
}

fn describe_service(err: ServiceError) -> String {
    match err {
        ServiceError::Integrity(message) => format!("cannot remove record: {message}"),
        other => other.to_string(),
    }
}

fn describe_submit(err: SubmitError) -> String {
    match err {
        SubmitError::Validation(validation) => validation
            .errors()
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; "),
        SubmitError::Service(service) => describe_service(service),
    }
}
