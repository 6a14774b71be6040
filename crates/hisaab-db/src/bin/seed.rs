//! # Seed Data Generator
//!
//! Populates the database with heads, employees, receipts and one month of
//! salary payments for development.
//!
//! ## Usage
//! ```bash
//! # Uses HISAAB_DB_PATH or ./hisaab.db
//! cargo run -p hisaab-db --bin seed
//!
//! # Specify database path
//! cargo run -p hisaab-db --bin seed -- --db ./data/hisaab_dev.db
//! ```

use std::env;

use hisaab_core::{HeadKind, Money, NewEmployee, NewPayment, NewReceipt, SALARY_HEAD_NAME};
use hisaab_db::{init_tracing, Database, StoreConfig};

const INCOME_HEADS: &[&str] = &["Fees", "Donations", "Zakat", "Sadaqah"];
const EXPENSE_HEADS: &[&str] = &[SALARY_HEAD_NAME, "Utilities", "Stationery", "Maintenance"];

/// (name, age, department, designation, monthly salary in rupees)
const EMPLOYEES: &[(&str, i64, &str, &str, i64)] = &[
    ("Ali Raza", 41, "Hifz", "Ustad", 32_000),
    ("Zainab Bibi", 29, "Nazira", "Muallima", 24_000),
    ("Hafiz Usman", 35, "Hifz", "Ustad", 30_000),
    ("Bilal Ahmed", 52, "Administration", "Accountant", 28_000),
    ("Fatima Noor", 33, "Dars-e-Nizami", "Muallima", 27_000),
    ("Imran Khan", 46, "Administration", "Chowkidar", 18_000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::from_env()?;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Hisaab Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $HISAAB_DB_PATH or ./hisaab.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing(&config.log_filter);

    println!("Hisaab Seed Data Generator");
    println!("==========================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.heads().salary_head().await?.is_some() {
        println!("⚠ Database already has a Salary head");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Heads
    let mut income_heads = Vec::new();
    for name in INCOME_HEADS {
        income_heads.push(db.heads().create(HeadKind::Income, name).await?);
    }
    let mut expense_heads = Vec::new();
    for name in EXPENSE_HEADS {
        expense_heads.push(db.heads().create(HeadKind::Expense, name).await?);
    }
    println!("✓ Created {} heads", income_heads.len() + expense_heads.len());

    let salary_head = db
        .heads()
        .salary_head()
        .await?
        .ok_or("Salary head missing after seeding heads")?;

    // Employees, each owed one month's salary
    let mut employees = Vec::new();
    for (name, age, department, designation, salary) in EMPLOYEES {
        let employee = db
            .employees()
            .create(&NewEmployee {
                name: name.to_string(),
                age: Some(*age),
                department: department.to_string(),
                designation: designation.to_string(),
                salary: Money::from_rupees(*salary),
                opening_balance: Money::from_rupees(*salary),
            })
            .await?;
        employees.push(employee);
    }
    println!("✓ Created {} employees", employees.len());

    // Receipts
    let mut receipts = 0;
    for (idx, head) in income_heads.iter().enumerate() {
        for n in 0..5 {
            let number = idx * 5 + n + 1;
            db.receipts()
                .create(&NewReceipt {
                    receipt_number: format!("R-{:04}", number),
                    name: format!("Donor {}", number),
                    amount: Money::from_rupees(500 + (number as i64 * 137) % 4_500),
                    income_head_id: head.id.clone(),
                    particulars: format!("{} collection", head.name),
                })
                .await?;
            receipts += 1;
        }
    }
    println!("✓ Created {} receipts", receipts);

    // Salary: most paid in full, every third employee paid half
    for (idx, employee) in employees.iter().enumerate() {
        let amount = if idx % 3 == 2 {
            Money::from_paisa(employee.salary.paisa() / 2)
        } else {
            employee.salary
        };

        db.salaries()
            .pay_salary(&NewPayment {
                payment_number: format!("SAL-{:04}", idx + 1),
                name: employee.name.clone(),
                amount,
                expense_head_id: salary_head.id.clone(),
                employee_id: Some(employee.id.clone()),
                particulars: "Monthly salary".to_string(),
            })
            .await?;
    }
    println!("✓ Paid salary to {} employees", employees.len());

    // A few ordinary expenses
    for (idx, head) in expense_heads.iter().filter(|h| !h.is_salary()).enumerate() {
        db.payments()
            .create(&NewPayment {
                payment_number: format!("PV-{:04}", idx + 1),
                name: format!("{} vendor", head.name),
                amount: Money::from_rupees(1_200 + idx as i64 * 850),
                expense_head_id: head.id.clone(),
                employee_id: None,
                particulars: String::new(),
            })
            .await?;
    }

    println!();
    println!("Ledgers:");
    for ledger in db.salaries().ledgers().await? {
        println!(
            "  {:<14} paid {:>14}  remaining {:>14}",
            ledger.employee.name,
            ledger.total_paid().to_string(),
            ledger.employee.balance_remaining.to_string()
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
