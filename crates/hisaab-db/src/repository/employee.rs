//! # Employee Repository
//!
//! Payroll records.
//!
//! `balance_remaining` is written here exactly once, from the opening
//! balance at registration. Profile edits never touch it; afterwards only
//! [`SalaryRepository`](super::salary::SalaryRepository) moves it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use hisaab_core::{Employee, EmployeeUpdate, NewEmployee};

use super::generate_id;

pub(crate) const EMPLOYEE_COLUMNS: &str = r#"
    id, name, age, department, designation,
    salary, balance_remaining, created_at, updated_at
"#;

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Lists all employees by name.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        debug!("Listing employees");

        let sql = format!(
            "SELECT {} FROM employees ORDER BY name COLLATE NOCASE, created_at",
            EMPLOYEE_COLUMNS
        );
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    /// Gets an employee by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Distinct department names, sorted.
    pub async fn departments(&self) -> DbResult<Vec<String>> {
        let departments: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT department FROM employees ORDER BY department COLLATE NOCASE",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    /// Employees of one department, by name.
    pub async fn list_by_department(&self, department: &str) -> DbResult<Vec<Employee>> {
        debug!(department = %department, "Listing employees by department");

        let sql = format!(
            "SELECT {} FROM employees WHERE department = ?1 ORDER BY name COLLATE NOCASE",
            EMPLOYEE_COLUMNS
        );
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(department.trim())
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    /// Registers an employee with their opening balance.
    pub async fn create(&self, form: &NewEmployee) -> DbResult<Employee> {
        form.validate()?;

        let now = Utc::now();
        let employee = Employee {
            id: generate_id(),
            name: form.name.trim().to_string(),
            age: form.age,
            department: form.department.trim().to_string(),
            designation: form.designation.trim().to_string(),
            salary: form.salary,
            balance_remaining: form.opening_balance,
            created_at: now,
            updated_at: now,
        };

        debug!(
            id = %employee.id,
            name = %employee.name,
            opening_balance = %employee.balance_remaining,
            "Creating employee"
        );

        sqlx::query(
            r#"
            INSERT INTO employees (
                id, name, age, department, designation,
                salary, balance_remaining, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.department)
        .bind(&employee.designation)
        .bind(employee.salary)
        .bind(employee.balance_remaining)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Updates profile fields. The balance is left as it is.
    pub async fn update(&self, id: &str, changes: &EmployeeUpdate) -> DbResult<Employee> {
        changes.validate()?;

        debug!(id = %id, "Updating employee");

        let result = sqlx::query(
            r#"
            UPDATE employees
            SET
                name = ?2,
                age = ?3,
                department = ?4,
                designation = ?5,
                salary = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(changes.name.trim())
        .bind(changes.age)
        .bind(changes.department.trim())
        .bind(changes.designation.trim())
        .bind(changes.salary)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Employee", id))
    }

    /// Deletes an employee.
    ///
    /// ## Errors
    /// - `NotFound` if no employee has this ID
    /// - `ForeignKeyViolation` while salary payments reference the employee
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::*;
    use hisaab_core::Money;

    fn form(name: &str, department: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            age: None,
            department: department.to_string(),
            designation: "Teacher".to_string(),
            salary: Money::from_rupees(25_000),
            opening_balance: Money::from_rupees(5_000),
        }
    }

    #[tokio::test]
    async fn test_create_sets_opening_balance() {
        let db = test_db().await;
        let created = db.employees().create(&form(" Ali ", "Hifz")).await.unwrap();

        assert_eq!(created.name, "Ali");
        assert_eq!(created.balance_remaining, Money::from_rupees(5_000));

        let loaded = db.employees().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, created.id);
        assert_eq!(loaded.salary, Money::from_rupees(25_000));
        assert_eq!(loaded.balance_remaining, Money::from_rupees(5_000));
    }

    #[tokio::test]
    async fn test_invalid_form_rejected() {
        let db = test_db().await;
        let err = db.employees().create(&form("", "Hifz")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert!(db.employees().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_departments_and_filter() {
        let db = test_db().await;
        let employees = db.employees();
        employees.create(&form("Zainab", "Nazira")).await.unwrap();
        employees.create(&form("Ali", "Hifz")).await.unwrap();
        employees.create(&form("Bilal", "Hifz")).await.unwrap();

        assert_eq!(employees.departments().await.unwrap(), ["Hifz", "Nazira"]);

        let hifz: Vec<_> = employees
            .list_by_department("Hifz")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(hifz, ["Ali", "Bilal"]);

        let all: Vec<_> = employees.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(all, ["Ali", "Bilal", "Zainab"]);
    }

    #[tokio::test]
    async fn test_update_leaves_balance_alone() {
        let db = test_db().await;
        let ali = db.employees().create(&form("Ali", "Hifz")).await.unwrap();

        let updated = db
            .employees()
            .update(
                &ali.id,
                &EmployeeUpdate {
                    name: "Ali Raza".to_string(),
                    age: Some(41),
                    department: "Nazira".to_string(),
                    designation: "Head Teacher".to_string(),
                    salary: Money::from_rupees(30_000),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ali Raza");
        assert_eq!(updated.age, Some(41));
        assert_eq!(updated.salary, Money::from_rupees(30_000));
        assert_eq!(updated.balance_remaining, Money::from_rupees(5_000));
    }

    #[tokio::test]
    async fn test_update_missing_employee() {
        let db = test_db().await;
        let err = db
            .employees()
            .update(
                "6f1c2a52-8f41-4a55-9a53-2d9b1c7e0a11",
                &EmployeeUpdate {
                    name: "Nobody".to_string(),
                    age: None,
                    department: "Hifz".to_string(),
                    designation: "Teacher".to_string(),
                    salary: Money::zero(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let ali = employee(&db, "Ali", 0).await;

        db.employees().delete(&ali.id).await.unwrap();
        assert!(db.employees().get_by_id(&ali.id).await.unwrap().is_none());
        assert!(matches!(
            db.employees().delete(&ali.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
