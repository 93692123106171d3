use async_trait::async_trait;

use crate::error::EmployeeResult;
use crate::models::{DepartmentSalary, Employee, UpdateEmployee, UpdateOutcome};
use crate::query::PageRequest;

/// Persistence and query operations for employee records.
///
/// Every call is a single round trip to the store and never retries.
/// Implementations hold no mutable state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new record and return its `employee_id`.
    ///
    /// Fails with `Conflict` when the id is taken, including when a
    /// concurrent insert wins the race.
    async fn create(&self, employee: Employee) -> EmployeeResult<String>;

    async fn get_by_id(&self, employee_id: &str) -> EmployeeResult<Employee>;

    /// Apply the supplied fields of `patch`.
    ///
    /// An empty patch fails with `InvalidArgument`, a missing record with
    /// `NotFound`.
    async fn update(&self, employee_id: &str, patch: UpdateEmployee)
    -> EmployeeResult<UpdateOutcome>;

    async fn delete(&self, employee_id: &str) -> EmployeeResult<()>;

    /// One page of records, optionally limited to a department, ordered by
    /// joining date within the page
    async fn list(
        &self,
        department: Option<String>,
        page: PageRequest,
    ) -> EmployeeResult<Vec<Employee>>;

    /// Names of employees listing `skill`, ascending
    async fn names_with_skill(&self, skill: &str) -> EmployeeResult<Vec<String>>;

    async fn average_salary_by_department(&self) -> EmployeeResult<Vec<DepartmentSalary>>;
}
