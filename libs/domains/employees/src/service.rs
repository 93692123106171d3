//! Employee service: the typed surface the HTTP layer calls

use std::sync::Arc;
use tracing::instrument;

use crate::error::EmployeeResult;
use crate::models::{
    CreateEmployee, DepartmentSalary, Employee, ListEmployeesQuery, UpdateEmployee, UpdateOutcome,
};
use crate::query::PageRequest;
use crate::repository::EmployeeRepository;

pub struct EmployeeService<R: EmployeeRepository> {
    repository: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(employee_id = %input.employee_id))]
    pub async fn create_employee(&self, input: CreateEmployee) -> EmployeeResult<String> {
        let employee_id = self.repository.create(input.into()).await?;
        tracing::info!(%employee_id, "Employee created");
        Ok(employee_id)
    }

    #[instrument(skip(self))]
    pub async fn get_employee(&self, employee_id: &str) -> EmployeeResult<Employee> {
        self.repository.get_by_id(employee_id).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_employee(
        &self,
        employee_id: &str,
        patch: UpdateEmployee,
    ) -> EmployeeResult<UpdateOutcome> {
        let outcome = self.repository.update(employee_id, patch).await?;
        tracing::info!(employee_id, ?outcome, "Employee update applied");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn delete_employee(&self, employee_id: &str) -> EmployeeResult<()> {
        self.repository.delete(employee_id).await?;
        tracing::info!(employee_id, "Employee deleted");
        Ok(())
    }

    /// Page bounds are checked by the query extractor before this is called
    #[instrument(skip(self))]
    pub async fn list_employees(&self, query: ListEmployeesQuery) -> EmployeeResult<Vec<Employee>> {
        let page = PageRequest::new(query.page, query.limit);
        let department = query.department.filter(|d| !d.is_empty());
        self.repository.list(department, page).await
    }

    #[instrument(skip(self))]
    pub async fn search_by_skill(&self, skill: &str) -> EmployeeResult<Vec<String>> {
        self.repository.names_with_skill(skill).await
    }

    #[instrument(skip(self))]
    pub async fn average_salary_by_department(&self) -> EmployeeResult<Vec<DepartmentSalary>> {
        self.repository.average_salary_by_department().await
    }
}
