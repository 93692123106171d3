//! MongoDB implementation of EmployeeRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{EmployeeError, EmployeeResult, is_duplicate_key};
use crate::indexes::employee_indexes;
use crate::models::{DepartmentSalary, Employee, UpdateEmployee, UpdateOutcome};
use crate::query::{
    PageRequest, list_filter, name_projection, name_sort, salary_by_department_pipeline,
    skill_filter, sort_by_joining_date,
};
use crate::repository::EmployeeRepository;

pub const DEFAULT_COLLECTION: &str = "employees";

#[derive(Deserialize)]
struct EmployeeName {
    name: String,
}

/// Repository over one collection.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Clone)]
pub struct MongoEmployeeRepository {
    collection: Collection<Employee>,
}

impl MongoEmployeeRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Employee>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Employee> {
        &self.collection
    }

    /// Build the index plan. Failure must stop startup.
    pub async fn init_indexes(&self) -> EmployeeResult<()> {
        self.collection
            .create_indexes(employee_indexes())
            .await
            .map_err(|e| EmployeeError::Internal(format!("failed to build employee indexes: {e}")))?;
        tracing::info!(collection = %self.collection.name(), "Employee indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for MongoEmployeeRepository {
    #[instrument(skip(self, employee), fields(employee_id = %employee.employee_id))]
    async fn create(&self, employee: Employee) -> EmployeeResult<String> {
        match self.collection.insert_one(&employee).await {
            Ok(_) => Ok(employee.employee_id),
            Err(e) if is_duplicate_key(&e) => Err(EmployeeError::Conflict(employee.employee_id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, employee_id: &str) -> EmployeeResult<Employee> {
        self.collection
            .find_one(doc! { "employee_id": employee_id })
            .await?
            .ok_or_else(|| EmployeeError::NotFound(employee_id.to_string()))
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        employee_id: &str,
        patch: UpdateEmployee,
    ) -> EmployeeResult<UpdateOutcome> {
        if patch.is_empty() {
            let exists = self
                .collection
                .count_documents(doc! { "employee_id": employee_id })
                .limit(1)
                .await?;
            if exists == 0 {
                return Err(EmployeeError::NotFound(employee_id.to_string()));
            }
            return Err(EmployeeError::InvalidArgument(
                "No fields provided for update".to_string(),
            ));
        }

        let result = self
            .collection
            .update_one(
                doc! { "employee_id": employee_id },
                doc! { "$set": patch.to_set_document() },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(EmployeeError::NotFound(employee_id.to_string()));
        }

        Ok(if result.modified_count > 0 {
            UpdateOutcome::Modified
        } else {
            UpdateOutcome::Unchanged
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, employee_id: &str) -> EmployeeResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "employee_id": employee_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(EmployeeError::NotFound(employee_id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        department: Option<String>,
        page: PageRequest,
    ) -> EmployeeResult<Vec<Employee>> {
        let limit = i64::try_from(page.limit)
            .map_err(|_| EmployeeError::InvalidArgument(format!("limit {} is too large", page.limit)))?;

        let cursor = self
            .collection
            .find(list_filter(department.as_deref()))
            .skip(page.skip())
            .limit(limit)
            .await?;
        let mut employees: Vec<Employee> = cursor.try_collect().await?;

        sort_by_joining_date(&mut employees);
        Ok(employees)
    }

    #[instrument(skip(self))]
    async fn names_with_skill(&self, skill: &str) -> EmployeeResult<Vec<String>> {
        let cursor = self
            .collection
            .clone_with_type::<EmployeeName>()
            .find(skill_filter(skill))
            .projection(name_projection())
            .sort(name_sort())
            .await?;
        let names: Vec<EmployeeName> = cursor.try_collect().await?;

        Ok(names.into_iter().map(|n| n.name).collect())
    }

    #[instrument(skip(self))]
    async fn average_salary_by_department(&self) -> EmployeeResult<Vec<DepartmentSalary>> {
        let cursor = self
            .collection
            .aggregate(salary_by_department_pipeline())
            .with_type::<DepartmentSalary>()
            .await?;
        let salaries = cursor.try_collect().await?;
        Ok(salaries)
    }
}
