use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, JwtAuth, JwtClaims, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, require_admin,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EmployeeResult;
use crate::models::{
    CreateEmployee, DepartmentSalary, Employee, ListEmployeesQuery, MessageResponse, SkillQuery,
    UpdateEmployee, UpdateOutcome,
};
use crate::repository::EmployeeRepository;
use crate::service::EmployeeService;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_employee,
        get_employee,
        update_employee,
        delete_employee,
        list_employees,
        search_by_skill,
        average_salary,
    ),
    components(
        schemas(Employee, CreateEmployee, UpdateEmployee, DepartmentSalary, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Employees", description = "Employee records, search and salary statistics")
    )
)]
pub struct ApiDoc;

/// Employee routes, mounted by the app under `/employees`.
///
/// Reads are public, the salary report needs any valid token, and mutations
/// need an admin token.
pub fn router<R: EmployeeRepository + 'static>(service: EmployeeService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_employees::<R>))
        .route("/search", get(search_by_skill::<R>))
        .route("/{employee_id}", get(get_employee::<R>));

    let authenticated = Router::new()
        .route("/avg-salary", get(average_salary::<R>))
        .route_layer(from_fn_with_state(auth.clone(), jwt_auth_middleware));

    let admin = Router::new()
        .route("/", post(create_employee::<R>))
        .route("/{employee_id}", put(update_employee::<R>).delete(delete_employee::<R>))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(auth, jwt_auth_middleware));

    public
        .merge(authenticated)
        .merge(admin)
        .with_state(shared_service)
}

fn audit(action: &str, claims: &JwtClaims, employee_id: &str, headers: &HeaderMap, ok: bool) {
    let outcome = if ok {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };
    AuditEvent::new(action, outcome)
        .actor(&claims.sub)
        .resource(format!("employee:{employee_id}"))
        .with_request_headers(headers)
        .log();
}

/// Create an employee
#[utoipa::path(
    post,
    path = "",
    tag = "Employees",
    request_body = CreateEmployee,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Employee created", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateEmployee>,
) -> EmployeeResult<impl IntoResponse> {
    let requested_id = input.employee_id.clone();
    let result = service.create_employee(input).await;
    audit("employee.create", &claims, &requested_id, &headers, result.is_ok());

    let employee_id = result?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "Employee {employee_id} created successfully"
        ))),
    ))
}

/// Get an employee by business id
#[utoipa::path(
    get,
    path = "/{employee_id}",
    tag = "Employees",
    params(("employee_id" = String, Path, description = "Employee business id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    Path(employee_id): Path<String>,
) -> EmployeeResult<Json<Employee>> {
    let employee = service.get_employee(&employee_id).await?;
    Ok(Json(employee))
}

/// Update supplied fields of an employee
#[utoipa::path(
    put,
    path = "/{employee_id}",
    tag = "Employees",
    params(("employee_id" = String, Path, description = "Employee business id")),
    request_body = UpdateEmployee,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Update applied, or nothing changed", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateEmployee>,
) -> EmployeeResult<Json<MessageResponse>> {
    let result = service.update_employee(&employee_id, patch).await;
    audit("employee.update", &claims, &employee_id, &headers, result.is_ok());

    let message = match result? {
        UpdateOutcome::Modified => format!("Employee {employee_id} updated successfully"),
        UpdateOutcome::Unchanged => "No changes made".to_string(),
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/{employee_id}",
    tag = "Employees",
    params(("employee_id" = String, Path, description = "Employee business id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    Path(employee_id): Path<String>,
) -> EmployeeResult<Json<MessageResponse>> {
    let result = service.delete_employee(&employee_id).await;
    audit("employee.delete", &claims, &employee_id, &headers, result.is_ok());

    result?;
    Ok(Json(MessageResponse::new(format!(
        "Employee {employee_id} deleted successfully"
    ))))
}

/// List employees, one page at a time
///
/// Records within the page are ordered by joining date, oldest first.
#[utoipa::path(
    get,
    path = "",
    tag = "Employees",
    params(ListEmployeesQuery),
    responses(
        (status = 200, description = "One page of employees", body = Vec<Employee>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_employees<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListEmployeesQuery>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    let employees = service.list_employees(query).await?;
    Ok(Json(employees))
}

/// Names of employees with a skill
#[utoipa::path(
    get,
    path = "/search",
    tag = "Employees",
    params(SkillQuery),
    responses(
        (status = 200, description = "Matching names, ascending", body = Vec<String>),
        (status = 400, description = "Missing skill parameter"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_by_skill<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    ValidatedQuery(query): ValidatedQuery<SkillQuery>,
) -> EmployeeResult<Json<Vec<String>>> {
    let names = service.search_by_skill(&query.skill).await?;
    Ok(Json(names))
}

/// Average salary per department
#[utoipa::path(
    get,
    path = "/avg-salary",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "One entry per department, sorted by name", body = Vec<DepartmentSalary>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn average_salary<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
) -> EmployeeResult<Json<Vec<DepartmentSalary>>> {
    let salaries = service.average_salary_by_department().await?;
    Ok(Json(salaries))
}
