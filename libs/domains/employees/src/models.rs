use chrono::NaiveDate;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// `joining_date` is persisted as a `YYYY-MM-DD` string.
///
/// Reading also accepts a full ISO-8601 datetime string and keeps its
/// calendar date, so documents written by other tools still load.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn to_storage(date: &NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn parse(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        let value = value.trim();
        let date_part = if value.len() > 10 {
            value.get(..10).unwrap_or(value)
        } else {
            value
        };
        NaiveDate::parse_from_str(date_part, FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_storage(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| D::Error::custom(format!("invalid joining_date '{raw}': {e}")))
    }
}

/// Employee record as stored and returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "employee_id": "E123",
    "name": "John Doe",
    "department": "Engineering",
    "salary": 75000.0,
    "joining_date": "2023-01-15",
    "skills": ["Python", "MongoDB", "APIs"]
}))]
pub struct Employee {
    /// Business key, unique across all records
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub salary: f64,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "2023-01-15")]
    pub joining_date: NaiveDate,
    /// Order is kept and duplicates are allowed
    pub skills: Vec<String>,
}

/// Write form: every field is required
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub salary: f64,
    #[schema(value_type = String, format = Date, example = "2023-01-15")]
    pub joining_date: NaiveDate,
    pub skills: Vec<String>,
}

impl From<CreateEmployee> for Employee {
    fn from(input: CreateEmployee) -> Self {
        Self {
            employee_id: input.employee_id,
            name: input.name,
            department: input.department,
            salary: input.salary,
            joining_date: input.joining_date,
            skills: input.skills,
        }
    }
}

/// Patch form.
///
/// A missing field and an explicit `null` both mean "leave unchanged"; a patch
/// can set fields but never clear them. `employee_id` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl UpdateEmployee {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.joining_date.is_none()
            && self.skills.is_none()
    }

    /// Body of the `$set` stage; only supplied fields appear
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(department) = &self.department {
            set.insert("department", department.as_str());
        }
        if let Some(salary) = self.salary {
            set.insert("salary", Bson::Double(salary));
        }
        if let Some(joining_date) = &self.joining_date {
            set.insert("joining_date", iso_date::to_storage(joining_date));
        }
        if let Some(skills) = &self.skills {
            set.insert("skills", skills.clone());
        }
        set
    }
}

/// Result of a successful update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one stored value changed
    Modified,
    /// The record matched but every supplied value was already stored
    Unchanged,
}

/// Query parameters for `GET /employees`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEmployeesQuery {
    /// Filter by department; empty means all departments
    pub department: Option<String>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 1)]
    pub page: u64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Query parameters for `GET /employees/search`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SkillQuery {
    /// Exact, case-sensitive skill name
    #[validate(length(min = 1))]
    pub skill: String,
}

/// Average salary of one department, rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentSalary {
    pub department: String,
    pub avg_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
