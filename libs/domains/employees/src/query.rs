//! Store-independent pieces of the query paths: filters, projection, the
//! salary pipeline, and the per-page date ordering.

use mongodb::bson::{Document, doc};

use crate::models::Employee;

/// Store-side page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Equality filter on `department`; `None` or an empty string matches everything
pub fn list_filter(department: Option<&str>) -> Document {
    match department {
        Some(department) if !department.is_empty() => doc! { "department": department },
        _ => doc! {},
    }
}

/// Exact membership of `skill` in the `skills` array.
///
/// Served by the multikey `skills` index. Matching is case-sensitive and
/// never partial.
pub fn skill_filter(skill: &str) -> Document {
    doc! { "skills": skill }
}

pub fn name_projection() -> Document {
    doc! { "_id": 0, "name": 1 }
}

pub fn name_sort() -> Document {
    doc! { "name": 1 }
}

/// Group by department, average salary rounded to 2 places, sorted by department
pub fn salary_by_department_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$department",
                "avg_salary": { "$avg": "$salary" },
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "department": "$_id",
                "avg_salary": { "$round": ["$avg_salary", 2] },
            }
        },
        doc! { "$sort": { "department": 1 } },
    ]
}

/// Orders one fetched page by ascending `joining_date`.
///
/// Page boundaries come from the store's skip/limit before this runs, so the
/// ordering is local to the page. Equal dates keep their fetched order.
pub fn sort_by_joining_date(employees: &mut [Employee]) {
    employees.sort_by_key(|employee| employee.joining_date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee(id: &str, joined: &str) -> Employee {
        Employee {
            employee_id: id.into(),
            name: id.into(),
            department: "Eng".into(),
            salary: 1.0,
            joining_date: NaiveDate::parse_from_str(joined, "%Y-%m-%d").unwrap(),
            skills: vec![],
        }
    }

    #[test]
    fn test_skip_is_page_offset() {
        assert_eq!(PageRequest::new(1, 10).skip(), 0);
        assert_eq!(PageRequest::new(2, 10).skip(), 10);
        assert_eq!(PageRequest::new(4, 25).skip(), 75);
        assert_eq!(PageRequest::default(), PageRequest::new(1, 10));
    }

    #[test]
    fn test_list_filter() {
        assert_eq!(list_filter(None), doc! {});
        assert_eq!(list_filter(Some("")), doc! {});
        assert_eq!(list_filter(Some("HR")), doc! { "department": "HR" });
    }

    #[test]
    fn test_skill_filter_is_exact_match() {
        assert_eq!(skill_filter("Go"), doc! { "skills": "Go" });
    }

    #[test]
    fn test_salary_pipeline_shape() {
        let pipeline = salary_by_department_pipeline();
        assert_eq!(pipeline.len(), 3);

        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$department");

        let project = pipeline[1].get_document("$project").unwrap();
        assert_eq!(project.get_i32("_id").unwrap(), 0);
        assert_eq!(project.get_str("department").unwrap(), "$_id");
        assert!(project.get_document("avg_salary").unwrap().contains_key("$round"));

        assert_eq!(pipeline[2], doc! { "$sort": { "department": 1 } });
    }

    #[test]
    fn test_sort_by_joining_date_is_stable() {
        let mut page = vec![
            employee("c", "2022-05-01"),
            employee("a", "2020-01-01"),
            employee("b1", "2021-03-03"),
            employee("b2", "2021-03-03"),
        ];

        sort_by_joining_date(&mut page);

        let ids: Vec<_> = page.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(ids, ["a", "b1", "b2", "c"]);
    }
}
