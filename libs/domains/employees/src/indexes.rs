//! Indexes the employees collection needs before serving.
//!
//! Index names are left to the server, which derives them from the keys
//! (`employee_id_1`, ...). `createIndexes` is a no-op for an index that
//! already exists with the same keys, options and name, so the plan is
//! applied on every startup. Building the unique index fails when stored
//! documents already share an `employee_id`; callers must treat that as fatal.

use mongodb::{IndexModel, bson::doc, options::IndexOptions};

/// Server-derived names of the indexes in [`employee_indexes`].
pub const EMPLOYEE_ID_UNIQUE: &str = "employee_id_1";
pub const DEPARTMENT: &str = "department_1";
pub const DEPARTMENT_JOINING_DATE: &str = "department_1_joining_date_-1";
pub const SKILLS: &str = "skills_1";
pub const NAME: &str = "name_1";

pub fn employee_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "employee_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
        IndexModel::builder().keys(doc! { "department": 1 }).build(),
        IndexModel::builder()
            .keys(doc! { "department": 1, "joining_date": -1 })
            .build(),
        // Multikey: one entry per array element, exact and case-sensitive
        IndexModel::builder().keys(doc! { "skills": 1 }).build(),
        IndexModel::builder().keys(doc! { "name": 1 }).build(),
    ]
}
