//! Conversion between stored records and API views.
//!
//! Both directions are plain field copies; an absent input maps to an absent output.

use super::types::{TaskRecord, TaskView};

impl From<TaskRecord> for TaskView {
    fn from(r: TaskRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            completed: r.completed,
        }
    }
}

impl From<TaskView> for TaskRecord {
    fn from(v: TaskView) -> Self {
        Self {
            id: v.id,
            title: v.title,
            description: v.description,
            completed: v.completed,
        }
    }
}

pub fn to_external(record: Option<TaskRecord>) -> Option<TaskView> {
    record.map(Into::into)
}

pub fn to_internal(view: Option<TaskView>) -> Option<TaskRecord> {
    view.map(Into::into)
}
