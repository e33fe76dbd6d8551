use crate::api::{Course, CourseId};

/// Local change to the course list after a dialog reported success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPatch {
    StateChanged { id: CourseId, enabled: bool },
    Deleted(CourseId),
    Updated(Course),
    Created(Course),
}

/// Returns the collection with `patch` applied. Entries are matched by id;
/// a patch for an unknown id leaves the collection as it is.
pub fn apply(courses: &[Course], patch: ListPatch) -> Vec<Course> {
    match patch {
        ListPatch::StateChanged { id, enabled } => courses
            .iter()
            .map(|course| {
                if course.id == id {
                    Course {
                        enabled,
                        ..course.clone()
                    }
                } else {
                    course.clone()
                }
            })
            .collect(),
        ListPatch::Deleted(id) => courses
            .iter()
            .filter(|course| course.id != id)
            .cloned()
            .collect(),
        ListPatch::Updated(updated) => courses
            .iter()
            .map(|course| {
                if course.id == updated.id {
                    updated.clone()
                } else {
                    course.clone()
                }
            })
            .collect(),
        ListPatch::Created(created) => courses
            .iter()
            .cloned()
            .chain(std::iter::once(created))
            .collect(),
    }
}
