use serde::Deserialize;

use crate::errors::ServiceError;
use crate::pagination::{Direction, SortOrder};

/// Inbound student body for create and update.
///
/// `id` is accepted only so it can be rejected on create and checked against
/// the path on update. `course_ids`, when present, is the complete enrollment set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPayload {
    #[serde(default, alias = "studid")]
    pub id: Option<i32>,
    #[serde(default, alias = "studname")]
    pub name: Option<String>,
    #[serde(default)]
    pub course_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub course_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub course_ids: Option<Vec<i32>>,
}

/// Sorted, duplicate-free copy of the requested course ids.
pub fn normalize_course_ids(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentSortKey {
    Id,
    Name,
}

impl StudentSortKey {
    pub fn parse(property: &str) -> Result<Self, ServiceError> {
        match property {
            "id" | "studid" => Ok(Self::Id),
            "name" | "studname" => Ok(Self::Name),
            other => Err(ServiceError::Validation(format!("cannot sort students by '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudentSort {
    pub key: StudentSortKey,
    pub direction: Direction,
}

/// Resolve requested sort properties. Ascending id is appended as the final
/// tie-break unless id is already one of the keys, so paging is stable.
pub fn resolve_sort(orders: &[SortOrder]) -> Result<Vec<StudentSort>, ServiceError> {
    let mut resolved = orders
        .iter()
        .map(|o| StudentSortKey::parse(&o.property).map(|key| StudentSort { key, direction: o.direction }))
        .collect::<Result<Vec<_>, _>>()?;
    if !resolved.iter().any(|s| s.key == StudentSortKey::Id) {
        resolved.push(StudentSort { key: StudentSortKey::Id, direction: Direction::Asc });
    }
    Ok(resolved)
}

/// How `namelike` compares names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameMatch {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl NameMatch {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive { Self::CaseSensitive } else { Self::CaseInsensitive }
    }

    pub fn matches(self, name: &str, fragment: &str) -> bool {
        match self {
            Self::CaseSensitive => name.contains(fragment),
            Self::CaseInsensitive => name.to_lowercase().contains(&fragment.to_lowercase()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnrollOutcome {
    Linked,
    AlreadyLinked,
    StudentMissing,
    CourseMissing,
}
