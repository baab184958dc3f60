use serde::{Deserialize, Deserializer};

/// Inbound course body. `instructor_id` distinguishes "absent" (keep) from
/// `null` (clear) on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePayload {
    #[serde(default, alias = "courseid")]
    pub id: Option<i32>,
    #[serde(default, alias = "coursename")]
    pub name: Option<String>,
    #[serde(default, alias = "instructid", deserialize_with = "present")]
    pub instructor_id: Option<Option<i32>>,
}

fn present<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub instructor_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub instructor_id: Option<Option<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructor_absent_null_and_set_are_distinct() {
        let absent: CoursePayload = serde_json::from_str(r#"{"name": "Data Science"}"#).unwrap();
        assert_eq!(absent.instructor_id, None);
        let cleared: CoursePayload = serde_json::from_str(r#"{"instructor_id": null}"#).unwrap();
        assert_eq!(cleared.instructor_id, Some(None));
        let set: CoursePayload = serde_json::from_str(r#"{"coursename": "JS", "instructid": 2}"#).unwrap();
        assert_eq!(set.instructor_id, Some(Some(2)));
        assert_eq!(set.name.as_deref(), Some("JS"));
    }
}
