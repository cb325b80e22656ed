//! Filter building blocks shared by the roster and attendance views.
//!
//! Every filter dimension is an `Option`: `None` means "no filter". The
//! front-end still sends `"all"` and `""` for an unset dimension, so those
//! deserialize to `None` here and never reach the stores.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> RangeFilter<T> {
    #[cfg(test)]
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, v: T) -> bool {
        v >= self.min && v <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

/// Only the empty string means "unset". Whitespace is kept as typed.
pub fn blank_as_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

pub fn all_as_none<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<String>::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Shallow merge of `partial`'s keys over `current`. Keys absent from
/// `partial` keep their current value.
pub fn merge_partial<T>(current: &T, partial: &serde_json::Value) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = serde_json::to_value(current)?;
    if let (Some(base_obj), Some(patch_obj)) = (base.as_object_mut(), partial.as_object()) {
        for (k, v) in patch_obj {
            base_obj.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TeacherStatus;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "blank_as_none")]
        name: Option<String>,
        #[serde(deserialize_with = "all_as_none")]
        status: Option<TeacherStatus>,
        range: Option<RangeFilter<f64>>,
    }

    #[test]
    fn sentinels_become_absent() {
        let p: Probe =
            serde_json::from_value(json!({ "name": "", "status": "all" })).expect("parse");
        assert_eq!(p, Probe::default());

        let p: Probe = serde_json::from_value(json!({ "name": null, "status": null }))
            .expect("parse nulls");
        assert_eq!(p, Probe::default());

        let p: Probe = serde_json::from_value(json!({ "status": "on-leave" })).expect("parse");
        assert_eq!(p.status, Some(TeacherStatus::OnLeave));
    }

    #[test]
    fn whitespace_text_is_kept_as_a_filter() {
        let p: Probe = serde_json::from_value(json!({ "name": "  " })).expect("parse");
        assert_eq!(p.name.as_deref(), Some("  "));
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        assert!(serde_json::from_value::<Probe>(json!({ "status": "retired" })).is_err());
    }

    #[test]
    fn range_is_inclusive() {
        let r = RangeFilter::new(3.0, 5.0);
        assert!(r.contains(3.0));
        assert!(r.contains(5.0));
        assert!(!r.contains(5.5));
    }

    #[test]
    fn merge_partial_overrides_only_given_keys() {
        let current = Probe {
            name: Some("sarah".into()),
            status: Some(TeacherStatus::Active),
            range: Some(RangeFilter::new(1.0, 4.0)),
        };
        let merged: Probe =
            merge_partial(&current, &json!({ "status": "all" })).expect("merge");
        assert_eq!(merged.name.as_deref(), Some("sarah"));
        assert_eq!(merged.status, None);
        assert_eq!(merged.range, Some(RangeFilter::new(1.0, 4.0)));
    }
}
