use crate::error::{Error, ErrorType};
use crate::model::Activity;
use crate::Result;
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The activity type that `summarize` singles out. Matched case-insensitively.
pub const EXERCISE: &str = "Exercise";

/// The ordered collection of activities for the current session.
///
/// The position of an activity in the store is its only identifier. Positions are zero-based and
/// shift down by one for every activity after a deleted one.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActivityStore {
    activities: Vec<Activity>,
}

/// All activities sharing one exact `type` string.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TypeGroup {
    pub activity_type: String,
    pub activities: Vec<Activity>,
}

/// A read-only view over the store produced by `ActivityStore::summarize`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Activities whose type is "Exercise" in any letter case, in store order.
    pub exercise: Vec<Activity>,
    /// The sum of every duration in the store.
    pub total_duration: i64,
    /// Groups keyed by the exact type string, in order of first occurrence.
    pub by_type: Vec<TypeGroup>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    /// Appends a new activity. Field contents are not validated.
    pub fn add(
        &mut self,
        activity_type: impl Into<String>,
        duration: i64,
        date: NaiveDate,
        notes: impl Into<String>,
    ) {
        self.push(Activity::new(activity_type, duration, date, notes));
    }

    pub(crate) fn push(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Replaces the activity at `index` with a newly constructed one.
    ///
    /// # Errors
    /// - `ErrorType::NotFound` if `index` is not less than `len()`. The store is left unchanged.
    pub fn update(
        &mut self,
        index: usize,
        activity_type: impl Into<String>,
        duration: i64,
        date: NaiveDate,
        notes: impl Into<String>,
    ) -> Result<()> {
        self.check(index)?;
        self.activities[index] = Activity::new(activity_type, duration, date, notes);
        Ok(())
    }

    /// Removes and returns the activity at `index`.
    ///
    /// # Errors
    /// - `ErrorType::NotFound` if `index` is not less than `len()`. The store is left unchanged.
    pub fn delete(&mut self, index: usize) -> Result<Activity> {
        self.check(index)?;
        Ok(self.activities.remove(index))
    }

    pub fn list(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities whose type equals `activity_type`, ignoring letter case.
    pub fn filter_by_type<'a>(
        &'a self,
        activity_type: &'a str,
    ) -> impl Iterator<Item = &'a Activity> {
        self.activities
            .iter()
            .filter(move |a| eq_ignore_case(a.activity_type(), activity_type))
    }

    /// The sum of every duration. Durations are unbounded, so the sum wraps around on `i64`
    /// overflow instead of panicking.
    pub fn total_duration(&self) -> i64 {
        self.activities
            .iter()
            .fold(0i64, |total, a| total.wrapping_add(a.duration()))
    }

    /// Buckets activities by their exact type string. Bucket order is the order in which each
    /// type first appears.
    pub fn group_by_type(&self) -> Vec<TypeGroup> {
        let mut groups: Vec<TypeGroup> = Vec::new();
        for activity in &self.activities {
            match groups
                .iter_mut()
                .find(|g| g.activity_type == activity.activity_type())
            {
                Some(group) => group.activities.push(activity.clone()),
                None => groups.push(TypeGroup {
                    activity_type: activity.activity_type().to_string(),
                    activities: vec![activity.clone()],
                }),
            }
        }
        groups
    }

    pub fn summarize(&self) -> Summary {
        Summary {
            exercise: self.filter_by_type(EXERCISE).cloned().collect(),
            total_duration: self.total_duration(),
            by_type: self.group_by_type(),
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.activities.len() {
            return Ok(());
        }
        Err(not_found(index.to_string(), self.activities.len()))
    }
}

/// Converts a user-supplied index into a store position. Negative values can never refer to an
/// activity, so they fail with `ErrorType::NotFound` just like indices past the end.
pub fn position(index: i64) -> Result<usize> {
    usize::try_from(index).map_err(|_| not_found(index.to_string(), 0))
}

fn not_found(index: String, len: usize) -> Error {
    let detail = match len {
        0 => "the journal has no activity at that position".to_string(),
        n => format!("valid positions are 0 to {}", n - 1),
    };
    Error::new(
        ErrorType::NotFound,
        anyhow!("Activity not found at index {index}: {detail}"),
    )
}

// Unicode-aware, matching "EXERCISE", "exercise" and so on.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
