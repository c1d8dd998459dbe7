//! Add, list, update and delete handlers.

use crate::args::{ActivityArgs, DeleteArgs, UpdateArgs};
use crate::commands::Out;
use crate::model::{position, Activity};
use crate::{App, Result};
use std::fmt::Write;

/// Appends a new activity to the journal.
///
/// # Errors
/// - `ErrorType::Parse` if the duration or date cannot be parsed. Nothing is added.
pub fn add(app: &mut App, args: ActivityArgs) -> Result<Out<Activity>> {
    let activity = to_activity(&args)?;
    app.store_mut().push(activity.clone());
    let index = app.store().len() - 1;
    Ok(Out::new(format!("Activity added at index {index}"), activity))
}

/// Renders every activity, one per line, prefixed with its index.
pub fn list(app: &App) -> Result<Out<Vec<Activity>>> {
    let activities = app.store().list();
    if activities.is_empty() {
        return Ok(Out::new("No activities recorded.", Vec::new()));
    }
    let mut message = String::new();
    for (ix, activity) in activities.iter().enumerate() {
        if ix > 0 {
            message.push('\n');
        }
        let _ = write!(message, "{ix}: {activity}");
    }
    Ok(Out::new(message, activities.to_vec()))
}

/// Replaces the activity at `args.index()` with the one described by `args.activity()`.
///
/// # Errors
/// - `ErrorType::Parse` if the duration or date cannot be parsed.
/// - `ErrorType::NotFound` if the index does not refer to an activity.
///
/// The journal is unchanged on error.
pub fn update(app: &mut App, args: UpdateArgs) -> Result<Out<Activity>> {
    let activity = to_activity(args.activity())?;
    let index = position(args.index())?;
    app.store_mut().update(
        index,
        activity.activity_type(),
        activity.duration(),
        activity.date(),
        activity.notes(),
    )?;
    Ok(Out::new(format!("Activity {index} updated"), activity))
}

/// Removes the activity at `args.index()`.
///
/// # Errors
/// - `ErrorType::NotFound` if the index does not refer to an activity.
pub fn delete(app: &mut App, args: DeleteArgs) -> Result<Out<Activity>> {
    let index = position(args.index())?;
    let removed = app.store_mut().delete(index)?;
    Ok(Out::new(
        format!("Activity {index} deleted: {removed}"),
        removed,
    ))
}

fn to_activity(args: &ActivityArgs) -> Result<Activity> {
    Activity::parse(
        args.activity_type(),
        args.duration(),
        args.date(),
        args.notes(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    fn yoga() -> ActivityArgs {
        ActivityArgs::new("Yoga", "45", "10.03.2024", "evening")
    }

    #[test]
    fn test_add_success() {
        let env = TestEnv::new();
        let mut app = App::open(env.config());
        let out = add(&mut app, yoga()).unwrap();
        assert_eq!(out.message(), "Activity added at index 0");
        assert_eq!(out.structure().unwrap().activity_type(), "Yoga");
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn test_add_parse_error_adds_nothing() {
        let env = TestEnv::new();
        let mut app = App::open(env.config());
        let args = ActivityArgs::new("Yoga", "45", "March 10", "");
        let err = add(&mut app, args).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Parse);
        assert!(app.store().is_empty());
    }

    #[test]
    fn test_list_empty_and_populated() {
        let env = TestEnv::new();
        let app = App::open(env.config());
        assert_eq!(list(&app).unwrap().message(), "No activities recorded.");

        let app = env.sample_app();
        let out = list(&app).unwrap();
        let lines: Vec<&str> = out.message().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1: Study | Duration: 60 mins | Date: 02.03.2024 | Notes: algebra"
        );
        assert_eq!(out.structure().unwrap().len(), 3);
    }

    #[test]
    fn test_update_success() {
        let env = TestEnv::new();
        let mut app = env.sample_app();
        let out = update(&mut app, UpdateArgs::new(1, yoga())).unwrap();
        assert!(out.message().contains("Activity 1 updated"));
        assert_eq!(
            app.store().list()[1],
            Activity::new("Yoga", 45, TestEnv::date("10.03.2024"), "evening")
        );
        assert_eq!(app.store().list()[0].activity_type(), "Exercise");
        assert_eq!(app.store().list()[2].activity_type(), "exercise");
    }

    #[test]
    fn test_update_not_found() {
        let env = TestEnv::new();
        let mut app = env.sample_app();
        let before = app.store().clone();
        for index in [-1, 3, 100] {
            let err = update(&mut app, UpdateArgs::new(index, yoga())).unwrap_err();
            assert!(err.is_not_found(), "index {index} should be not found");
        }
        assert_eq!(app.store(), &before);
    }

    #[test]
    fn test_update_bad_duration_leaves_store_unchanged() {
        let env = TestEnv::new();
        let mut app = env.sample_app();
        let before = app.store().clone();
        let args = UpdateArgs::new(0, ActivityArgs::new("Yoga", "lots", "10.03.2024", ""));
        assert!(update(&mut app, args).unwrap_err().is_parse());
        assert_eq!(app.store(), &before);
    }

    #[test]
    fn test_delete_success() {
        let env = TestEnv::new();
        let mut app = env.sample_app();
        let out = delete(&mut app, DeleteArgs::new(0)).unwrap();
        assert_eq!(out.structure().unwrap().notes(), "run");
        let types: Vec<&str> = app
            .store()
            .list()
            .iter()
            .map(|a| a.activity_type())
            .collect();
        assert_eq!(types, vec!["Study", "exercise"]);
    }

    #[test]
    fn test_delete_not_found() {
        let env = TestEnv::new();
        let mut app = env.sample_app();
        assert!(delete(&mut app, DeleteArgs::new(-1))
            .unwrap_err()
            .is_not_found());
        assert!(delete(&mut app, DeleteArgs::new(3))
            .unwrap_err()
            .is_not_found());
        assert_eq!(app.store().len(), 3);
    }
}
