use crate::commands::Out;
use crate::model::Summary;
use crate::{App, Result};
use std::fmt::Write;

/// Summarizes the journal: exercise activities, the total duration, and every activity grouped by
/// its exact type.
pub fn summary(app: &App) -> Result<Out<Summary>> {
    let store = app.store();
    if store.is_empty() {
        return Ok(Out::new("No activities to process.", Summary::default()));
    }
    let summary = store.summarize();
    Ok(Out::new(render(&summary), summary))
}

fn render(summary: &Summary) -> String {
    let mut s = String::from("Exercise Activities:\n");
    for activity in &summary.exercise {
        let _ = writeln!(s, "{activity}");
    }
    let _ = writeln!(
        s,
        "\nTotal Duration of all activities: {} minutes",
        summary.total_duration
    );
    s.push_str("\nActivities grouped by type:");
    for group in &summary.by_type {
        let _ = write!(s, "\n{}:", group.activity_type);
        for activity in &group.activities {
            let _ = write!(s, "\n  {activity}");
        }
    }
    s
}
