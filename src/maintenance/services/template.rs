//! Rendering of ticket text from configured templates.

use crate::config::TicketTemplates;
use crate::maintenance::domain::{RoutineTask, TicketText};
use chrono::NaiveDate;
use minijinja::{Environment, context};

/// Renders the title and description of the ticket for `task` on `due_date`.
///
/// # Errors
///
/// Returns the [`minijinja::Error`] raised when either template fails to
/// parse or render.
pub fn render_ticket_text(
    templates: &TicketTemplates,
    task: &RoutineTask,
    due_date: NaiveDate,
) -> Result<TicketText, minijinja::Error> {
    let environment = Environment::new();
    let details = task.details();
    let template_context = context! {
        facility => details.facility(),
        event => details.event(),
        description => details.description(),
        room_number => details.room_number(),
        due_date => due_date.to_string(),
        recurrence => task.recurrence().to_string(),
    };

    let render = |source: &str| {
        environment
            .render_str(source, &template_context)
            .map(|text| text.trim().to_owned())
    };

    Ok(TicketText {
        title: render(&templates.title)?,
        description: render(&templates.description)?,
    })
}
