//! Results Panel (Right Side)
//!
//! Shows the outcome of the last Submit:
//! - Nothing submitted -> hint
//! - Accepted -> answers table plus the JSON that Save writes
//! - Refused -> the messages per field

use iced::widget::{column, container, scrollable, text, Column, Space};
use iced::{Element, Length};

use crate::{Message, Submission};

/// Render the results panel.
///
/// The `input_ratio` parameter is the ratio used by the input panel.
/// This panel uses the complementary ratio (1 - input_ratio).
pub fn view_results_panel(submission: &Option<Submission>, input_ratio: f32) -> Element<'_, Message> {
    let content: Column<'_, Message> = match submission {
        None => column![
            text("Answers").size(14),
            Space::new().height(8),
            text("Fill in the dates and press Submit.").size(11).color([0.5, 0.5, 0.5]),
        ],
        Some(Ok(answers)) => {
            let rows = Column::with_children(answers.values.iter().map(|(name, value)| {
                text(format!("{}: {}", name, value)).size(12).into()
            }))
            .spacing(2);

            let json = serde_json::to_string_pretty(answers).unwrap_or_default();
            column![
                text("ANSWERS ACCEPTED").size(16).color([0.2, 0.6, 0.2]),
                Space::new().height(8),
                rows,
                Space::new().height(15),
                text("JSON").size(14),
                text(json).size(10),
            ]
        }
        Some(Err(errors)) => {
            let rows = Column::with_children(errors.fields.iter().flat_map(|(id, messages)| {
                messages.iter().map(move |message| {
                    text(format!("{}: {}", id, message)).size(12).color([0.8, 0.2, 0.2]).into()
                })
            }))
            .spacing(2);

            column![
                text("NOT SUBMITTED").size(16).color([0.8, 0.2, 0.2]),
                Space::new().height(8),
                rows,
            ]
        }
    };

    let portion = ((1.0 - input_ratio) * 100.0) as u16;

    container(scrollable(content.padding(8)))
        .width(Length::FillPortion(portion))
        .style(container::bordered_box)
        .padding(5)
        .into()
}
