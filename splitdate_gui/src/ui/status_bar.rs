//! Status Bar (Bottom)
//!
//! Displays:
//! - Form definition file
//! - Answers file
//! - Status messages

use std::path::PathBuf;

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view_status_bar<'a>(
    form_file: &'a Option<PathBuf>,
    answers_file: &'a Option<PathBuf>,
    status: &'a str,
) -> Element<'a, Message> {
    let form_info = match form_file {
        Some(path) => path.display().to_string(),
        None => "Sample form".to_string(),
    };

    let answers_info = match answers_file {
        Some(path) => format!(" -> {}", path.display()),
        None => " [not saving]".to_string(),
    };

    row![
        text(form_info).size(10),
        text(answers_info).size(10).color([0.5, 0.5, 0.5]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
