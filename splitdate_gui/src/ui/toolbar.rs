//! Toolbar component
//!
//! Submit, Save and Clear for the current form.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::Message;

/// Render the application header with the form title
pub fn view_header(form_title: &str) -> Element<'_, Message> {
    row![
        text("Split Date").size(28),
        Space::new().width(Length::Fill),
        text(form_title).size(14),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Render the toolbar. Save only becomes active once answers were accepted
/// and there is somewhere to write them.
pub fn view_toolbar(can_save: bool) -> Element<'static, Message> {
    let save = button(text("Save").size(11))
        .on_press_maybe(can_save.then_some(Message::SaveAnswers))
        .padding(Padding::from([4, 8]))
        .style(button::secondary);

    row![
        button(text("Submit").size(11))
            .on_press(Message::Submit)
            .padding(Padding::from([4, 8]))
            .style(button::primary),
        save,
        Space::new().width(Length::Fill),
        button(text("Clear").size(11))
            .on_press(Message::Reset)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .spacing(4)
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}
