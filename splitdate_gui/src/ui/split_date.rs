//! Split date field
//!
//! One date question rendered as:
//! - Month picker (blank entry plus January..December)
//! - Day and year text boxes
//! - A bordered group box, drawn red when a rule flags the whole date
//! - The group's error container listing every failing message
//!
//! Required failures only mark the empty sub-fields; every other failure
//! marks the group box instead.

use iced::widget::{column, container, pick_list, row, text, text_input, Column};
use iced::{Alignment, Color, Element, Length, Theme};

use splitdate_core::parts::MonthOption;
use splitdate_core::{DatePart, GroupState, Highlight, SplitDateWidget};

use crate::Message;

const INVALID: [f32; 3] = [0.8, 0.2, 0.2];

/// Render one split date question
pub fn view<'a>(widget: &'a SplitDateWidget, label: &'a str, state: GroupState) -> Element<'a, Message> {
    let id = widget.id();
    let parts = widget.parts();

    let month_flagged = state.part_highlighted(DatePart::Month);
    let month_id = id.to_string();
    let month = pick_list(
        widget.month_options(),
        widget.selected_month().filter(|option| !option.value.is_empty()),
        move |option: MonthOption| Message::PartChanged {
            id: month_id.clone(),
            part: DatePart::Month,
            value: option.value,
        },
    )
    .placeholder("Month")
    .width(Length::Fixed(130.0))
    .text_size(12)
    .style(move |theme: &Theme, status| {
        let mut style = pick_list::default(theme, status);
        if month_flagged {
            style.border.color = Color::from(INVALID);
        }
        style
    });

    let inputs = row![
        labeled(DatePart::Month, month.into()),
        labeled(
            DatePart::Day,
            part_input(id, DatePart::Day, &parts.day, "DD", state.part_highlighted(DatePart::Day), 50.0),
        ),
        labeled(
            DatePart::Year,
            part_input(id, DatePart::Year, &parts.year, "YYYY", state.part_highlighted(DatePart::Year), 70.0),
        ),
    ]
    .spacing(8)
    .align_y(Alignment::End);

    let group_flagged = state.highlight == Highlight::Group;
    let group = container(inputs).padding(6).style(move |theme: &Theme| {
        let mut style = container::bordered_box(theme);
        if group_flagged {
            style.border.color = Color::from(INVALID);
            style.border.width = 2.0;
        }
        style
    });

    let errors = Column::with_children(
        state
            .messages()
            .into_iter()
            .map(|message| text(message.to_string()).size(11).color(INVALID).into()),
    )
    .spacing(2);

    column![text(label).size(13), group, errors].spacing(4).into()
}

fn labeled(part: DatePart, input: Element<'_, Message>) -> Element<'_, Message> {
    column![text(part.label()).size(10).color([0.5, 0.5, 0.5]), input]
        .spacing(2)
        .into()
}

/// Day or year box
fn part_input<'a>(
    id: &str,
    part: DatePart,
    value: &'a str,
    placeholder: &'a str,
    flagged: bool,
    width: f32,
) -> Element<'a, Message> {
    let id = id.to_string();
    text_input(placeholder, value)
        .on_input(move |value| Message::PartChanged {
            id: id.clone(),
            part,
            value,
        })
        .width(Length::Fixed(width))
        .padding(4)
        .size(12)
        .style(move |theme: &Theme, status| {
            let mut style = text_input::default(theme, status);
            if flagged {
                style.border.color = Color::from(INVALID);
            }
            style
        })
        .into()
}
