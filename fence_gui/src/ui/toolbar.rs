//! Toolbar component
//!
//! Loads the price table, runs the calculation and saves the results workbook.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::Message;

/// Render the application header
pub fn view_header(title: &str) -> Element<'_, Message> {
    row![
        text(title).size(24),
        Space::new().width(Length::Fill),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Render the toolbar with the three form actions
pub fn view_toolbar() -> Element<'static, Message> {
    row![
        button(text("Load prices").size(11))
            .on_press(Message::LoadPrices)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
        button(text("Calculate").size(11))
            .on_press(Message::Calculate)
            .padding(Padding::from([4, 8]))
            .style(button::primary),
        button(text("Save results").size(11))
            .on_press(Message::SaveResults)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .spacing(4)
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}
