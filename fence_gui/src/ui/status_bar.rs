//! Status Bar (Bottom)
//!
//! Shows the loaded price table and the outcome of the last action.

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view_status_bar(source_name: Option<String>, status: &str) -> Element<'_, Message> {
    let table_info = match source_name {
        Some(name) => format!("Prices: {}", name),
        None => "No price table loaded".to_string(),
    };

    row![
        text(table_info).size(10),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
