//! Results Panel (Right Side)
//!
//! Shows the error from the last failed action, otherwise the last
//! calculation: the total followed by one line per cost component.

use iced::widget::{column, container, row, scrollable, text, Column, Space};
use iced::{Element, Length};

use fence_core::display::format_money;

use crate::{App, Message};

/// Render the results panel
///
/// Uses the complement of the input panel's `input_ratio`.
pub fn view_results_panel(app: &App, input_ratio: f32) -> Element<'_, Message> {
    let currency = app.config.currency.as_str();

    let content: Column<'_, Message> = if let Some(ref error) = app.error_message {
        column![
            text("Error").size(14),
            Space::new().height(8),
            text(error).size(12).color([0.8, 0.2, 0.2]),
        ]
    } else if let Some(calculation) = app.session.last_calculation() {
        let mut lines = column![
            text(format!("Total cost: {}", format_money(calculation.breakdown.total, currency))).size(18),
            Space::new().height(8),
            text("Breakdown").size(14),
        ]
        .spacing(4);

        for item in &calculation.breakdown.items {
            lines = lines.push(
                row![
                    text(item.detail.as_str()).size(11).width(Length::Fill),
                    text(format_money(item.cost, currency)).size(11),
                ]
                .spacing(8),
            );
        }

        lines.push(Space::new().height(8)).push(
            text(format!(
                "Calculated at {}",
                calculation.calculated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
            .size(10)
            .color([0.5, 0.5, 0.5]),
        )
    } else {
        column![
            text(format!("Total cost: {}", format_money(0.0, currency))).size(18),
            Space::new().height(8),
            text("Fill in the form and press Calculate.").size(11).color([0.5, 0.5, 0.5]),
        ]
    };

    let portion = ((1.0 - input_ratio) * 100.0) as u16;

    container(scrollable(content.padding(8)))
        .width(Length::FillPortion(portion))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}
