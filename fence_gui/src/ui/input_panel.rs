//! Input Panel (Left Side)
//!
//! Fence dimensions are free text and parsed only on Calculate. The three
//! price selectors are dependent: choosing a metal type repopulates the
//! profile heights and thicknesses offered for it.

use iced::widget::{checkbox, column, container, pick_list, row, scrollable, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::{App, Message};

const LABEL_WIDTH: f32 = 150.0;

/// Render the input panel
///
/// `input_ratio` is this panel's share of the window width.
pub fn view_input_panel(app: &App, input_ratio: f32) -> Element<'_, Message> {
    let form = &app.form;

    let dimensions = column![
        text("Fence").size(14),
        Space::new().height(4),
        labeled_input("Fence length (m):", &form.length, Message::LengthChanged),
        labeled_input("Fence height (m):", &form.height, Message::HeightChanged),
        labeled_input("Posts:", &form.posts, Message::PostsChanged),
        labeled_input("Post depth (m):", &form.post_depth, Message::PostDepthChanged),
        labeled_input("Gates:", &form.gates, Message::GatesChanged),
        labeled_input("Doors:", &form.doors, Message::DoorsChanged),
        labeled_input(
            "Delivery distance (km):",
            &form.delivery_distance,
            Message::DeliveryDistanceChanged,
        ),
    ]
    .spacing(6);

    let selection = column![
        text("Profiled sheet").size(14),
        Space::new().height(4),
        labeled_select(
            "Metal type:",
            pick_list(
                app.metal_types.as_slice(),
                app.selected_metal.clone(),
                Message::MetalTypeSelected,
            )
            .placeholder("Load prices first")
            .width(Length::Fill)
            .text_size(11)
            .into(),
        ),
        labeled_select(
            "Profile height (mm):",
            pick_list(
                app.profile_heights.as_slice(),
                app.selected_profile_height,
                Message::ProfileHeightSelected,
            )
            .width(Length::Fill)
            .text_size(11)
            .into(),
        ),
        labeled_select(
            "Metal thickness (mm):",
            pick_list(
                app.thicknesses.as_slice(),
                app.selected_thickness,
                Message::ThicknessSelected,
            )
            .width(Length::Fill)
            .text_size(11)
            .into(),
        ),
    ]
    .spacing(6);

    let options = column![
        text("Options").size(14),
        Space::new().height(4),
        checkbox(form.foundation)
            .label("Foundation fill")
            .on_toggle(Message::FoundationToggled)
            .text_size(11),
        checkbox(form.coating)
            .label("Polymer coating")
            .on_toggle(Message::CoatingToggled)
            .text_size(11),
    ]
    .spacing(6);

    let content = column![
        dimensions,
        Space::new().height(12),
        selection,
        Space::new().height(12),
        options,
    ]
    .spacing(4)
    .padding(8);

    let portion = (input_ratio * 100.0) as u16;

    container(scrollable(content))
        .width(Length::FillPortion(portion))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

/// Helper to create a labeled text input
fn labeled_input<'a>(
    label: &'a str,
    value: &'a str,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).size(11).width(Length::Fixed(LABEL_WIDTH)),
        text_input("", value)
            .on_input(on_change)
            .width(Length::Fill)
            .padding(4)
            .size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn labeled_select<'a>(label: &'a str, select: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(11).width(Length::Fixed(LABEL_WIDTH)), select]
        .align_y(Alignment::Center)
        .into()
}
