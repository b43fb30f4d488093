//! Page header: title, page switcher and display mode toggle

use iced::widget::{button, container, row, text, Space};
use iced::{Alignment, Element, Length, Theme};
use meridian_charts::DisplayMode;

use crate::app::{DashMessage, Page};

pub fn view(title: &str, page: Page, mode: DisplayMode) -> Element<'_, DashMessage> {
    let nav = Page::ALL.iter().map(|&target| -> Element<'_, DashMessage> {
        let label = text(target.title()).size(14);
        let nav_button = button(label).padding([4, 10]);
        if target == page {
            nav_button.style(button::primary).into()
        } else {
            nav_button
                .style(button::text)
                .on_press(DashMessage::Navigate(target))
                .into()
        }
    });

    let toggle = button(text(format!("{} mode", mode.toggled().label())).size(12))
        .padding([4, 10])
        .style(button::secondary)
        .on_press(DashMessage::ToggleDisplayMode);

    container(
        row![
            text(title).size(22),
            Space::new().width(24),
            iced::widget::Row::with_children(nav).spacing(4),
            Space::new().width(Length::Fill),
            toggle,
        ]
        .align_y(Alignment::Center),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(|theme: &Theme| {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(palette.background.weak.color.into()),
            ..Default::default()
        }
    })
    .into()
}
