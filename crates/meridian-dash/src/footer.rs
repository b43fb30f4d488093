//! Page footer

use iced::widget::{container, row, text, Space};
use iced::{Element, Length};

/// Static footer label
pub const FOOTER_TEXT: &str = "Meridian Admin";

pub fn view<'a, Message: 'a>() -> Element<'a, Message> {
    container(
        row![
            text(FOOTER_TEXT).size(12),
            Space::new().width(Length::Fill),
            text(format!("v{}", crate::VERSION)).size(12),
        ],
    )
    .padding([6, 16])
    .width(Length::Fill)
    .into()
}
