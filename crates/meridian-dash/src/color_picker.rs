//! Color picker page
//!
//! Holds one color in local state. Four channel sliders and a hex field
//! edit it; a swatch previews it. Sliders always yield a well-formed color;
//! a hex entry that does not parse is ignored and the previous color kept.

use iced::widget::{column, container, row, slider, text, text_input, Space};
use iced::{Alignment, Element, Length, Theme};
use meridian_charts::Color;
use tracing::debug;

/// One RGBA channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    fn label(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::Alpha => "A",
        }
    }

    fn get(self, color: Color) -> u8 {
        match self {
            Self::Red => color.r,
            Self::Green => color.g,
            Self::Blue => color.b,
            Self::Alpha => color.a,
        }
    }

    fn set(self, color: &mut Color, value: u8) {
        match self {
            Self::Red => color.r = value,
            Self::Green => color.g = value,
            Self::Blue => color.b = value,
            Self::Alpha => color.a = value,
        }
    }
}

/// Messages for the color picker
#[derive(Debug, Clone)]
pub enum ColorMessage {
    /// A slider moved
    ChannelChanged(Channel, f64),
    /// The hex field was edited
    HexEdited(String),
    /// The hex field was submitted
    HexSubmitted,
}

/// Color picker state
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSelector {
    color: Color,
    hex_input: String,
}

impl Default for ColorSelector {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl ColorSelector {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            hex_input: color.to_hex(),
        }
    }

    /// Current color
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Current color as a hex string
    #[must_use]
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn update(&mut self, message: ColorMessage) {
        match message {
            ColorMessage::ChannelChanged(channel, value) => {
                // Slider range is 0..=255
                let value = value.round().clamp(0.0, 255.0) as u8;
                channel.set(&mut self.color, value);
                self.hex_input = self.color.to_hex();
            }
            ColorMessage::HexEdited(input) => {
                if let Ok(color) = Color::from_hex(&input) {
                    self.color = color;
                }
                self.hex_input = input;
            }
            ColorMessage::HexSubmitted => {
                if Color::from_hex(&self.hex_input).is_err() {
                    debug!(input = %self.hex_input, "discarding malformed hex color");
                }
                self.hex_input = self.color.to_hex();
            }
        }
    }

    pub fn view(&self) -> Element<'_, ColorMessage> {
        let sliders = Channel::ALL.iter().map(|&channel| -> Element<'_, ColorMessage> {
            let value = f64::from(channel.get(self.color));
            row![
                text(channel.label()).size(14).width(16),
                slider(0.0..=255.0, value, move |v| ColorMessage::ChannelChanged(channel, v))
                    .step(1.0)
                    .width(Length::Fixed(260.0)),
                text(format!("{:>3}", channel.get(self.color))).size(12).width(32),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
        });

        let hex = text_input("#RRGGBB", &self.hex_input)
            .on_input(ColorMessage::HexEdited)
            .on_submit(ColorMessage::HexSubmitted)
            .width(Length::Fixed(140.0))
            .padding(6);

        let preview = self.color.to_iced();
        let swatch = container(Space::new().width(160).height(160)).style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(preview.into()),
                border: iced::Border {
                    color: palette.background.strong.color,
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            }
        });

        let controls = column![
            text("Pick a color").size(18),
            iced::widget::Column::with_children(sliders).spacing(6),
            row![text("Hex").size(14), hex].spacing(8).align_y(Alignment::Center),
        ]
        .spacing(16);

        row![controls, column![swatch, text(self.hex()).size(14)].spacing(8).align_x(Alignment::Center)]
            .spacing(32)
            .padding(24)
            .into()
    }
}
