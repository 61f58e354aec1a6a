use iced::gradient::Linear;
use iced::theme::Palette;
use iced::widget::container;
use iced::{Background, Color, Gradient, Radians, Theme};

/// #FF5046
pub const PRIMARY: Color = Color {
    r: 1.0,
    g: 80.0 / 255.0,
    b: 70.0 / 255.0,
    a: 1.0,
};
/// #1C1C1C, page background and gradient accent
pub const SECONDARY: Color = Color {
    r: 28.0 / 255.0,
    g: 28.0 / 255.0,
    b: 28.0 / 255.0,
    a: 1.0,
};
/// #616161 at 70%, placeholder fill for posters that are still loading
pub const TERTIARY: Color = Color {
    r: 97.0 / 255.0,
    g: 97.0 / 255.0,
    b: 97.0 / 255.0,
    a: 0.7,
};
pub const TEXT: Color = Color::WHITE;

pub fn theme() -> Theme {
    Theme::custom(
        "Movies".to_string(),
        Palette {
            background: SECONDARY,
            text: TEXT,
            primary: PRIMARY,
            success: Color::from_rgb8(0x4C, 0xAF, 0x50),
            danger: PRIMARY,
        },
    )
}

fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

/// Top to bottom gradient built from evenly spaced stops
fn vertical(stops: &[Color]) -> Background {
    let last = stops.len().saturating_sub(1).max(1) as f32;
    let linear = stops
        .iter()
        .enumerate()
        .fold(Linear::new(Radians::PI), |linear, (i, color)| {
            linear.add_stop(i as f32 / last, *color)
        });
    Background::Gradient(Gradient::Linear(linear))
}

/// Legibility overlay drawn over the background images
pub fn backdrop_overlay(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(vertical(&[
            with_alpha(Color::BLACK, 0.3),
            Color::TRANSPARENT,
            Color::TRANSPARENT,
            with_alpha(SECONDARY, 0.5),
            with_alpha(SECONDARY, 0.7),
            with_alpha(SECONDARY, 0.9),
            SECONDARY,
        ])),
        ..container::Style::default()
    }
}

/// Fade from the carousel into the solid grid area
pub fn grid_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(vertical(&[
            Color::TRANSPARENT,
            with_alpha(SECONDARY, 0.9),
            SECONDARY,
            SECONDARY,
        ])),
        ..container::Style::default()
    }
}

/// Solid page color, shown where no image is available
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(SECONDARY)),
        text_color: Some(TEXT),
        ..container::Style::default()
    }
}

pub fn placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(TERTIARY)),
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_matches_hex_colors() {
        assert_eq!(PRIMARY, Color::from_rgb8(0xFF, 0x50, 0x46));
        assert_eq!(SECONDARY, Color::from_rgb8(0x1C, 0x1C, 0x1C));
        assert_eq!(TERTIARY, Color::from_rgba8(0x61, 0x61, 0x61, 0.7));
        assert_eq!(TEXT, Color::from_rgb8(0xFF, 0xFF, 0xFF));
    }
}
