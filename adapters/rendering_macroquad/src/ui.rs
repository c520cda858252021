//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Snapshot of the overlay's layout and content for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OverlayUiContext<'a> {
    /// Top-left corner of the overlay window in screen coordinates.
    pub(crate) origin: Vec2,
    /// Overlay window dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin.
    pub(crate) background: Color,
    /// Message shown above the button.
    pub(crate) message: &'a str,
    /// Caption of the overlay button.
    pub(crate) button_label: &'a str,
}

/// Renders the overlay window and reports whether its button was pressed.
pub(crate) fn draw_overlay_ui(ui: &mut Ui, context: OverlayUiContext<'_>) -> bool {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(24.0, 24.0, 24.0, 24.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .font_size(28)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 12.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .font_size(22)
        .margin(RectOffset::new(16.0, 16.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut button_pressed = false;
    let _ = ui.window(hash!("overlay"), context.origin, context.size, |ui| {
        ui.label(None, context.message);
        button_pressed = ui.button(None, context.button_label);
    });

    ui.pop_skin();

    button_pressed
}
