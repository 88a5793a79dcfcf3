use crate::notifier::NoticeKind;
use crate::theme::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Base colors for one theme mode.
pub struct Palette {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub danger: Color,
    pub success: Color,
}

pub const LIGHT: Palette = Palette {
    name: "light",
    bg: Color::Rgb(0xf5, 0xf6, 0xfa),
    fg: Color::Rgb(0x2d, 0x34, 0x36),
    accent: Color::Rgb(0x2d, 0x6c, 0xdf),
    muted: Color::Rgb(0x7f, 0x8c, 0x8d),
    danger: Color::Rgb(0xc0, 0x39, 0x2b),
    success: Color::Rgb(0x27, 0xae, 0x60),
};

pub const DARK: Palette = Palette {
    name: "dark",
    bg: Color::Rgb(0x1e, 0x1e, 0x2e),
    fg: Color::Rgb(0xe0, 0xe0, 0xe0),
    accent: Color::Rgb(0x89, 0xb4, 0xfa),
    muted: Color::Rgb(0x6c, 0x70, 0x86),
    danger: Color::Rgb(0xf3, 0x8b, 0xa8),
    success: Color::Rgb(0xa6, 0xe3, 0xa1),
};

pub fn palette(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}

pub fn base_style(mode: ThemeMode) -> Style {
    let p = palette(mode);
    Style::default().fg(p.fg).bg(p.bg)
}

pub fn header_style(mode: ThemeMode) -> Style {
    Style::default()
        .fg(palette(mode).accent)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style(mode: ThemeMode) -> Style {
    Style::default()
        .bg(palette(mode).muted)
        .add_modifier(Modifier::BOLD)
}

pub fn dim_style(mode: ThemeMode) -> Style {
    Style::default().fg(palette(mode).muted)
}

pub fn border_style(mode: ThemeMode) -> Style {
    Style::default().fg(palette(mode).accent)
}

pub fn notice_style(mode: ThemeMode, kind: NoticeKind) -> Style {
    let p = palette(mode);
    let fg = match kind {
        NoticeKind::Success => p.success,
        NoticeKind::Error => p.danger,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Move controls render dim when disabled.
pub fn control_style(mode: ThemeMode, enabled: bool) -> Style {
    if enabled {
        Style::default().fg(palette(mode).accent)
    } else {
        Style::default()
            .fg(palette(mode).muted)
            .add_modifier(Modifier::DIM)
    }
}
