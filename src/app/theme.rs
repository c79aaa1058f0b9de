//! Colour palette and its `theme.conf` representation.

use std::path::Path;

use ratatui::style::Color;
use tracing::{debug, warn};

/// Colours used across the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub tab_active_fg: Color,
    pub tab_active_bg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,
    pub active_fg: Color,
    pub inactive_fg: Color,
    pub error_fg: Color,
}

/// Keys accepted in `theme.conf`, in the order they are written.
const KEYS: [&str; 17] = [
    "text",
    "muted",
    "title",
    "border",
    "header_bg",
    "header_fg",
    "tab_active_fg",
    "tab_active_bg",
    "status_bg",
    "status_fg",
    "highlight_fg",
    "highlight_bg",
    "badge_fg",
    "badge_bg",
    "active_fg",
    "inactive_fg",
    "error_fg",
];

impl Theme {
    /// Catppuccin Mocha; the default.
    pub fn mocha() -> Self {
        // https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),          // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),         // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),         // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),        // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),     // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),     // lavender
            tab_active_fg: Color::Rgb(0x1e, 0x1e, 0x2e), // base
            tab_active_bg: Color::Rgb(0x89, 0xb4, 0xfa), // blue
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),     // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),     // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),  // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),  // surface1
            badge_fg: Color::Rgb(0x89, 0xb4, 0xfa),      // blue
            badge_bg: Color::Rgb(0x31, 0x32, 0x44),      // surface0
            active_fg: Color::Rgb(0xa6, 0xe3, 0xa1),     // green
            inactive_fg: Color::Rgb(0xf3, 0x8b, 0xa8),   // red
            error_fg: Color::Rgb(0xeb, 0xa0, 0xac),      // maroon
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "tab_active_fg" => &mut self.tab_active_fg,
            "tab_active_bg" => &mut self.tab_active_bg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "badge_fg" => &mut self.badge_fg,
            "badge_bg" => &mut self.badge_bg,
            "active_fg" => &mut self.active_fg,
            "inactive_fg" => &mut self.inactive_fg,
            "error_fg" => &mut self.error_fg,
            _ => return None,
        })
    }

    fn get(&self, key: &str) -> Option<Color> {
        let mut copy = *self;
        copy.slot(key).map(|c| *c)
    }

    /// Parse `key = colour` lines on top of `mocha`. Unknown keys and bad colours are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            match (theme.slot(key), parse_color(val)) {
                (Some(slot), Some(color)) => *slot = color,
                _ => debug!(key, val, "ignoring theme entry"),
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Render the theme as `theme.conf` text.
    pub fn to_conf(&self) -> String {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# rbac-dashboard theme\n");
        buf.push_str("# Colors: #RRGGBB, RRGGBB or 'reset'\n\n");
        for key in KEYS {
            if let Some(color) = self.get(key) {
                let _ = writeln!(&mut buf, "{} = {}", key, color_to_str(color));
            }
        }
        buf
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_conf())
    }

    /// Load `path`, or write the default theme there when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

/// Parse "#RRGGBB", "RRGGBB" or "reset".
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        // reset, named and indexed colours have no hex form
        _ => "reset".to_string(),
    }
}
