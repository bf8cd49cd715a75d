// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the postsearch CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `POSTSEARCH_THEME` first, then `COLORFGBG`, then defaults to dark. Respects
//! `NO_COLOR` and falls back to plain text when stdout is not a TTY.
//!
//! # Theme detection order
//!
//! 1. `POSTSEARCH_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use postsearch::Segment;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Some(bg) = colorfgbg.and_then(|v| v.split(';').next_back()) {
        if let Ok(bg_num) = bg.parse::<u8>() {
            if bg_num >= 7 && bg_num != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

fn detect_theme() -> Theme {
    parse_theme(
        std::env::var("POSTSEARCH_THEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (255, 215, 0);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (152, 104, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// THEME-AWARE COLOR ACCESSORS
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_YELLOW);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Border color, or nothing when colors are off.
fn border(color_fn: fn() -> String) -> (String, &'static str) {
    if use_colors() {
        (color_fn(), RESET)
    } else {
        (String::new(), "")
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Greedy word wrap to `width` characters. Words longer than a line are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if line_len == 0 { word.len() } else { word.len() + 1 };
        if line_len + needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let (b, reset) = border(GRAY);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{reset}{content}{}{b}│{reset}", " ".repeat(pad));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (b, reset) = border(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}┌{reset}{label_part}{b}{}┐{reset}", "─".repeat(remaining));
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let (b, reset) = border(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}├{reset}{label_part}{b}{}┤{reset}", "─".repeat(remaining));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let (b, reset) = border(GRAY);
    println!("{b}└{}┘{reset}", "─".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Render highlight segments, marked runs in bold yellow.
///
/// Without colors, marked runs are wrapped in `[` `]`.
pub fn segments(parts: &[Segment]) -> String {
    let colors = use_colors();
    parts
        .iter()
        .map(|part| match (part.marked, colors) {
            (false, _) => part.text.clone(),
            (true, true) => format!("{}{}{}{}", BOLD, BRIGHT_YELLOW(), part.text, RESET),
            (true, false) => format!("[{}]", part.text),
        })
        .collect()
}

/// Color-coded relevance score
pub fn score_value(score: u64) -> String {
    if !use_colors() {
        return format!("{:>6}", score);
    }
    let color = if score >= 1000 {
        BRIGHT_GREEN()
    } else if score >= 300 {
        GREEN()
    } else if score >= 50 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{:>6}{}", color, score, RESET)
}

/// Cache hit/miss badge
pub fn cache_badge(from_cache: bool) -> String {
    if from_cache {
        themed(GREEN, &[], "[cache]")
    } else {
        themed(BLUE, &[], "[fetched]")
    }
}

/// Dimmed tag list: #rust #docker
pub fn tag_list(tags: &[String]) -> String {
    let joined = tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    themed(MAGENTA, &[DIM], &joined)
}

/// Red error line for stderr
pub fn error_line(message: &str) -> String {
    themed(RED, &[BOLD], message)
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
