//! Display colors for readiness statuses.

/// Color assigned to a status label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusColor {
    Green,
    Blue,
    Red,
    Yellow,
    Orange,
    LightBlue,
    Gray,
}

impl StatusColor {
    /// Style class token used by the dashboard
    pub fn class(&self) -> &'static str {
        match self {
            StatusColor::Green => "text-green-500",
            StatusColor::Blue => "text-blue-500",
            StatusColor::Red => "text-red-500",
            StatusColor::Yellow => "text-yellow-500",
            StatusColor::Orange => "text-orange-500",
            StatusColor::LightBlue => "text-blue-400",
            StatusColor::Gray => "text-gray-400",
        }
    }

    /// ANSI foreground escape for terminal output
    pub fn ansi(&self) -> &'static str {
        match self {
            StatusColor::Green => "\x1b[32m",
            StatusColor::Blue => "\x1b[34m",
            StatusColor::Red => "\x1b[31m",
            StatusColor::Yellow => "\x1b[33m",
            StatusColor::Orange => "\x1b[38;5;208m",
            StatusColor::LightBlue => "\x1b[94m",
            StatusColor::Gray => "\x1b[90m",
        }
    }
}

/// Map a status label to its color
///
/// Unknown labels are gray.
pub fn color_for(status: &str) -> StatusColor {
    match status {
        "PUSH" => StatusColor::Green,
        "NORMAL" => StatusColor::Blue,
        "PROTECT" => StatusColor::Red,
        "DELOAD" => StatusColor::Yellow,
        "HIGH" => StatusColor::Orange,
        "MEDIUM" => StatusColor::Yellow,
        "LOW" => StatusColor::LightBlue,
        _ => StatusColor::Gray,
    }
}
