//! Status-line macros used across the workspace for direct terminal feedback.
//!
//! These are intentionally separate from `tracing`: they are user-facing
//! output, not diagnostics, and always print.

use colored::{ColoredString, Colorize};

#[doc(hidden)]
pub enum StatusLevel {
    Info,
    Success,
    Warn,
    Fail,
}

#[doc(hidden)]
pub fn emit(level: StatusLevel, msg: String) {
    let symbol: ColoredString = match level {
        StatusLevel::Info => "[?]".blue(),
        StatusLevel::Success => "[+]".green().bold(),
        StatusLevel::Warn => "[*]".yellow().bold(),
        StatusLevel::Fail => "[-]".red().bold(),
    };
    println!("{} {}", symbol, msg);
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::macros::emit($crate::macros::StatusLevel::Info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::macros::emit($crate::macros::StatusLevel::Success, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::macros::emit($crate::macros::StatusLevel::Warn, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {
        $crate::macros::emit($crate::macros::StatusLevel::Fail, format!($($arg)*))
    };
}
