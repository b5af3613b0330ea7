use thiserror::Error;

/// Fatal errors, reported to the user on exit
#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal is {cols}x{rows}, the game needs at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },
}

/// A rejected config entry. These are logged and skipped, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: expected key=value")]
    MissingSeparator { line: usize },

    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: '{value}' is not a valid number for '{key}'")]
    InvalidValue { line: usize, key: String, value: String },

    #[error("line {line}: {key}={value} is out of range {min}..={max}")]
    OutOfRange {
        line: usize,
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },
}
