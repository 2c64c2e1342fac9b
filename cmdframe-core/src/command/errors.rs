use std::fmt::Display;

pub trait GetErrorSeverity {
    fn get_severity(&self) -> ErrorSeverity;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Expected and frequent. Reported to the sender, never logged as a fault.
    Low,
    /// A fault in a handler or in configuration.
    High,
}

/// Raw metadata that cannot describe a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataError {
    EmptyName,
    EmptyAlias,
    NegativeMinArgs(i32),
    InvalidMaxArgs(i32),
    MaxBelowMin { min: i32, max: i32 },
}
impl Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("command name must not be empty"),
            Self::EmptyAlias => f.write_str("command aliases must not be empty"),
            Self::NegativeMinArgs(min) => write!(f, "min_args must not be negative (got {min})"),
            Self::InvalidMaxArgs(max) => write!(f, "max_args must be -1 or a non-negative count (got {max})"),
            Self::MaxBelowMin { min, max } => {
                write!(f, "max_args ({max}) must not be less than min_args ({min})")
            },
        }
    }
}
impl std::error::Error for MetadataError {}

/// A handler that was skipped while registering or building.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    InvalidMetadata { command: String, error: MetadataError },
    /// `identifier` is already claimed by a previously registered command.
    DuplicateIdentifier { command: String, identifier: String },
    UnsupportedParameters { command: String, signature: String },
}
impl RegistrationError {
    pub fn command(&self) -> &str {
        match self {
            Self::InvalidMetadata { command, .. }
            | Self::DuplicateIdentifier { command, .. }
            | Self::UnsupportedParameters { command, .. } => command,
        }
    }
}
impl Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMetadata { command, error } => {
                write!(f, "command '{command}' has invalid metadata: {error}")
            },
            Self::DuplicateIdentifier { command, identifier } => write!(
                f,
                "a duplicate command identifier was found and '{command}' will not be registered: {identifier}"
            ),
            Self::UnsupportedParameters { command, signature } => write!(
                f,
                "command '{command}' must take no arguments or a single CommandContext, found ({signature})"
            ),
        }
    }
}
impl std::error::Error for RegistrationError {}
impl GetErrorSeverity for RegistrationError {
    fn get_severity(&self) -> ErrorSeverity {
        ErrorSeverity::High
    }
}

/// Invalid input from the sender. The `Display` text is what the sender is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    PlayerOnly,
    NoPermission,
    TooFewArguments,
    TooManyArguments,
    /// Carries the flag exactly as typed, dash included.
    NoSuchFlag(String),
    FlagRequiresValue(String),
}
impl UsageError {
    /// Whether the command's usage line follows the message.
    pub fn shows_usage(&self) -> bool {
        !matches!(self, Self::PlayerOnly | Self::NoPermission)
    }
}
impl Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerOnly => f.write_str("You must be a player to use this command."),
            Self::NoPermission => f.write_str("You do not have permission to use this command."),
            Self::TooFewArguments => f.write_str("Too few arguments."),
            Self::TooManyArguments => f.write_str("Too many arguments."),
            Self::NoSuchFlag(flag) => write!(f, "Flag '{flag}' is not supported on this command."),
            Self::FlagRequiresValue(flag) => write!(f, "Flag '{flag}' requires a value after it."),
        }
    }
}
impl std::error::Error for UsageError {}
impl GetErrorSeverity for UsageError {
    fn get_severity(&self) -> ErrorSeverity {
        ErrorSeverity::Low
    }
}

#[derive(Debug)]
pub enum ExecutionError {
    Usage(UsageError),
    /// The handler returned an error.
    Command(anyhow::Error),
    /// The handler panicked.
    Panicked(String),
}
impl GetErrorSeverity for ExecutionError {
    fn get_severity(&self) -> ErrorSeverity {
        match self {
            Self::Usage(e) => e.get_severity(),
            Self::Command(_) | Self::Panicked(_) => ErrorSeverity::High,
        }
    }
}
impl Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(e) => write!(f, "{e}"),
            Self::Command(e) => write!(f, "{e:#}"),
            Self::Panicked(message) => write!(f, "handler panicked: {message}"),
        }
    }
}
impl std::error::Error for ExecutionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_texts() {
        assert_eq!(
            UsageError::NoSuchFlag("-x".to_owned()).to_string(),
            "Flag '-x' is not supported on this command."
        );
        assert_eq!(
            UsageError::FlagRequiresValue("-v".to_owned()).to_string(),
            "Flag '-v' requires a value after it."
        );
        assert!(UsageError::TooFewArguments.shows_usage());
        assert!(!UsageError::NoPermission.shows_usage());
    }

    #[test]
    fn severities() {
        assert_eq!(
            ExecutionError::Usage(UsageError::PlayerOnly).get_severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            ExecutionError::Command(anyhow::anyhow!("boom")).get_severity(),
            ErrorSeverity::High
        );
        assert_eq!(ExecutionError::Panicked("boom".to_owned()).get_severity(), ErrorSeverity::High);
    }

    #[test]
    fn duplicate_names_identifier() {
        let err = RegistrationError::DuplicateIdentifier {
            command: "rebuild".to_owned(),
            identifier: "build".to_owned(),
        };
        assert_eq!(err.command(), "rebuild");
        assert!(err.to_string().ends_with(": build"));
    }
}
