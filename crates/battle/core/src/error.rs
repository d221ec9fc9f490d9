//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors ([`crate::ActionError`], [`crate::TurnError`],
//! [`crate::RosterError`]) are defined next to the code that raises them. None
//! of them escape a battle: the controller turns every failure into a log
//! entry, so severity mostly decides whether that entry is an error.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was ill-formed (bad target, missing ability, not enough MP).
    ///
    /// Logged as a regular battle message; the turn is consumed.
    Validation,

    /// Expected runtime condition the engine recovers from on its own.
    ///
    /// Examples: scan guard tripped and a sleeper was woken.
    Recoverable,

    /// Unexpected failure inside an effect or state transition.
    ///
    /// Logged as an error-kind entry; the turn loop still advances.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Recoverable => "recoverable",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an engine bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - The Display text is shown to the player, so phrase it as a battle message
/// - Classify severity based on who is at fault, not on impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
