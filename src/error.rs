//! Error types shared by every producer and algorithm in the crate.
//!
//! Errors are values: they travel through the same channel as the elements
//! of a sequence (`Result<IndexedValue<I, A>, Error>`) so that a lazy
//! producer can hand out everything it computed before the failure point.
//!
//! Cancellation is kept apart from ordinary failures. A consumer that wants
//! to retry after a deadline can ask [`Error::is_cancellation`] instead of
//! matching on messages.

use std::fmt;
use std::rc::Rc;

/// Why an [`ExecutionContext`](crate::context::ExecutionContext) stopped
/// accepting work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The cancellation token was tripped explicitly.
    Cancelled,
    /// The deadline attached to the context has passed.
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(formatter, "operation cancelled"),
            Self::DeadlineExceeded => write!(formatter, "deadline exceeded"),
        }
    }
}

/// The error type of the crate.
///
/// # Examples
///
/// ```rust
/// use ixseq::error::{CancelReason, Error};
///
/// let error = Error::Cancelled(CancelReason::DeadlineExceeded);
/// assert!(error.is_cancellation());
/// assert_eq!(format!("{error}"), "deadline exceeded");
///
/// let error = Error::element("bad row");
/// assert!(!error.is_cancellation());
/// assert_eq!(format!("{error}"), "element error: bad row");
/// ```
#[derive(Debug, Clone)]
pub enum Error {
    /// The ambient context was cancelled or its deadline passed.
    ///
    /// Always the last item a producer emits.
    Cancelled(CancelReason),
    /// A single element could not be produced.
    Element {
        /// Human readable description.
        message: String,
    },
    /// A comparator failed while ordering elements.
    Comparison {
        /// Human readable description.
        message: String,
    },
    /// A distance function failed while ranking diff candidates.
    Distance {
        /// Human readable description.
        message: String,
    },
    /// An error raised by caller supplied code.
    External(Rc<dyn std::error::Error>),
}

impl Error {
    /// Creates an [`Error::Element`].
    pub fn element(message: impl Into<String>) -> Self {
        Self::Element {
            message: message.into(),
        }
    }

    /// Creates an [`Error::Comparison`].
    pub fn comparison(message: impl Into<String>) -> Self {
        Self::Comparison {
            message: message.into(),
        }
    }

    /// Creates an [`Error::Distance`].
    pub fn distance(message: impl Into<String>) -> Self {
        Self::Distance {
            message: message.into(),
        }
    }

    /// Wraps a caller error.
    pub fn external<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::External(Rc::new(error))
    }

    /// Returns `true` if this error was produced by cancellation or a
    /// deadline rather than by a failing element or callback.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Returns the cancellation reason, if any.
    #[must_use]
    pub const fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            Self::Cancelled(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(reason) => write!(formatter, "{reason}"),
            Self::Element { message } => write!(formatter, "element error: {message}"),
            Self::Comparison { message } => write!(formatter, "comparison failed: {message}"),
            Self::Distance { message } => write!(formatter, "distance failed: {message}"),
            Self::External(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::External(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Cancelled(left), Self::Cancelled(right)) => left == right,
            (Self::Element { message: left }, Self::Element { message: right })
            | (Self::Comparison { message: left }, Self::Comparison { message: right })
            | (Self::Distance { message: left }, Self::Distance { message: right }) => {
                left == right
            }
            (Self::External(left), Self::External(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<CancelReason> for Error {
    fn from(reason: CancelReason) -> Self {
        Self::Cancelled(reason)
    }
}
