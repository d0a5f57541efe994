use core::fmt;

/// An error to describe why an eccentricity was rejected by the
/// checked solving functions.
///
/// The unchecked [`solve`][crate::solve] function never produces this,
/// and instead returns meaningless values for out-of-range eccentricities.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum EccentricityError {
    /// ### Attempt to solve with a negative eccentricity.
    /// The eccentricity of a conic section is a non-negative number by definition.
    Negative,

    /// ### Attempt to solve with an eccentricity of 1 or more.
    /// Eccentricities of 1 and above describe parabolic and hyperbolic
    /// trajectories, which follow a different form of Kepler's equation.
    NotElliptic,

    /// ### Attempt to solve with a NaN or infinite eccentricity.
    NotFinite,
}

impl fmt::Display for EccentricityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Negative => "eccentricity must not be negative",
            Self::NotElliptic => "eccentricity must be less than 1",
            Self::NotFinite => "eccentricity must be finite",
        })
    }
}

impl core::error::Error for EccentricityError {}

/// An error to describe why two arrays could not be broadcast together.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BroadcastError {
    /// ### Two dimensions are neither equal nor 1.
    /// `axis` counts from the last (innermost) dimension, starting at 0.
    IncompatibleShapes {
        /// The offending axis, counted from the innermost dimension.
        axis: usize,
        /// The size of that axis in the mean anomaly array.
        left: usize,
        /// The size of that axis in the eccentricity array.
        right: usize,
    },

    /// ### The data of an array does not match its declared shape.
    DataLength {
        /// The product of the declared shape.
        expected: usize,
        /// The length of the data actually given.
        found: usize,
    },

    /// ### The number of elements in a shape does not fit in a `usize`.
    ShapeOverflow,

    /// ### The output buffer does not match the broadcast length.
    OutputLength {
        /// The broadcast length of the inputs.
        expected: usize,
        /// The length of the output buffer.
        found: usize,
    },
}

impl fmt::Display for BroadcastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IncompatibleShapes { axis, left, right } => write!(
                f,
                "shapes cannot be broadcast together: axis -{} has sizes {left} and {right}",
                axis + 1
            ),
            Self::DataLength { expected, found } => write!(
                f,
                "array has {found} elements but its shape holds {expected}"
            ),
            Self::ShapeOverflow => f.write_str("number of elements in shape overflows usize"),
            Self::OutputLength { expected, found } => write!(
                f,
                "output buffer has {found} elements but the broadcast length is {expected}"
            ),
        }
    }
}

impl core::error::Error for BroadcastError {}

/// An error returned by the checked batch functions.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BatchError {
    /// The inputs could not be broadcast together.
    Broadcast(BroadcastError),

    /// An eccentricity in the batch was out of range.
    ///
    /// `index` is the position in the eccentricity input, not in the output.
    Eccentricity {
        /// Position of the first rejected eccentricity.
        index: usize,
        /// Why it was rejected.
        error: EccentricityError,
    },
}

impl From<BroadcastError> for BatchError {
    fn from(value: BroadcastError) -> Self {
        Self::Broadcast(value)
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast(e) => fmt::Display::fmt(e, f),
            Self::Eccentricity { index, error } => {
                write!(f, "eccentricity at index {index}: {error}")
            }
        }
    }
}

impl core::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Broadcast(e) => Some(e),
            Self::Eccentricity { error, .. } => Some(error),
        }
    }
}
