/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Problem / starting point ----
    /// Starting point length does not match the problem dimension.
    StartingPointDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Starting point coordinates need to be finite.
    InvalidStartingPoint {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Problems must have at least one dimension.
    EmptyProblem,

    // ---- Batch options ----
    /// Epsilon needs to be positive and finite.
    InvalidEpsilon {
        value: f64,
        reason: &'static str,
    },

    /// Maximum iterations needs to be positive.
    InvalidMaxIterations {
        value: usize,
        reason: &'static str,
    },

    /// Line-search coefficients need 0 < c1 < c2 < 1.
    InvalidLsCoefficients {
        c1: f64,
        c2: f64,
        reason: &'static str,
    },

    /// L-BFGS history needs to be at least 1.
    InvalidHistorySize {
        value: usize,
        reason: &'static str,
    },

    /// Invalid optimizer or strategy name.
    InvalidName {
        name: String,
        reason: &'static str,
    },

    // ---- Stochastic options ----
    /// Epoch count needs to be positive.
    InvalidEpochs {
        value: usize,
        reason: &'static str,
    },

    /// Epoch size needs to be positive.
    InvalidEpochSize {
        value: usize,
        reason: &'static str,
    },

    /// Initial learning rate needs to be positive and finite.
    InvalidLearningRate {
        value: f64,
        reason: &'static str,
    },

    /// Decay / regularization factor needs to be non-negative and finite.
    InvalidDecay {
        value: f64,
        reason: &'static str,
    },

    /// Momentum needs to lie strictly inside (0, 1).
    InvalidMomentum {
        value: f64,
        reason: &'static str,
    },

    // ---- Accumulation ----
    /// Regularization weight needs to be non-negative and finite.
    InvalidRegularization {
        value: f64,
        reason: &'static str,
    },

    /// Accumulated criteria must agree on the parameter dimension.
    CriterionDimMismatch {
        expected: usize,
        found: usize,
    },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Problem / starting point ----
            OptError::StartingPointDimMismatch { expected, found } => {
                write!(f, "Starting point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidStartingPoint { index, value, reason } => {
                write!(f, "Invalid starting point at index {index}: {value}: {reason}")
            }
            OptError::EmptyProblem => {
                write!(f, "Problem has zero dimensions")
            }

            // ---- Batch options ----
            OptError::InvalidEpsilon { value, reason } => {
                write!(f, "Invalid epsilon {value}: {reason}")
            }
            OptError::InvalidMaxIterations { value, reason } => {
                write!(f, "Invalid maximum iterations {value}: {reason}")
            }
            OptError::InvalidLsCoefficients { c1, c2, reason } => {
                write!(f, "Invalid line-search coefficients (c1 = {c1}, c2 = {c2}): {reason}")
            }
            OptError::InvalidHistorySize { value, reason } => {
                write!(f, "Invalid L-BFGS history size {value}: {reason}")
            }
            OptError::InvalidName { name, reason } => {
                write!(f, "Invalid name '{name}': {reason}")
            }

            // ---- Stochastic options ----
            OptError::InvalidEpochs { value, reason } => {
                write!(f, "Invalid epoch count {value}: {reason}")
            }
            OptError::InvalidEpochSize { value, reason } => {
                write!(f, "Invalid epoch size {value}: {reason}")
            }
            OptError::InvalidLearningRate { value, reason } => {
                write!(f, "Invalid initial learning rate {value}: {reason}")
            }
            OptError::InvalidDecay { value, reason } => {
                write!(f, "Invalid decay factor {value}: {reason}")
            }
            OptError::InvalidMomentum { value, reason } => {
                write!(f, "Invalid momentum {value}: {reason}")
            }

            // ---- Accumulation ----
            OptError::InvalidRegularization { value, reason } => {
                write!(f, "Invalid regularization weight {value}: {reason}")
            }
            OptError::CriterionDimMismatch { expected, found } => {
                write!(f, "Criterion dimension mismatch: expected {expected}, found {found}")
            }
        }
    }
}
