// Language-identification probabilities

use serde::Serialize;

/// Allowed deviation of `p_l1 + p_l2` from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Rejected language-identification signal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("probability is not finite: {0}")]
    NotFinite(f64),

    #[error("probability out of range [0, 1]: {0}")]
    OutOfRange(f64),

    #[error("probabilities do not sum to 1: {p_l1} + {p_l2} = {sum}")]
    BadSum { p_l1: f64, p_l2: f64, sum: f64 },
}

/// Probabilities that a token belongs to L1 or L2.
///
/// Always satisfies `p_l1 + p_l2 = 1 ± PROBABILITY_TOLERANCE` with both values
/// in `[0, 1]`. Invalid pairs are rejected by [`LidResult::new`], never
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LidResult {
    p_l1: f64,
    p_l2: f64,
}

impl LidResult {
    pub fn new(p_l1: f64, p_l2: f64) -> Result<Self, SignalError> {
        for p in [p_l1, p_l2] {
            if !p.is_finite() {
                return Err(SignalError::NotFinite(p));
            }
            if !(0.0..=1.0).contains(&p) {
                return Err(SignalError::OutOfRange(p));
            }
        }
        let sum = p_l1 + p_l2;
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SignalError::BadSum { p_l1, p_l2, sum });
        }
        Ok(Self { p_l1, p_l2 })
    }

    /// Build a result from the L1 probability alone.
    pub fn from_l1(p_l1: f64) -> Result<Self, SignalError> {
        Self::new(p_l1, 1.0 - p_l1)
    }

    /// Uninformative signal used when the identifier is unavailable.
    pub fn neutral() -> Self {
        Self {
            p_l1: 0.5,
            p_l2: 0.5,
        }
    }

    pub fn p_l1(&self) -> f64 {
        self.p_l1
    }

    pub fn p_l2(&self) -> f64 {
        self.p_l2
    }
}

impl Default for LidResult {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_pair() {
        let lid = LidResult::new(0.9, 0.1).unwrap();
        assert_eq!(lid.p_l1(), 0.9);
        assert_eq!(lid.p_l2(), 0.1);
    }

    #[test]
    fn accepts_sum_within_tolerance() {
        assert!(LidResult::new(0.6, 0.4 + 5e-7).is_ok());
        assert!(LidResult::new(1.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_bad_sum() {
        assert!(matches!(
            LidResult::new(0.6, 0.6),
            Err(SignalError::BadSum { .. })
        ));
        assert!(matches!(
            LidResult::new(0.5, 0.5 + 1e-5),
            Err(SignalError::BadSum { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert_eq!(
            LidResult::new(-0.1, 1.1),
            Err(SignalError::OutOfRange(-0.1))
        );
        assert!(matches!(
            LidResult::new(f64::NAN, 0.5),
            Err(SignalError::NotFinite(_))
        ));
        assert!(matches!(
            LidResult::new(0.5, f64::INFINITY),
            Err(SignalError::NotFinite(_))
        ));
    }

    #[test]
    fn from_l1_complements() {
        let lid = LidResult::from_l1(0.25).unwrap();
        assert_eq!(lid.p_l2(), 0.75);
        assert!(LidResult::from_l1(1.5).is_err());
    }

    #[test]
    fn neutral_is_half_half() {
        let lid = LidResult::neutral();
        assert_eq!((lid.p_l1(), lid.p_l2()), (0.5, 0.5));
        assert_eq!(LidResult::default(), lid);
    }
}
