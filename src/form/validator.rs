//! Accept/reject decision for a single numeric field.

/// Numeric range a field value must fall in: `lower_exclusive < v <= upper_inclusive`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower_exclusive: f64,
    pub upper_inclusive: f64,
}

impl Bounds {
    pub const fn up_to(upper_inclusive: f64) -> Self {
        Self {
            lower_exclusive: 0.0,
            upper_inclusive,
        }
    }
}

/// Why a candidate value was not stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("not a number")]
    NotANumber,
    #[error("must be greater than {min}")]
    TooLow { min: f64 },
    #[error("must be at most {max}")]
    TooHigh { max: f64 },
}

/// Check a candidate without touching any state. The empty string always passes.
pub fn check(candidate: &str, bounds: Bounds) -> Result<(), Rejection> {
    if candidate.is_empty() {
        return Ok(());
    }
    let n = parse_number(candidate).ok_or(Rejection::NotANumber)?;
    // NaN fails both comparisons below; keep it out explicitly.
    if n.is_nan() {
        return Err(Rejection::NotANumber);
    }
    if n <= bounds.lower_exclusive {
        return Err(Rejection::TooLow {
            min: bounds.lower_exclusive,
        });
    }
    if n > bounds.upper_inclusive {
        return Err(Rejection::TooHigh {
            max: bounds.upper_inclusive,
        });
    }
    Ok(())
}

/// Returns the string to keep: `candidate` if acceptable, `current` otherwise.
pub fn validate<'a>(current: &'a str, candidate: &'a str, bounds: Bounds) -> &'a str {
    match check(candidate, bounds) {
        Ok(()) => candidate,
        Err(_) => current,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_AGE_YEARS, MAX_HEIGHT_CM, MAX_WEIGHT_KG};

    const HEIGHT: Bounds = Bounds::up_to(MAX_HEIGHT_CM);
    const WEIGHT: Bounds = Bounds::up_to(MAX_WEIGHT_KG);
    const AGE: Bounds = Bounds::up_to(MAX_AGE_YEARS);

    #[test]
    fn empty_candidate_is_always_kept() {
        assert_eq!(validate("170", "", HEIGHT), "");
        assert!(check("", HEIGHT).is_ok());
    }

    #[test]
    fn height_accepts_up_to_220() {
        for ok in ["1", "0.5", "170", "219.9", "220", "220.0"] {
            assert_eq!(validate("", ok, HEIGHT), ok, "{ok} should be accepted");
        }
    }

    #[test]
    fn height_rejects_out_of_range() {
        assert_eq!(validate("170", "250", HEIGHT), "170");
        assert_eq!(validate("170", "220.01", HEIGHT), "170");
        assert_eq!(validate("170", "0", HEIGHT), "170");
        assert_eq!(validate("170", "-5", HEIGHT), "170");
    }

    #[test]
    fn weight_and_age_use_their_own_bounds() {
        assert_eq!(validate("", "400", WEIGHT), "400");
        assert_eq!(validate("70", "400.5", WEIGHT), "70");
        assert_eq!(validate("", "110", AGE), "110");
        assert_eq!(validate("30", "111", AGE), "30");
        // 250 is a fine weight even though it's an invalid height
        assert_eq!(validate("", "250", WEIGHT), "250");
    }

    #[test]
    fn unparsable_input_is_rejected() {
        for bad in ["abc", "1,5", "12a", ".", "-", "NaN", " "] {
            assert_eq!(validate("30", bad, AGE), "30", "{bad:?} should be rejected");
        }
    }

    #[test]
    fn infinity_is_rejected_by_upper_bound() {
        assert_eq!(
            check("inf", HEIGHT),
            Err(Rejection::TooHigh { max: MAX_HEIGHT_CM })
        );
    }

    #[test]
    fn exponent_and_whitespace_forms_parse() {
        assert_eq!(validate("", "1e2", HEIGHT), "1e2");
        assert_eq!(validate("", " 70 ", WEIGHT), " 70 ");
    }

    #[test]
    fn check_reports_reason() {
        assert_eq!(check("abc", AGE), Err(Rejection::NotANumber));
        assert_eq!(check("0", AGE), Err(Rejection::TooLow { min: 0.0 }));
        assert_eq!(
            check("111", AGE),
            Err(Rejection::TooHigh { max: MAX_AGE_YEARS })
        );
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(Rejection::TooHigh { max: 220.0 }.to_string(), "must be at most 220");
        assert_eq!(Rejection::TooLow { min: 0.0 }.to_string(), "must be greater than 0");
    }
}
