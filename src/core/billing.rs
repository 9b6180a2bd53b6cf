/// Flat consultation fee in currency-agnostic units.
pub const CONSULTATION_FEE: f64 = 3000.0;

/// Fee breakdown before it is joined with appointment details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charges {
    pub consultation_fee: f64,
    pub extra_fee: f64,
    pub total: f64,
    pub extra_fee_clamped: bool,
}

/// Negative or non-finite extra fees become 0 instead of being rejected.
pub fn clamp_extra_fee(extra_fee: f64) -> (f64, bool) {
    if extra_fee.is_finite() && extra_fee >= 0.0 {
        (extra_fee, false)
    } else {
        (0.0, true)
    }
}

/// Rounds to two decimals. Amounts too large to scale are already whole.
pub fn round_cents(amount: f64) -> f64 {
    let scaled = amount * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        amount
    }
}

pub fn compute_charges(consultation_fee: f64, extra_fee: f64) -> Charges {
    let (extra_fee, extra_fee_clamped) = clamp_extra_fee(extra_fee);
    let consultation_fee = round_cents(consultation_fee);
    let extra_fee = round_cents(extra_fee);

    Charges {
        consultation_fee,
        extra_fee,
        total: round_cents(consultation_fee + extra_fee),
        extra_fee_clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_extra_fee_is_clamped() {
        let charges = compute_charges(CONSULTATION_FEE, -50.0);
        assert_eq!(charges.extra_fee, 0.0);
        assert_eq!(charges.total, 3000.0);
        assert!(charges.extra_fee_clamped);
    }

    #[test]
    fn test_nan_extra_fee_is_clamped() {
        let charges = compute_charges(CONSULTATION_FEE, f64::NAN);
        assert_eq!(charges.total, 3000.0);
        assert!(charges.extra_fee_clamped);
    }

    #[test]
    fn test_total_is_rounded_to_cents() {
        let charges = compute_charges(CONSULTATION_FEE, 499.999);
        assert_eq!(charges.extra_fee, 500.0);
        assert_eq!(charges.total, 3500.0);
        assert!(!charges.extra_fee_clamped);

        let charges = compute_charges(CONSULTATION_FEE, 12.345_1);
        assert_eq!(charges.total, 3012.35);
    }

    #[test]
    fn test_huge_extra_fee_stays_finite() {
        let charges = compute_charges(CONSULTATION_FEE, 1e307);
        assert_eq!(charges.extra_fee, 1e307);
        assert!(charges.total.is_finite());
        assert!(!charges.extra_fee_clamped);

        let charges = compute_charges(CONSULTATION_FEE, f64::MAX);
        assert_eq!(charges.extra_fee, f64::MAX);
        assert!(charges.total.is_finite());
    }

    #[test]
    fn test_zero_extra_fee_is_not_clamped() {
        let charges = compute_charges(CONSULTATION_FEE, 0.0);
        assert_eq!(charges.total, 3000.0);
        assert!(!charges.extra_fee_clamped);
    }
}
