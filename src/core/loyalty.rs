use crate::domain::model::Redemption;

/// Fixed award per paid appointment.
pub const POINTS_PER_PAYMENT: u32 = 20;

/// Points convert to currency in complete blocks of this size.
pub const REDEEM_THRESHOLD: u32 = 100;

pub fn award(points: u32) -> u32 {
    points + POINTS_PER_PAYMENT
}

/// Converts complete hundreds into a redeemed amount and keeps the
/// remainder. Below the threshold there is nothing to redeem.
pub fn try_redeem(points: u32) -> Option<Redemption> {
    if points >= REDEEM_THRESHOLD {
        Some(Redemption {
            amount: points / REDEEM_THRESHOLD,
            remaining: points % REDEEM_THRESHOLD,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_adds_fixed_points() {
        assert_eq!(award(0), 20);
        assert_eq!(award(90), 110);
    }

    #[test]
    fn test_no_redemption_below_threshold() {
        assert_eq!(try_redeem(0), None);
        assert_eq!(try_redeem(99), None);
    }

    #[test]
    fn test_redeems_exactly_at_threshold() {
        let redemption = try_redeem(100).unwrap();
        assert_eq!(redemption.amount, 1);
        assert_eq!(redemption.remaining, 0);
    }

    #[test]
    fn test_redeems_complete_hundreds_keeps_remainder() {
        let redemption = try_redeem(250).unwrap();
        assert_eq!(redemption.amount, 2);
        assert_eq!(redemption.remaining, 50);
    }

    #[test]
    fn test_payment_from_ninety_points() {
        // 90 + 20 = 110, redeems 1 and keeps 10
        let redemption = try_redeem(award(90)).unwrap();
        assert_eq!(redemption.amount, 1);
        assert_eq!(redemption.remaining, 10);
    }
}
