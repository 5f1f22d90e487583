use anyhow::Result;
use salon_desk::core::User;
use salon_desk::{MemoryUserStore, Salon, SalonError};
use std::collections::HashMap;

fn salon_with_points(points: u32) -> Salon<MemoryUserStore> {
    let mut users = HashMap::new();
    users.insert(
        "mira".to_string(),
        User {
            username: "mira".to_string(),
            password: "pw".to_string(),
            loyalty_points: points,
        },
    );
    let mut salon = Salon::open(MemoryUserStore::with_users(users)).unwrap();
    salon.login("mira", "pw").unwrap();
    salon.add_appointment("Ada", "Haircut", "Noon").unwrap();
    salon
}

#[test]
fn test_payment_awards_fixed_points() -> Result<()> {
    let mut salon = salon_with_points(0);

    let outcome = salon.make_payment(0)?;
    assert_eq!(outcome.awarded, 20);
    assert!(outcome.redemption.is_none());
    assert_eq!(salon.loyalty_points(), 20);
    Ok(())
}

/// 測試付款跨過門檻時在同一次呼叫內自動兌換
#[test]
fn test_payment_crossing_threshold_auto_redeems() -> Result<()> {
    let mut salon = salon_with_points(90);

    let outcome = salon.make_payment(0)?;
    assert_eq!(outcome.awarded, 20);
    let redemption = outcome.redemption.unwrap();
    assert_eq!(redemption.amount, 1);
    assert_eq!(redemption.remaining, 10);
    assert_eq!(salon.loyalty_points(), 10);
    Ok(())
}

#[test]
fn test_redeem_below_threshold_fails_and_keeps_points() {
    let mut salon = salon_with_points(80);

    let err = salon.redeem_points().unwrap_err();
    assert!(matches!(
        err,
        SalonError::InsufficientPoints {
            points: 80,
            threshold: 100
        }
    ));
    assert_eq!(salon.loyalty_points(), 80);
}

/// 測試兌換只轉換完整的百點，餘數保留
#[test]
fn test_redeem_converts_whole_hundreds_only() -> Result<()> {
    let mut salon = salon_with_points(250);

    let redemption = salon.redeem_points()?;
    assert_eq!(redemption.amount, 2);
    assert_eq!(redemption.remaining, 50);
    assert_eq!(salon.loyalty_points(), 50);

    // 剩下的 50 點不足以再兌換
    assert!(salon.redeem_points().is_err());
    Ok(())
}

#[test]
fn test_redeem_at_exact_threshold() -> Result<()> {
    let mut salon = salon_with_points(100);

    let redemption = salon.redeem_points()?;
    assert_eq!(redemption.amount, 1);
    assert_eq!(redemption.remaining, 0);
    assert_eq!(salon.loyalty_points(), 0);
    Ok(())
}

/// 每次付款 20 點，兌換以 100 點換 1 元：任何付款序列後
/// 「已兌換金額 × 100 + 剩餘點數」必須等於總發放點數
#[test]
fn test_points_conserved_across_many_payments() -> Result<()> {
    let mut salon = salon_with_points(0);
    let payments = 13;

    let mut redeemed_total = 0;
    for _ in 0..payments {
        let outcome = salon.make_payment(0)?;
        if let Some(redemption) = outcome.redemption {
            redeemed_total += redemption.amount;
        }
    }

    assert_eq!(
        redeemed_total * 100 + salon.loyalty_points(),
        payments * 20
    );
    // 13 次付款共 260 點：兌換 2 元，剩 60 點
    assert_eq!(redeemed_total, 2);
    assert_eq!(salon.loyalty_points(), 60);
    Ok(())
}

/// 測試點數直接寫入主帳號表，登出不會遺失
#[test]
fn test_accrued_points_survive_logout() -> Result<()> {
    let mut salon = salon_with_points(0);

    salon.make_payment(0)?;
    assert_eq!(salon.loyalty_points(), 20);

    salon.logout();
    salon.login("mira", "pw")?;
    assert_eq!(salon.loyalty_points(), 20);
    Ok(())
}

#[test]
fn test_redeem_requires_login() {
    let mut salon = salon_with_points(150);
    salon.logout();

    assert!(matches!(
        salon.redeem_points().unwrap_err(),
        SalonError::NotAuthenticated
    ));

    // 點數原封不動
    salon.login("mira", "pw").unwrap();
    assert_eq!(salon.loyalty_points(), 150);
}
