//! Tests for ZEC amounts.

use color_eyre::eyre::Result;
use proptest::prelude::*;

use super::*;

#[test]
fn parse_decimal_amounts() -> Result<()> {
    zmsg_test::init();

    assert_eq!("0.00001".parse::<Zec>()?.zatoshis(), 1_000);
    assert_eq!("2".parse::<Zec>()?.zatoshis(), 2 * COIN);
    assert_eq!("2.".parse::<Zec>()?.zatoshis(), 2 * COIN);
    assert_eq!(".5".parse::<Zec>()?.zatoshis(), COIN / 2);
    assert_eq!(" 1.23456789 ".parse::<Zec>()?.zatoshis(), 123_456_789);
    assert_eq!("21000000".parse::<Zec>()?.zatoshis(), MAX_MONEY);

    Ok(())
}

#[test]
fn reject_invalid_amounts() {
    zmsg_test::init();

    assert_eq!("0.000000001".parse::<Zec>(), Err(AmountError::TooPrecise(9)));
    assert!(matches!("-1".parse::<Zec>(), Err(AmountError::Parse(_))));
    assert!(matches!("1e-5".parse::<Zec>(), Err(AmountError::Parse(_))));
    assert!(matches!("".parse::<Zec>(), Err(AmountError::Parse(_))));
    assert!(matches!(".".parse::<Zec>(), Err(AmountError::Parse(_))));
    assert!(matches!(
        "21000000.00000001".parse::<Zec>(),
        Err(AmountError::TooLarge { .. })
    ));
    assert!(matches!(
        "99999999999999999999".parse::<Zec>(),
        Err(AmountError::Parse(_))
    ));
}

#[test]
fn display_all_decimal_places() -> Result<()> {
    zmsg_test::init();

    assert_eq!(Zec::from_zatoshis(1_000)?.to_string(), "0.00001000");
    assert_eq!(Zec::from_zatoshis(2 * COIN + 5)?.to_string(), "2.00000005");
    assert_eq!(Zec::default().to_string(), "0.00000000");

    Ok(())
}

#[test]
fn json_amounts_are_decimal_zec() -> Result<()> {
    zmsg_test::init();

    let amount: Zec = serde_json::from_str("0.00001")?;
    assert_eq!(amount.zatoshis(), 1_000);

    // Binary floats are rounded to the nearest zatoshi.
    let amount: Zec = serde_json::from_str("0.29")?;
    assert_eq!(amount.zatoshis(), 29_000_000);

    let amount: Zec = serde_json::from_str("3")?;
    assert_eq!(amount.zatoshis(), 3 * COIN);

    assert!(serde_json::from_str::<Zec>("-0.1").is_err());
    assert!(serde_json::from_str::<Zec>("21000001").is_err());

    assert_eq!(serde_json::to_string(&Zec::from_zatoshis(COIN / 2)?)?, "0.5");

    Ok(())
}

proptest! {
    /// Displayed amounts parse back to the same amount.
    #[test]
    fn display_parse_round_trip(zatoshis in 0..=MAX_MONEY) {
        zmsg_test::init();

        let amount = Zec::from_zatoshis(zatoshis)?;

        prop_assert_eq!(amount.to_string().parse::<Zec>()?, amount);
    }

    /// Amounts survive the node's decimal JSON representation.
    #[test]
    fn json_round_trip(zatoshis in 0..=MAX_MONEY) {
        zmsg_test::init();

        let amount = Zec::from_zatoshis(zatoshis)?;
        let json = serde_json::to_string(&amount)?;

        prop_assert_eq!(serde_json::from_str::<Zec>(&json)?, amount);
    }
}
