use mango_runtime::constants::{MAX_RADIX, MIN_RADIX};
use mango_runtime::{equals, int_to_string, string_to_int, CharCode, Int, MangoString};
use proptest::prelude::*;

fn radices() -> impl Strategy<Value = Int> {
    MIN_RADIX..=MAX_RADIX
}

fn mango_string() -> impl Strategy<Value = MangoString> {
    prop::collection::vec(any::<CharCode>(), 0..64).prop_map(MangoString::from)
}

proptest! {
    #[test]
    fn round_trip_every_radix(n in any::<Int>(), radix in radices()) {
        prop_assume!(!(radix == 10 && n == Int::MIN));
        let s = int_to_string(n, radix).unwrap();
        prop_assert_eq!(string_to_int(&s, radix).unwrap(), n);
    }

    #[test]
    fn no_leading_zeros(n in any::<Int>(), radix in radices()) {
        prop_assume!(n != 0 && !(radix == 10 && n == Int::MIN));
        let s = int_to_string(n, radix).unwrap();
        let first_digit = if s.get(0) == Some(CharCode::from(b'-')) { s.get(1) } else { s.get(0) };
        prop_assert_ne!(first_digit, Some(CharCode::from(b'0')));
    }

    #[test]
    fn decimal_matches_std_formatting(n in any::<Int>()) {
        prop_assume!(n != Int::MIN);
        let s = int_to_string(n, 10).unwrap();
        prop_assert_eq!(s.to_string(), n.to_string());
        prop_assert_eq!(s.len(), n.to_string().len());
    }

    #[test]
    fn parses_uppercase_like_lowercase(n in 0..=Int::MAX, radix in 11..=MAX_RADIX) {
        let lower = int_to_string(n, radix).unwrap().to_string();
        let upper = MangoString::from(lower.to_uppercase().as_str());
        prop_assert_eq!(string_to_int(&upper, radix).unwrap(), n);
    }

    #[test]
    fn equals_is_reflexive(s in mango_string()) {
        prop_assert!(equals(&s, &s));
        prop_assert!(equals(&s, &s.clone()));
    }

    #[test]
    fn equals_is_symmetric(a in mango_string(), b in mango_string()) {
        prop_assert_eq!(equals(&a, &b), equals(&b, &a));
    }

    #[test]
    fn equals_matches_code_comparison(a in mango_string(), b in mango_string()) {
        prop_assert_eq!(equals(&a, &b), a.as_codes() == b.as_codes());
    }

    #[test]
    fn reverse_twice_is_identity(s in mango_string()) {
        let mut twice = s.clone();
        twice.reverse();
        twice.reverse();
        prop_assert_eq!(twice, s);
    }
}

#[test]
fn out_of_range_radices_are_rejected() {
    assert!(int_to_string(10, 1).is_err());
    assert!(int_to_string(10, 37).is_err());
}
