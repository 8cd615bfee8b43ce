use rust_fscript::js_number::{number_to_fixed, number_to_string, number_to_string_radix, string_to_number};
use rust_fscript::ScriptError;

#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

#[cfg(test)]
mod number_tests {
    use super::*;

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-1.5), "-1.5");
        assert_eq!(number_to_string(123.456), "123.456");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(0.000001), "0.000001");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(1.5e-10), "1.5e-10");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(-2.5e25), "-2.5e+25");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_number_to_string_radix() {
        assert_eq!(number_to_string_radix(255.0, 16), "ff");
        assert_eq!(number_to_string_radix(-10.0, 2), "-1010");
        assert_eq!(number_to_string_radix(0.5, 2), "0.1");
        assert_eq!(number_to_string_radix(0.0, 36), "0");
        assert_eq!(number_to_string_radix(35.0, 36), "z");
        assert_eq!(number_to_string_radix(10.0, 10), "10");
        assert_eq!(number_to_string_radix(f64::NAN, 16), "NaN");
        assert_eq!(number_to_string_radix(3.75, 2), "11.11");
        assert_eq!(number_to_string_radix(-255.5, 16), "-ff.8");
    }

    #[test]
    fn test_number_to_string_radix_inexact_fractions() {
        assert_eq!(
            number_to_string_radix(0.1, 2),
            "0.0001100110011001100110011001100110011001100110011001101"
        );
        assert_eq!(number_to_string_radix(0.1, 3), "0.0022002200220022002200220022002201");
    }

    #[test]
    fn test_number_to_fixed() {
        assert_eq!(number_to_fixed(1.23456, 2.0, None).unwrap(), "1.23");
        assert_eq!(number_to_fixed(2.5, 0.0, None).unwrap(), "3");
        assert_eq!(number_to_fixed(0.125, 2.0, None).unwrap(), "0.13");
        assert_eq!(number_to_fixed(9.5, 0.0, None).unwrap(), "10");
        assert_eq!(number_to_fixed(-0.0, 1.0, None).unwrap(), "0.0");
        assert_eq!(number_to_fixed(-1.5, 0.0, None).unwrap(), "-2");
        assert_eq!(number_to_fixed(0.0, 2.0, None).unwrap(), "0.00");
        assert_eq!(number_to_fixed(7.0, f64::NAN, None).unwrap(), "7");
        assert_eq!(number_to_fixed(1e21, 2.0, None).unwrap(), "1e+21");
        assert_eq!(number_to_fixed(f64::NAN, 2.0, None).unwrap(), "NaN");
    }

    #[test]
    fn test_number_to_fixed_rounds_the_exact_value() {
        // the product 1.045 * 100 is exactly 104.5 though 1.045 itself is just below the tie
        assert_eq!(number_to_fixed(1.045, 2.0, None).unwrap(), "1.04");
        assert_eq!(number_to_fixed(1.005, 2.0, None).unwrap(), "1.00");
        assert_eq!(number_to_fixed(-1.045, 2.0, None).unwrap(), "-1.04");
    }

    #[test]
    fn test_number_to_fixed_rejects_out_of_range_digits() {
        for digits in [-1.0, 101.0] {
            let result = number_to_fixed(1.0, digits, None);
            match result {
                Err(ScriptError::RangeError { message, .. }) => {
                    assert_eq!(message, "toFixed() digits argument must be between 0 and 100")
                }
                _ => panic!("Expected RangeError, got {:?}", result),
            }
        }
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("   "), 0.0);
        assert_eq!(string_to_number("  42  "), 42.0);
        assert_eq!(string_to_number("\u{FEFF}7"), 7.0);
        assert_eq!(string_to_number("-3.25"), -3.25);
        assert_eq!(string_to_number(".5"), 0.5);
        assert_eq!(string_to_number("1e3"), 1000.0);
        assert_eq!(string_to_number("0x1f"), 31.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("Infinity"), f64::INFINITY);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_string_to_number_rejects_garbage() {
        for source in ["abc", "12px", "inf", "nan", "0x", "0xg", "1e", "1 2"] {
            assert!(string_to_number(source).is_nan(), "{source:?} should be NaN");
        }
    }
}
