//! Fixed-precision scientific notation for text outputs.

/// Formats `value` as `d.ddddde±XX`: `precision` mantissa decimals and an
/// exponent carrying an explicit sign and at least two digits.
pub fn format_scientific(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(rest) => ('-', rest),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::format_scientific;

    #[test]
    fn matches_printf_style() {
        assert_eq!(format_scientific(0.3, 5), "3.00000e-01");
        assert_eq!(format_scientific(1234.5, 5), "1.23450e+03");
        assert_eq!(format_scientific(0.0, 5), "0.00000e+00");
        assert_eq!(format_scientific(-2.5e-120, 3), "-2.500e-120");
        assert_eq!(format_scientific(1.0, 12), "1.000000000000e+00");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(format_scientific(f64::NAN, 5), "NaN");
        assert_eq!(format_scientific(f64::INFINITY, 5), "inf");
    }
}
