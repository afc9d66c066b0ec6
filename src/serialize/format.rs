use crate::serialize::CsvConfig;
use crate::types::ScalarValue;

/// Render a cell value as CSV field text
pub fn format_value(config: &CsvConfig, value: &ScalarValue) -> String {
    match value {
        ScalarValue::Number(n) => format_number(*n, &config.decimal_separator),
        ScalarValue::String(s) => s.clone(),
        ScalarValue::Bool(true) => config.bool_display.0.clone(),
        ScalarValue::Bool(false) => config.bool_display.1.clone(),
        ScalarValue::Null | ScalarValue::Undefined => config.replace_undefined_with.clone(),
    }
}

/// Render a cell value as it is written to the file: text is quoted when
/// `quote_strings` is set, numbers and booleans never are
pub fn format_field(config: &CsvConfig, value: &ScalarValue) -> String {
    match value {
        ScalarValue::String(s) if config.quote_strings => quote_text(config, s),
        _ => format_value(config, value),
    }
}

/// Wrap text in the quote character, doubling quote characters inside
pub fn quote_text(config: &CsvConfig, text: &str) -> String {
    let quote = char::from(config.quote_character);
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(quote);
    for c in text.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

/// Number text as a browser prints it: exponent form below 1e-6 and from
/// 1e21 on, `Infinity`/`NaN` spelled out. Fractional values use the decimal
/// separator; whole numbers print without a fraction.
fn format_number(n: f64, decimal_separator: &str) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = n.abs();
    let text = if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        exponent_form(n)
    } else {
        n.to_string()
    };

    if n.fract() != 0.0 && decimal_separator != "." {
        text.replacen('.', decimal_separator, 1)
    } else {
        text
    }
}

/// `1e21` -> `1e+21`, `1.5e-7` stays
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(decimal: &str) -> CsvConfig {
        CsvConfig::new("out", ";", "\"", decimal).unwrap()
    }

    #[test]
    fn test_format_float_with_comma() {
        assert_eq!(format_value(&config(","), &ScalarValue::Number(3.5)), "3,5");
        assert_eq!(format_value(&config(","), &ScalarValue::Number(-0.25)), "-0,25");
    }

    #[test]
    fn test_format_float_with_point() {
        assert_eq!(format_value(&config("."), &ScalarValue::Number(3.5)), "3.5");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_value(&config(","), &ScalarValue::Number(42.0)), "42");
        assert_eq!(format_value(&config(","), &ScalarValue::Number(-7.0)), "-7");
    }

    #[test]
    fn test_format_bool_and_missing() {
        let config = config(".");
        assert_eq!(format_value(&config, &ScalarValue::Bool(true)), "TRUE");
        assert_eq!(format_value(&config, &ScalarValue::Bool(false)), "FALSE");
        assert_eq!(format_value(&config, &ScalarValue::Null), "");
        assert_eq!(format_value(&config, &ScalarValue::Undefined), "");
    }

    #[test]
    fn test_format_extreme_numbers() {
        assert_eq!(format_value(&config("."), &ScalarValue::Number(1e21)), "1e+21");
        assert_eq!(format_value(&config(","), &ScalarValue::Number(1e-7)), "1e-7");
        assert_eq!(format_value(&config(","), &ScalarValue::Number(1.5e-7)), "1,5e-7");
        assert_eq!(format_value(&config("."), &ScalarValue::Number(-2.5e22)), "-2.5e+22");
        assert_eq!(
            format_value(&config("."), &ScalarValue::Number(123456789012345680000.0)),
            "123456789012345680000"
        );
        assert_eq!(format_value(&config(","), &ScalarValue::Number(0.000001)), "0,000001");
        assert_eq!(format_value(&config("."), &ScalarValue::Number(0.0)), "0");
    }

    #[test]
    fn test_format_non_finite() {
        let config = config(",");
        assert_eq!(format_value(&config, &ScalarValue::Number(f64::NAN)), "NaN");
        assert_eq!(format_value(&config, &ScalarValue::Number(f64::INFINITY)), "Infinity");
        assert_eq!(format_value(&config, &ScalarValue::Number(f64::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn test_format_field_quotes_text_only() {
        let config = CsvConfig::new("out", ";", "'", ",").unwrap();
        assert_eq!(format_field(&config, &ScalarValue::from("Ann")), "'Ann'");
        assert_eq!(format_field(&config, &ScalarValue::from("O'Neil")), "'O''Neil'");
        assert_eq!(format_field(&config, &ScalarValue::from("")), "''");
        assert_eq!(format_field(&config, &ScalarValue::Number(3.5)), "3,5");
        assert_eq!(format_field(&config, &ScalarValue::Bool(true)), "TRUE");
        assert_eq!(format_field(&config, &ScalarValue::Null), "");
    }

    #[test]
    fn test_format_field_without_quote_strings() {
        let mut config = CsvConfig::new("out", ";", "'", ",").unwrap();
        config.quote_strings = false;
        assert_eq!(format_field(&config, &ScalarValue::from("Ann")), "Ann");
    }

    #[test]
    fn test_format_string_untouched() {
        let value = ScalarValue::from("3.5 apples");
        assert_eq!(format_value(&config(","), &value), "3.5 apples");
    }
}
