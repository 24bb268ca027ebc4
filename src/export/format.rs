//! Human-readable formatting for reports and console output

/// Group the integer digits of a fixed-point rendering with commas
fn group_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

fn is_negative(value: f64, decimals: usize) -> bool {
    // -0.004 rounds to 0.00 and should not print a sign
    value < 0.0
        && format!("{:.*}", decimals, value.abs())
            .chars()
            .any(|c| c.is_ascii_digit() && c != '0')
}

/// `1234.5` -> `1,234.50`
pub fn format_number(value: f64, decimals: usize) -> String {
    let sign = if is_negative(value, decimals) { "-" } else { "" };
    format!("{}{}", sign, group_thousands(value, decimals))
}

/// `-1234.5` -> `-$1,234.50`
pub fn format_currency(value: f64) -> String {
    let sign = if is_negative(value, 2) { "-" } else { "" };
    format!("{}${}", sign, group_thousands(value, 2))
}

/// `12.345` -> `12.35%`
pub fn format_pct(value: f64) -> String {
    format!("{}%", format_number(value, 2))
}

pub fn format_payback(payback_year: Option<u32>) -> String {
    match payback_year {
        Some(year) => format!("Year {}", year),
        None => "Not reached".to_string(),
    }
}

pub fn format_break_even(break_even_units: Option<f64>) -> String {
    match break_even_units {
        Some(units) => format!("{} units", format_number(units, 2)),
        None => "N/A".to_string(),
    }
}

/// IRR given as a decimal
pub fn format_irr(irr: Option<f64>) -> String {
    match irr {
        Some(rate) => format_pct(rate * 100.0),
        None => "N/A".to_string(),
    }
}
