//! Cell formatting for money, ratio and date columns.

use crewdesk_shared::FieldValue;

/// US-dollar amount with thousands separators. Missing or non-numeric
/// values format as zero.
pub fn format_money(value: Option<&FieldValue>) -> String {
    let amount = value.and_then(FieldValue::as_number).unwrap_or(0.0);
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}${grouped}.{cents}")
}

/// Ratio as a percentage with one decimal (`0.125` → `12.5%`).
pub fn format_percent(value: Option<&FieldValue>) -> String {
    match value.and_then(FieldValue::as_number) {
        Some(ratio) => format!("{:.1}%", ratio * 100.0),
        None => "—".to_owned(),
    }
}

/// Date part of a date or timestamp string.
pub fn format_date_only(value: Option<&FieldValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    value.to_string().chars().take(10).collect()
}
