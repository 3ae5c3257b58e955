/// Groups the digits of an integer part with commas
fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Count with comma thousands separators: `1234567` becomes `1,234,567`
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Whole pounds with thousands separators: `£12,346`, `£-1,200`
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    match rounded.strip_prefix('-') {
        Some(digits) if digits != "0" => format!("£-{}", group_thousands(digits)),
        Some(_) => "£0".to_string(),
        None => format!("£{}", group_thousands(&rounded)),
    }
}

/// Fixed number of decimals: `format_decimal(0.12345, 4) == "0.1235"`
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}
