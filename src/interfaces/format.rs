use crate::domain::money::Money;
use chrono::NaiveDate;

/// US dollar display: `$1,234.56`, `-$18,000.00`.
pub fn format_currency(amount: Money) -> String {
    let cents = amount.round_cents();
    let sign = if cents.is_negative() { "-" } else { "" };
    let fixed = format!("{:.2}", cents.value().abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{fraction}")
}

/// Short US date: `Dec 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
