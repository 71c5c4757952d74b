//! Currency formatting
//!
//! Amounts are displayed the way the clinic writes pesos: dollar sign,
//! comma thousands separators, two decimals (`$1,234.56`).

/// Format an amount as `$1,234.56`
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.abs();
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}.{:02}", grouped, fraction)
    } else {
        format!("${}.{:02}", grouped, fraction)
    }
}
