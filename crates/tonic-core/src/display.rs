//! Presentation helpers shared by every view: price formatting and the
//! "new arrival" badge rule.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::products::Money;

/// Products created within this many days are badged as new.
pub const NEW_PRODUCT_WINDOW_DAYS: i64 = 30;

/// Formats an amount in the en-US currency style, e.g. `"$1,234.50"`.
///
/// Known currencies get their symbol (`$`, `€`, `£`, `¥`, `CA$`, `A$`);
/// anything else is prefixed with its ISO code and a space. An empty code is
/// treated as USD. Amounts are rounded half away from zero to the currency's
/// minor unit (zero digits for JPY, two otherwise).
#[must_use]
pub fn format_price(amount: Decimal, currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    let code = if code.is_empty() { "USD".to_string() } else { code };
    let (prefix, fraction_digits) = currency_style(&code);

    let rounded =
        amount.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", fraction_digits as usize, rounded.abs());

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + prefix.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&prefix);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a [`Money`] value with [`format_price`].
#[must_use]
pub fn format_money(money: &Money) -> String {
    format_price(money.amount, &money.currency_code)
}

/// Whether `created_at` falls within the new-arrival window ending at `now`.
#[must_use]
pub fn is_new_product_at(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    created_at > now - TimeDelta::days(NEW_PRODUCT_WINDOW_DAYS)
}

/// [`is_new_product_at`] evaluated against the current time.
#[must_use]
pub fn is_new_product(created_at: DateTime<Utc>) -> bool {
    is_new_product_at(created_at, Utc::now())
}

fn currency_style(code: &str) -> (String, u32) {
    match code {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        "CAD" => ("CA$".to_string(), 2),
        "AUD" => ("A$".to_string(), 2),
        other => (format!("{other} "), 2),
    }
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
