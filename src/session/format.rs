use mongodb::bson::{oid::ObjectId, DateTime};
use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// US-style currency text, e.g. `$2,500.50`. Amounts are rounded to cents.
pub fn format_usd(amount: f64) -> String {
    let total_cents = (amount * 100.0).round() as i64;
    let dollars = total_cents / 100;
    let cents = (total_cents % 100).abs();

    let digits = dollars.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if dollars < 0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents:02}")
}

/// First 8 hex characters of the id, enough to tell records apart on screen.
pub fn short_id(id: &ObjectId) -> String {
    let hex = id.to_hex();
    format!("{}...", &hex[..8])
}

pub fn format_created_at(created_at: Option<DateTime>) -> String {
    let Some(ts) = created_at else {
        return "N/A".to_string();
    };
    match OffsetDateTime::from_unix_timestamp(ts.timestamp_millis().div_euclid(1000))
        .ok()
        .and_then(|dt| dt.format(TIMESTAMP).ok())
    {
        Some(text) => text,
        None => "N/A".to_string(),
    }
}
