//! Sample invoice payload.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde_json::{Value, json};

/// Days between issue date and due date.
pub const PAYMENT_TERM_DAYS: i64 = 30;

/// Invoice number of the form `INV-<year>-<seq>`, `seq` zero-padded to 4 digits.
#[must_use]
pub fn invoice_number(today: NaiveDate, seq: u32) -> String {
    format!("INV-{}-{seq:04}", today.year())
}

/// Sequence number in `1..=9999` derived from the current clock.
#[must_use]
pub fn clock_seq() -> u32 {
    chrono::Utc::now().timestamp_subsec_micros() % 9999 + 1
}

/// Parameters creating a two-line invoice to a Spanish customer.
#[must_use]
pub fn sample_invoice(number: &str, today: NaiveDate) -> Value {
    let due_date = today + TimeDelta::days(PAYMENT_TERM_DAYS);
    let iva = json!([{ "name": "IVA", "category": "S", "percent": 21.0 }]);

    json!({
        "invoice": {
            "number": number,
            "date": today.format("%Y-%m-%d").to_string(),
            "due_date": due_date.format("%Y-%m-%d").to_string(),
            "currency": "EUR",
            "contact": {
                "name": "Acme Corporation",
                "tin_value": "ESP9109010J",
                "country": "ES",
                "address": "Calle Mayor 1",
                "city": "Madrid",
                "postalcode": "28001",
                "email": "billing@acme.com"
            },
            "invoice_lines_attributes": [
                {
                    "description": "Professional Consulting Services",
                    "quantity": 10,
                    "price": 150.00,
                    "taxes_attributes": iva
                },
                {
                    "description": "Technical Support Hours",
                    "quantity": 5,
                    "price": 80.00,
                    "taxes_attributes": iva
                }
            ]
        },
        "send_after_import": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn invoice_number_is_padded() {
        assert_eq!(invoice_number(date(2025, 10, 13), 7), "INV-2025-0007");
        assert_eq!(invoice_number(date(2025, 10, 13), 9999), "INV-2025-9999");
    }

    #[test]
    fn clock_seq_is_in_range() {
        let seq = clock_seq();
        assert!((1..=9999).contains(&seq));
    }

    #[test]
    fn due_date_crosses_month_end() {
        let invoice = sample_invoice("INV-2025-0001", date(2025, 12, 15));

        assert_eq!(invoice["invoice"]["date"], "2025-12-15");
        assert_eq!(invoice["invoice"]["due_date"], "2026-01-14");
        assert_eq!(invoice["send_after_import"], false);
        assert_eq!(
            invoice["invoice"]["invoice_lines_attributes"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }
}
