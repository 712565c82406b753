//! Price formatting for display.
//!
//! Prices come from the catalog as decimal numbers in meticais. The
//! storefront renders them German-style (`.` thousands, `,` decimals) with
//! the local `Mts` symbol instead of the ISO `MZN` code.

use num_format::{Locale, ToFormattedString};

/// Currency symbol appended to formatted prices.
pub const CURRENCY_SYMBOL: &str = "Mts";

/// Format a price, e.g. `1234.5` becomes `"1.234,50 Mts"`.
///
/// The separator before the symbol is a non-breaking space so the amount and
/// symbol never wrap apart.
///
/// ```
/// use shoecart_core::money::format_price;
/// assert_eq!(format_price(1234.5), "1.234,50\u{a0}Mts");
/// ```
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    format!(
        "{}{},{:02}\u{a0}{}",
        sign,
        (cents / 100).to_formatted_string(&Locale::de),
        cents % 100,
        CURRENCY_SYMBOL
    )
}
