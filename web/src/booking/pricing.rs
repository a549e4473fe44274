use shared_types::TicketType;

/// Unit price of the selected tier; nothing selected prices at zero.
pub fn unit_price(ticket: Option<TicketType>) -> u32 {
    ticket.map(TicketType::unit_price).unwrap_or(0)
}

/// Integer prefix of `raw` the way a browser's `parseInt(raw, 10)` reads it:
/// leading whitespace, an optional sign, then as many digits as follow.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// Quantity used for the live total: anything unparsable or below one counts as one.
pub fn display_quantity(raw: &str) -> u32 {
    parse_int_prefix(raw)
        .map(|q| q.clamp(1, i64::from(u32::MAX)) as u32)
        .unwrap_or(1)
}

pub fn total(ticket: Option<TicketType>, quantity: u32) -> u32 {
    unit_price(ticket).saturating_mul(quantity)
}

/// Live total for the form: `unit_price × max(1, quantity)`.
pub fn quote(ticket: Option<TicketType>, raw_quantity: &str) -> u32 {
    total(ticket, display_quantity(raw_quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_int_prefix("3"), Some(3));
        assert_eq!(parse_int_prefix("  12abc"), Some(12));
        assert_eq!(parse_int_prefix("2.5"), Some(2));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn quote_defaults_quantity_to_one() {
        assert_eq!(quote(Some(TicketType::Regular), ""), 150);
        assert_eq!(quote(Some(TicketType::Vip), "abc"), 300);
        assert_eq!(quote(Some(TicketType::Vvip), "0"), 500);
        assert_eq!(quote(Some(TicketType::Vvip), "-3"), 500);
        assert_eq!(quote(Some(TicketType::Vip), "3"), 900);
        assert_eq!(quote(None, "4"), 0);
    }

    proptest! {
        #[test]
        fn total_is_unit_price_times_quantity(tier in 0usize..3, q in 1u32..10_000) {
            let ticket = TicketType::ALL[tier];
            prop_assert_eq!(quote(Some(ticket), &q.to_string()), ticket.unit_price() * q);
        }
    }
}
