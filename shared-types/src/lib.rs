use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three fixed price tiers sold on the booking page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Regular,
    Vip,
    Vvip,
}

impl TicketType {
    pub const ALL: [TicketType; 3] = [TicketType::Regular, TicketType::Vip, TicketType::Vvip];

    /// Unit price in whole ETB.
    pub fn unit_price(self) -> u32 {
        match self {
            TicketType::Regular => 150,
            TicketType::Vip => 300,
            TicketType::Vvip => 500,
        }
    }

    /// Value used for the `<select>` option and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketType::Regular => "regular",
            TicketType::Vip => "vip",
            TicketType::Vvip => "vvip",
        }
    }

    /// Label shown on the confirmation view.
    pub fn label(self) -> &'static str {
        match self {
            TicketType::Regular => "🎟️ Regular",
            TicketType::Vip => "🌟 VIP",
            TicketType::Vvip => "👑 VVIP",
        }
    }

    /// Label with the unit price, e.g. `🌟 VIP (300 ETB)`.
    pub fn priced_label(self, currency: &str) -> String {
        format!("{} ({} {})", self.label(), self.unit_price(), currency)
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTicketType(pub String);

impl fmt::Display for UnknownTicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ticket type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTicketType {}

impl FromStr for TicketType {
    type Err = UnknownTicketType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(TicketType::Regular),
            "vip" => Ok(TicketType::Vip),
            "vvip" => Ok(TicketType::Vvip),
            other => Err(UnknownTicketType(other.to_string())),
        }
    }
}

/// The most recent booking, exactly as it is kept in browser storage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "ticket")]
    pub ticket_type: TicketType,
    pub quantity: u32,
    pub total: u32,
    #[serde(rename = "timestamp", with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Total derived from tier and quantity; the stored `total` is never trusted over this.
    pub fn expected_total(&self) -> u32 {
        self.ticket_type.unit_price().saturating_mul(self.quantity)
    }
}

/// RFC 3339 in UTC with millisecond precision (`2026-10-19T08:30:00.000Z`).
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Booking {
        Booking {
            full_name: "Abel Tesfaye".to_string(),
            phone: "+251911223344".to_string(),
            email: String::new(),
            ticket_type: TicketType::Vip,
            quantity: 2,
            total: 600,
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "fullName": "Abel Tesfaye",
                "phone": "+251911223344",
                "email": "",
                "ticket": "vip",
                "quantity": 2,
                "total": 600,
                "timestamp": "2026-10-19T08:30:00.000Z"
            })
        );
    }

    #[test]
    fn accepts_offset_timestamps_on_read() {
        let raw = r#"{"fullName":"A","phone":"+251","ticket":"vvip","quantity":1,"total":500,"timestamp":"2026-10-19T11:30:00+03:00"}"#;
        let booking: Booking = serde_json::from_str(raw).unwrap();
        assert_eq!(booking.created_at, Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap());
        assert_eq!(booking.email, "");
        assert_eq!(booking.ticket_type, TicketType::Vvip);
    }

    #[test]
    fn rejects_unknown_ticket() {
        let raw = r#"{"fullName":"A","phone":"+251","ticket":"gold","quantity":1,"total":0,"timestamp":"2026-10-19T08:30:00.000Z"}"#;
        assert!(serde_json::from_str::<Booking>(raw).is_err());
        assert!("gold".parse::<TicketType>().is_err());
    }

    #[test]
    fn labels_match_tiers() {
        assert_eq!(TicketType::Vip.priced_label("ETB"), "🌟 VIP (300 ETB)");
        assert_eq!(TicketType::Vvip.label(), "👑 VVIP");
        assert_eq!(sample().expected_total(), 600);
        for tier in TicketType::ALL {
            assert_eq!(tier.as_str().parse::<TicketType>(), Ok(tier));
        }
    }
}
