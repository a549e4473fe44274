use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Page-level settings for the booking flow, provided through Leptos context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingConfig {
    /// localStorage key holding the latest booking.
    pub storage_key: String,
    pub confirmation_delay_ms: u64,
    pub popup_close_delay_ms: u64,
    pub currency: String,
    /// Rendered as scan buttons on the payment step, in order.
    pub payment_methods: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            storage_key: "latestBooking".to_string(),
            confirmation_delay_ms: 2_000,
            popup_close_delay_ms: 5_000,
            currency: "ETB".to_string(),
            payment_methods: vec![
                "Telebirr".to_string(),
                "CBE Birr".to_string(),
                "M-Pesa".to_string(),
            ],
        }
    }
}

impl BookingConfig {
    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }

    pub fn popup_close_delay(&self) -> Duration {
        Duration::from_millis(self.popup_close_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = BookingConfig::default();
        assert_eq!(config.confirmation_delay(), Duration::from_secs(2));
        assert_eq!(config.popup_close_delay(), Duration::from_secs(5));
        assert_eq!(config.storage_key, "latestBooking");
    }
}
