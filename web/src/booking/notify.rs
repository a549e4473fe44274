use shared_types::Booking;

use super::error::NotifyError;

/// What the payment popup shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub method: String,
    pub booking: Booking,
    pub currency: String,
    pub closes_after_secs: u64,
}

/// Side channel for the "payment initiated" surface.
///
/// Opening is best effort: the flow carries on whether or not it succeeds.
pub trait PaymentNotifier {
    fn open(&self, summary: &PaymentSummary) -> Result<(), NotifyError>;
}

impl<N: PaymentNotifier + ?Sized> PaymentNotifier for &N {
    fn open(&self, summary: &PaymentSummary) -> Result<(), NotifyError> {
        (**self).open(summary)
    }
}

const POPUP_STYLE: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Poppins', sans-serif; background: #f0f4ff; padding: 20px; line-height: 1.6; color: #333; }
.container { max-width: 500px; margin: 0 auto; background: white; border-radius: 16px; overflow: hidden; box-shadow: 0 10px 30px rgba(0,0,0,0.15); }
.header { background: linear-gradient(135deg, #4361ee, #7209b7); color: white; padding: 24px; text-align: center; }
.content { padding: 24px; }
.detail { background: #f8f9ff; padding: 16px; border-radius: 10px; margin: 16px 0; }
.detail strong { color: #4361ee; font-weight: 600; }
.security { text-align: center; color: #27ae60; font-weight: 600; margin-top: 20px; }
.footer { text-align: center; font-size: 0.85rem; color: #6c757d; margin-top: 20px; padding-top: 15px; border-top: 1px dashed #eee; }";

/// Inner HTML for the popup's `<html>` element. User text is escaped.
pub fn render_summary_html(summary: &PaymentSummary) -> String {
    let booking = &summary.booking;
    let text = ammonia::clean_text;
    format!(
        r#"<head>
<meta charset="UTF-8">
<title>Payment Confirmation | UniVibe</title>
<style>{style}</style>
</head>
<body>
<div class="container">
  <div class="header">
    <h2>✅ Payment Initiated</h2>
    <p>{method} — Processing...</p>
  </div>
  <div class="content">
    <div class="detail">
      <p><strong>Full Name:</strong> {name}</p>
      <p><strong>Phone:</strong> {phone}</p>
      <p><strong>Ticket:</strong> {ticket}</p>
      <p><strong>Quantity:</strong> {quantity}</p>
      <p><strong>Total:</strong> {total} {currency}</p>
    </div>
    <p class="security">🔒 Your payment is secure.<br>We’ll verify and send confirmation within 5 minutes.</p>
    <div class="footer">
      <p>UniVibe Events &amp; Solutions • support@univibe.et</p>
      <p>This window will close automatically in {secs} seconds.</p>
    </div>
  </div>
</div>
</body>"#,
        style = POPUP_STYLE,
        method = text(&summary.method),
        name = text(&booking.full_name),
        phone = text(&booking.phone),
        ticket = text(&booking.ticket_type.priced_label(&summary.currency)),
        quantity = booking.quantity,
        total = booking.total,
        currency = text(&summary.currency),
        secs = summary.closes_after_secs,
    )
}
