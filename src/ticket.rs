//! QR-code tickets for confirmed bookings.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::booking::{Booking, BookingStatus};

/// Ticket generation errors
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("booking {0} is cancelled")]
    Cancelled(String),

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// A rendered ticket
#[derive(Debug, Clone)]
pub struct Ticket {
    /// Text encoded in the QR code
    pub payload: String,
    pub png: Vec<u8>,
}

impl Ticket {
    /// PNG as a `data:` URI, ready for an `<img src>`
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Text scanned at the jetty: booking, boat, date and slot
pub fn ticket_payload(booking: &Booking) -> String {
    format!(
        "DRIFTLY|{}|{}|{}|{}",
        booking.id, booking.boat_id, booking.date, booking.time_slot
    )
}

/// Render the QR ticket for a booking
pub fn render_ticket(booking: &Booking) -> Result<Ticket, TicketError> {
    if booking.status == BookingStatus::Cancelled {
        return Err(TicketError::Cancelled(booking.id.clone()));
    }

    let payload = ticket_payload(booking);
    let code = QrCode::new(payload.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(240, 240)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(Ticket { payload, png })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::compute_totals;
    use rust_decimal_macros::dec;

    fn booking(status: BookingStatus) -> Booking {
        let totals = compute_totals(dec!(2500), 2, false, dec!(1200), dec!(0.18));
        Booking {
            id: "bk-42".to_string(),
            boat_id: "1".to_string(),
            boat_name: "Blue Pearl".to_string(),
            date: "2026-11-20".to_string(),
            time_slot: "09:00 AM".to_string(),
            duration_hours: 2,
            include_add_on: false,
            totals,
            total_price: totals.grand_total,
            currency: "INR".to_string(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_payload() {
        assert_eq!(
            ticket_payload(&booking(BookingStatus::Confirmed)),
            "DRIFTLY|bk-42|1|2026-11-20|09:00 AM"
        );
    }

    #[test]
    fn test_render_png() {
        let ticket = render_ticket(&booking(BookingStatus::Confirmed)).unwrap();
        // PNG signature
        assert_eq!(&ticket.png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(ticket.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_cancelled_booking_has_no_ticket() {
        let err = render_ticket(&booking(BookingStatus::Cancelled)).unwrap_err();
        assert!(matches!(err, TicketError::Cancelled(id) if id == "bk-42"));
    }
}
