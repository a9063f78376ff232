/// Input for [`BookingRegistry::create`](crate::application::BookingRegistry::create).
///
/// Dates and status arrive as text, the way a form submits them.
#[derive(Debug, Clone, Default)]
pub struct NewBooking {
    pub booking_id: String,
    pub surname: String,
    pub middle_name: String,
    pub first_name: String,
    pub party_size: u32,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    pub status: String,
}
