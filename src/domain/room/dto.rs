use rust_decimal::Decimal;

/// Input for [`RoomRegistry::create`](crate::application::RoomRegistry::create).
///
/// `status` is raw text so the registry owns validation.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub unit_number: u32,
    pub capacity: u32,
    pub status: String,
    pub booking_id: Option<String>,
    pub base_price: Decimal,
}

/// Changes for [`RoomRegistry::update_details`](crate::application::RoomRegistry::update_details).
///
/// `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomPatch {
    pub capacity: Option<u32>,
    pub base_price: Option<Decimal>,
}

impl RoomPatch {
    pub fn is_empty(&self) -> bool {
        self.capacity.is_none() && self.base_price.is_none()
    }
}
