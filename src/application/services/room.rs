//! Room registry

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::room::model::normalize_booking_ref;
use crate::domain::{DomainError, DomainResult, NewRoom, Room, RoomPatch, RoomStatus};
use crate::infrastructure::save_rooms;
use crate::shared::AppResult;

/// In-memory rooms in insertion order.
///
/// Callers only get shared views; every change goes through a method here
/// so unit numbers stay unique.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Build from loaded rooms. A repeated unit number keeps the first row.
    pub fn new(rooms: Vec<Room>) -> Self {
        let mut seen = HashSet::new();
        let rooms = rooms
            .into_iter()
            .filter(|room| {
                let fresh = seen.insert(room.unit_number);
                if !fresh {
                    warn!("Dropping duplicate room {}", room.unit_number);
                }
                fresh
            })
            .collect();
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Add a room. Rejected when the unit number is taken or the status is
    /// not Available, Occupied or Maintenance.
    pub fn create(&mut self, input: NewRoom) -> DomainResult<Room> {
        if self.exists(input.unit_number) {
            warn!("Room {} already exists", input.unit_number);
            return Err(DomainError::Conflict(format!("Room {}", input.unit_number)));
        }

        let status = input.status.parse::<RoomStatus>().inspect_err(|e| {
            warn!("Rejected room {}: {}", input.unit_number, e);
        })?;

        let room = Room::new(
            input.unit_number,
            input.capacity,
            status,
            input.booking_id,
            input.base_price,
        );
        self.rooms.push(room.clone());

        info!("Room {} created ({})", room.unit_number, room.status);
        Ok(room)
    }

    pub fn find(&self, unit_number: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.unit_number == unit_number)
    }

    pub fn exists(&self, unit_number: u32) -> bool {
        self.find(unit_number).is_some()
    }

    fn find_mut(&mut self, unit_number: u32) -> DomainResult<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|r| r.unit_number == unit_number)
            .ok_or_else(|| DomainError::room_not_found(unit_number))
    }

    /// Any valid status may replace any other.
    pub fn update_status(&mut self, unit_number: u32, new_status: &str) -> DomainResult<()> {
        let status = new_status.parse::<RoomStatus>().inspect_err(|e| {
            warn!("Rejected status change for room {}: {}", unit_number, e);
        })?;

        let room = self.find_mut(unit_number)?;
        let previous = room.status;
        room.status = status;

        info!("Room {} status: {} -> {}", unit_number, previous, status);
        Ok(())
    }

    /// Change capacity and/or base price. Fields left `None` keep their value.
    pub fn update_details(&mut self, unit_number: u32, patch: RoomPatch) -> DomainResult<Room> {
        let room = self.find_mut(unit_number)?;
        if let Some(capacity) = patch.capacity {
            room.capacity = capacity;
        }
        if let Some(base_price) = patch.base_price {
            room.base_price = base_price;
        }

        info!(
            "Room {} details: capacity {}, base price {}",
            unit_number, room.capacity, room.base_price
        );
        Ok(room.clone())
    }

    /// Set or clear the booking reference. The id is not checked against
    /// any booking registry.
    pub fn assign_booking(&mut self, unit_number: u32, booking_id: Option<String>) -> DomainResult<()> {
        let room = self.find_mut(unit_number)?;
        room.booking_id = normalize_booking_ref(booking_id);

        match &room.booking_id {
            Some(id) => info!("Room {} linked to booking {}", unit_number, id),
            None => info!("Room {} booking reference cleared", unit_number),
        }
        Ok(())
    }

    /// Remove a room and hand it back.
    pub fn delete(&mut self, unit_number: u32) -> DomainResult<Room> {
        let idx = self
            .rooms
            .iter()
            .position(|r| r.unit_number == unit_number)
            .ok_or_else(|| DomainError::room_not_found(unit_number))?;

        let room = self.rooms.remove(idx);
        info!("Room {} deleted", unit_number);
        Ok(room)
    }

    pub fn list_by_status(&self, status: RoomStatus) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.status == status).collect()
    }

    pub fn list_available(&self) -> Vec<&Room> {
        self.list_by_status(RoomStatus::Available)
    }

    pub fn list_occupied(&self) -> Vec<&Room> {
        self.list_by_status(RoomStatus::Occupied)
    }

    pub fn list_maintenance(&self) -> Vec<&Room> {
        self.list_by_status(RoomStatus::Maintenance)
    }

    /// Rows of `[unit, capacity, status, booking id, price]` for display.
    pub fn table_rows(&self) -> Vec<[String; 5]> {
        self.rooms.iter().map(Room::to_row).collect()
    }

    /// Overwrite `path` with the current rooms.
    pub fn flush(&self, path: impl AsRef<Path>) -> AppResult<()> {
        save_rooms(path, &self.rooms)
    }
}
