//! Command handlers and table rendering.

use std::path::Path;

use hotel_desk::config::AppConfig;
use hotel_desk::domain::{
    Booking, BookingStatus, NewBooking, NewRoom, Room, RoomPatch, RoomStatus,
};
use hotel_desk::infrastructure::{init_bookings_file, init_rooms_file};
use hotel_desk::HotelDesk;
use tracing::warn;

use crate::{BookingCommand, RoomCommand};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

const ROOM_COLUMNS: [&str; 5] = ["Unit#", "Capacity", "Status", "BookingID", "Price"];
const BOOKING_COLUMNS: [&str; 8] = [
    "BookingID",
    "Surname",
    "Middle",
    "First",
    "PartySize",
    "StartDate",
    "EndDate",
    "Status",
];

pub(crate) fn init_files(config: &AppConfig, force: bool) -> CmdResult {
    let storage = &config.storage;
    for path in [&storage.rooms_path, &storage.bookings_path] {
        if path.exists() && !force {
            return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
        }
    }

    init_rooms_file(&storage.rooms_path)?;
    init_bookings_file(&storage.bookings_path)?;
    println!("Initialized {}", storage.rooms_path.display());
    println!("Initialized {}", storage.bookings_path.display());
    Ok(())
}

pub(crate) fn init_config(path: &Path, force: bool) -> CmdResult {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }
    AppConfig::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

pub(crate) fn rooms(desk: &mut HotelDesk, action: RoomCommand) -> CmdResult {
    match action {
        RoomCommand::List {
            available,
            occupied,
            maintenance,
            json,
        } => {
            let rooms: Vec<&Room> = if available {
                desk.rooms().list_available()
            } else if occupied {
                desk.rooms().list_occupied()
            } else if maintenance {
                desk.rooms().list_maintenance()
            } else {
                desk.rooms().rooms().iter().collect()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&rooms)?);
            } else if rooms.is_empty() {
                println!("Room list is empty");
            } else {
                let rows: Vec<Vec<String>> = rooms.iter().map(|r| r.to_row().to_vec()).collect();
                print_table(&ROOM_COLUMNS, &rows);
            }
        }
        RoomCommand::Show { unit } => {
            let room = desk
                .rooms()
                .find(unit)
                .ok_or_else(|| hotel_desk::DomainError::room_not_found(unit))?;
            print_record(&ROOM_COLUMNS, &room.to_row());
        }
        RoomCommand::Add {
            unit,
            capacity,
            status,
            price,
            booking,
        } => {
            let room = desk.rooms_mut().create(NewRoom {
                unit_number: unit,
                capacity,
                status,
                booking_id: booking,
                base_price: price,
            })?;
            desk.persist_room(&room)?;
            println!("Added room {}", room.unit_number);
        }
        RoomCommand::Edit {
            unit,
            capacity,
            price,
        } => {
            let room = desk.rooms_mut().update_details(
                unit,
                RoomPatch {
                    capacity,
                    base_price: price,
                },
            )?;
            desk.flush_rooms()?;
            print_record(&ROOM_COLUMNS, &room.to_row());
        }
        RoomCommand::SetStatus { unit, status } => {
            desk.rooms_mut().update_status(unit, &status)?;
            desk.flush_rooms()?;
            println!("Room {} is now {}", unit, status_of_room(desk, unit));
        }
        RoomCommand::Assign { unit, booking } => {
            if let Some(id) = booking.as_deref() {
                if !desk.bookings().exists(id.trim()) {
                    // Soft reference, never enforced.
                    warn!("Booking {} is not in the bookings file", id);
                }
            }
            desk.rooms_mut().assign_booking(unit, booking)?;
            desk.flush_rooms()?;
            println!("Updated room {}", unit);
        }
        RoomCommand::Remove { unit } => {
            desk.rooms_mut().delete(unit)?;
            desk.flush_rooms()?;
            println!("Removed room {}", unit);
        }
    }
    Ok(())
}

pub(crate) fn bookings(desk: &mut HotelDesk, action: BookingCommand) -> CmdResult {
    match action {
        BookingCommand::List {
            paid,
            pending,
            refunded,
            json,
        } => {
            let bookings: Vec<&Booking> = if paid {
                desk.bookings().list_paid()
            } else if pending {
                desk.bookings().list_pending()
            } else if refunded {
                desk.bookings().list_refunded()
            } else {
                desk.bookings().bookings().iter().collect()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&bookings)?);
            } else if bookings.is_empty() {
                println!("Booking list is empty");
            } else {
                let rows: Vec<Vec<String>> =
                    bookings.iter().map(|b| b.to_row().to_vec()).collect();
                print_table(&BOOKING_COLUMNS, &rows);
            }
        }
        BookingCommand::Show { id } => {
            let booking = desk
                .bookings()
                .find(&id)
                .ok_or_else(|| hotel_desk::DomainError::booking_not_found(&id))?;
            print_record(&BOOKING_COLUMNS, &booking.to_row());
            println!("{:>10}: {}", "Nights", booking.nights());
        }
        BookingCommand::Add {
            id,
            surname,
            middle_name,
            first_name,
            party_size,
            start,
            end,
            status,
        } => {
            let booking_id = id.unwrap_or_else(|| {
                desk.bookings()
                    .next_booking_id(chrono::Local::now().date_naive())
            });
            let booking = desk.bookings_mut().create(NewBooking {
                booking_id,
                surname,
                middle_name,
                first_name,
                party_size,
                start_date: start,
                end_date: end,
                status,
            })?;
            desk.persist_booking(&booking)?;
            println!("Added booking {}", booking.booking_id);
        }
        BookingCommand::SetStatus { id, status } => {
            desk.bookings_mut().update_status(&id, &status)?;
            desk.flush_bookings()?;
            println!("Booking {} updated", id);
        }
        BookingCommand::Remove { id } => {
            desk.bookings_mut().delete(&id)?;
            desk.flush_bookings()?;
            println!("Removed booking {}", id);
        }
    }
    Ok(())
}

pub(crate) fn summary(desk: &HotelDesk) {
    println!("Rooms ({}):", desk.rooms().len());
    for status in RoomStatus::ALL {
        println!("   {:<16} {}", status.as_str(), desk.rooms().list_by_status(status).len());
    }

    println!("Bookings ({}):", desk.bookings().len());
    for status in BookingStatus::ALL {
        println!("   {:<16} {}", status.as_str(), desk.bookings().list_by_status(status).len());
    }

    if !desk.load_issues().is_empty() {
        println!("Load stopped early:");
        for issue in desk.load_issues() {
            println!("   {}", issue);
        }
    }
}

fn status_of_room(desk: &HotelDesk, unit: u32) -> String {
    desk.rooms()
        .find(unit)
        .map(|r| r.status.to_string())
        .unwrap_or_default()
}

fn print_record(columns: &[&str], values: &[String]) {
    for (column, value) in columns.iter().zip(values) {
        println!("{:>10}: {}", column, value);
    }
}

fn print_table(columns: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(columns.to_vec()));
    println!(
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    );
    for row in rows {
        println!("{}", render(row.iter().map(String::as_str).collect()));
    }
}
