//! Appointment records, status lifecycle values and patch shapes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::day_block::DayBlock;
use super::slot::{Slot, SlotTime};
use crate::impl_status_conversions;

/// Store-assigned appointment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(i64);

impl AppointmentId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Appointment status.
///
/// `Scheduled`, `Finalized` and `Blocked` occupy their slot; `Cancelled`
/// never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Finalized,
    Cancelled,
    Blocked,
}

impl_status_conversions!(AppointmentStatus {
    Scheduled => "scheduled" | "agendado",
    Finalized => "finalized" | "finalizado",
    Cancelled => "cancelled" | "canceled" | "cancelado",
    Blocked => "blocked" | "bloqueado",
});

impl AppointmentStatus {
    /// Every status, in listing priority order.
    pub const ALL: [Self; 4] = [Self::Blocked, Self::Scheduled, Self::Finalized, Self::Cancelled];

    /// Statuses that count toward slot uniqueness.
    pub const OCCUPYING: [Self; 3] = [Self::Scheduled, Self::Finalized, Self::Blocked];

    pub const fn is_occupying(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Records may only be hard-deleted from these statuses.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finalized | Self::Cancelled)
    }

    /// Listing priority: slot blocks first, then open bookings, then history.
    pub const fn list_priority(self) -> u8 {
        match self {
            Self::Blocked => 0,
            Self::Scheduled => 1,
            Self::Finalized => 2,
            Self::Cancelled => 3,
        }
    }
}

/// A persisted appointment (or a slot-level block stored in the same shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_name: String,
    pub client_phone: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub service: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time.clone())
    }

    /// How this record occupies its slot, if it does at all.
    pub fn occupant(&self) -> Option<Occupant> {
        match self.status {
            AppointmentStatus::Cancelled => None,
            AppointmentStatus::Blocked => Some(Occupant::SlotBlock { id: self.id }),
            status => Some(Occupant::Booking { id: self.id, status }),
        }
    }
}

/// Something holding a slot.
///
/// Bookings and slot-level blocks share the `appointments` table; this view
/// lets occupancy checks treat them through one code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Occupant {
    Booking { id: AppointmentId, status: AppointmentStatus },
    SlotBlock { id: AppointmentId },
}

impl Occupant {
    pub const fn id(&self) -> AppointmentId {
        match self {
            Self::Booking { id, .. } | Self::SlotBlock { id } => *id,
        }
    }
}

/// Validated payload for inserting a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub client_name: String,
    pub client_phone: String,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub service: Option<String>,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// A slot-level block: occupying record with an empty client identity.
    pub fn slot_block(slot: Slot) -> Self {
        Self {
            client_name: String::new(),
            client_phone: String::new(),
            date: slot.date,
            time: slot.time,
            service: None,
            status: AppointmentStatus::Blocked,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.time.clone())
    }
}

/// Raw booking request as it arrives from a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub client_name: String,
    pub client_phone: String,
    /// Any form accepted by the date normalizer.
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Partial update as it arrives from a front end.
///
/// Absent fields keep their current value. `service` distinguishes "leave
/// alone" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub service: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        self.client_name.is_none()
            && self.client_phone.is_none()
            && self.service.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.status.is_none()
    }

    /// Whether the patch moves the record to another slot.
    pub fn moves_slot(&self) -> bool {
        self.date.is_some() || self.time.is_some()
    }
}

/// A patch after normalization and validation; only `Some` fields are
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentChanges {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub service: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub time: Option<SlotTime>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentChanges {
    /// The record as it would look after the changes are written.
    pub fn merged_over(&self, current: &Appointment) -> Appointment {
        Appointment {
            id: current.id,
            client_name: self.client_name.clone().unwrap_or_else(|| current.client_name.clone()),
            client_phone: self
                .client_phone
                .clone()
                .unwrap_or_else(|| current.client_phone.clone()),
            date: self.date.unwrap_or(current.date),
            time: self.time.clone().unwrap_or_else(|| current.time.clone()),
            service: self.service.clone().unwrap_or_else(|| current.service.clone()),
            status: self.status.unwrap_or(current.status),
            created_at: current.created_at,
        }
    }
}

/// Equality filters for listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.date.map_or(true, |date| appointment.date == date)
            && self.status.map_or(true, |status| appointment.status == status)
    }
}

/// Listing result: ordered records plus the day-block annotation when the
/// listing was filtered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentListing {
    pub items: Vec<Appointment>,
    pub day_block: Option<DayBlock>,
}
