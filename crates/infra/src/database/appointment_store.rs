//! SQLite-backed implementation of the `AppointmentStore` port.
//!
//! Each unit of work is one `BEGIN IMMEDIATE` transaction on a dedicated
//! pooled connection. The partial unique index on `(date, time)` backs the
//! occupancy rule; a write it rejects surfaces as `SlotConflict`.

use std::sync::Arc;

use chairbook_common::storage::WriteTransaction;
use chairbook_core::{AppointmentStore, AppointmentUnitOfWork};
use chairbook_domain::{
    Appointment, AppointmentChanges, AppointmentFilter, AppointmentId, AppointmentStatus,
    ChairbookError, NewAppointment, Result, Slot, SlotTime,
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::{debug, error};

use super::manager::{map_sql_error, map_storage_error, DbManager};
use crate::errors::is_unique_violation;

const APPOINTMENT_COLUMNS: &str =
    "id, client_name, client_phone, date, time, service, status, created_at";

/// Repository for appointment rows.
pub struct SqliteAppointmentStore {
    db: Arc<DbManager>,
}

impl SqliteAppointmentStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

impl AppointmentStore for SqliteAppointmentStore {
    fn begin(&self) -> Result<Box<dyn AppointmentUnitOfWork + '_>> {
        let tx = self.db.begin_write().inspect_err(|err| {
            error!(error = %err, "failed to open appointment unit of work");
        })?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }

    fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        let conn = self.db.get_connection()?;
        select_by_id(&conn, id)
    }

    fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let conn = self.db.get_connection()?;

        let mut clauses = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(date) = filter.date {
            values.push(Value::Text(date.to_string()));
            clauses.push(format!("date = ?{}", values.len()));
        }
        if let Some(status) = filter.status {
            values.push(Value::Text(status.as_str().to_string()));
            clauses.push(format!("status = ?{}", values.len()));
        }

        let mut sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params_from_iter(values), map_appointment_row)
            .map_err(map_sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sql_error)?;

        debug!(?filter, count = rows.len(), "appointments loaded");
        Ok(rows)
    }
}

struct SqliteUnitOfWork {
    tx: WriteTransaction,
}

impl AppointmentUnitOfWork for SqliteUnitOfWork {
    fn find_by_id(&mut self, id: AppointmentId) -> Result<Option<Appointment>> {
        select_by_id(&self.tx, id)
    }

    fn records_at(&mut self, slot: &Slot) -> Result<Vec<Appointment>> {
        let mut stmt = self
            .tx
            .prepare(&format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE date = ?1 AND time = ?2"
            ))
            .map_err(map_sql_error)?;
        let rows = stmt
            .query_map(params![slot.date, slot.time.as_str()], map_appointment_row)
            .map_err(map_sql_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sql_error)?;
        Ok(rows)
    }

    fn insert(&mut self, record: &NewAppointment) -> Result<Appointment> {
        let created_at = Utc::now();
        self.tx
            .execute(
                "INSERT INTO appointments
                    (client_name, client_phone, date, time, service, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.client_name,
                    record.client_phone,
                    record.date,
                    record.time.as_str(),
                    record.service,
                    record.status.as_str(),
                    created_at,
                ],
            )
            .map_err(|err| slot_error(err, &record.slot()))?;

        Ok(Appointment {
            id: AppointmentId::new(self.tx.last_insert_rowid()),
            client_name: record.client_name.clone(),
            client_phone: record.client_phone.clone(),
            date: record.date,
            time: record.time.clone(),
            service: record.service.clone(),
            status: record.status,
            created_at,
        })
    }

    fn update(&mut self, id: AppointmentId, changes: &AppointmentChanges) -> Result<Appointment> {
        let current = select_by_id(&self.tx, id)?
            .ok_or_else(|| ChairbookError::not_found(format!("appointment {id}")))?;

        let mut assignments = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        let mut set = |column: &str, value: Value| {
            values.push(value);
            assignments.push(format!("{column} = ?{}", values.len()));
        };

        if let Some(name) = &changes.client_name {
            set("client_name", Value::Text(name.clone()));
        }
        if let Some(phone) = &changes.client_phone {
            set("client_phone", Value::Text(phone.clone()));
        }
        if let Some(service) = &changes.service {
            set("service", service.clone().map_or(Value::Null, Value::Text));
        }
        if let Some(date) = changes.date {
            set("date", Value::Text(date.to_string()));
        }
        if let Some(time) = &changes.time {
            set("time", Value::Text(time.as_str().to_string()));
        }
        if let Some(status) = changes.status {
            set("status", Value::Text(status.as_str().to_string()));
        }

        if assignments.is_empty() {
            return Ok(current);
        }

        values.push(Value::Integer(id.get()));
        let sql = format!(
            "UPDATE appointments SET {} WHERE id = ?{}",
            assignments.join(", "),
            values.len()
        );

        let merged = changes.merged_over(&current);
        self.tx
            .execute(&sql, params_from_iter(values))
            .map_err(|err| slot_error(err, &merged.slot()))?;

        Ok(merged)
    }

    fn delete(&mut self, id: AppointmentId) -> Result<bool> {
        let removed = self
            .tx
            .execute("DELETE FROM appointments WHERE id = ?1", params![id.get()])
            .map_err(map_sql_error)?;
        Ok(removed > 0)
    }

    fn delete_by_status(&mut self, status: AppointmentStatus) -> Result<usize> {
        self.tx
            .execute("DELETE FROM appointments WHERE status = ?1", params![status.as_str()])
            .map_err(map_sql_error)
    }

    fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().map_err(map_storage_error)
    }
}

fn select_by_id(conn: &Connection, id: AppointmentId) -> Result<Option<Appointment>> {
    conn.query_row(
        &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
        params![id.get()],
        map_appointment_row,
    )
    .optional()
    .map_err(map_sql_error)
}

/// Unique-index rejections mean the slot is already occupied.
fn slot_error(err: rusqlite::Error, slot: &Slot) -> ChairbookError {
    if is_unique_violation(&err) {
        ChairbookError::SlotConflict { date: slot.date, time: slot.time.to_string() }
    } else {
        map_sql_error(err)
    }
}

fn map_appointment_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let status: String = row.get(6)?;
    let status = status.parse::<AppointmentStatus>().map_err(|message| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Text, message.into())
    })?;

    Ok(Appointment {
        id: AppointmentId::new(row.get(0)?),
        client_name: row.get(1)?,
        client_phone: row.get(2)?,
        date: row.get::<_, NaiveDate>(3)?,
        time: SlotTime::from_stored(row.get::<_, String>(4)?),
        service: row.get(5)?,
        status,
        created_at: row.get::<_, DateTime<Utc>>(7)?,
    })
}
