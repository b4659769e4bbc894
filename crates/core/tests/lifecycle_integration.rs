//! Appointment lifecycle behaviour over in-memory stores.

mod support;

use std::sync::Arc;
use std::thread;

use chairbook_core::{AppointmentLifecycle, FixedCalendarClock};
use chairbook_domain::{
    AppointmentChanges, AppointmentId, AppointmentPatch, AppointmentStatus, ChairbookError,
};
use support::{booking, date, today, ConcurrentlyMovedStore, Harness};

fn patch_status(status: &str) -> AppointmentPatch {
    AppointmentPatch { status: Some(status.to_string()), ..AppointmentPatch::default() }
}

/// A booked slot conflicts until its booking is cancelled.
#[test]
fn test_booking_today_conflicts_until_the_first_is_cancelled() {
    let h = Harness::new();

    let first = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("first booking");
    assert_eq!(first.status, AppointmentStatus::Scheduled);
    assert_eq!(first.client_phone, "(11) 99999-8888");
    assert_eq!(first.date, today());

    let second = h.lifecycle.create(&booking("Bruno", today().to_string().as_str(), "10:00"));
    assert!(matches!(second, Err(ChairbookError::SlotConflict { .. })));

    h.lifecycle.update(first.id, &patch_status("cancelled")).expect("cancel via update");

    let retry = h.lifecycle.create(&booking("Bruno", "hoje", "10:00")).expect("slot freed");
    assert_eq!(retry.status, AppointmentStatus::Scheduled);
    assert_eq!(h.store.count(), 2);
}

/// Booking on a blocked day fails with the block's reason.
#[test]
fn test_blocked_day_rejects_bookings_with_reason() {
    let h = Harness::at(date(2025, 12, 1));
    h.day_blocks.block(date(2025, 12, 25), Some("Holiday")).expect("day blocked");

    let err = h.lifecycle.create(&booking("Ana", "25/12/2025", "10:00")).expect_err("blocked");
    assert_eq!(
        err,
        ChairbookError::DayBlocked { day: date(2025, 12, 25), reason: Some("Holiday".into()) }
    );

    h.day_blocks.unblock(date(2025, 12, 25)).expect("unblocked");
    h.lifecycle.create(&booking("Ana", "25/12/2025", "10:00")).expect("open again");
}

/// Past dates are rejected; today is accepted.
#[test]
fn test_past_dates_are_rejected_but_today_is_accepted() {
    let h = Harness::new();

    let err = h.lifecycle.create(&booking("Ana", "09/06/2025", "10:00")).expect_err("past");
    assert_eq!(err, ChairbookError::PastDate { date: date(2025, 6, 9) });

    h.lifecycle.create(&booking("Ana", "10/06/2025", "10:00")).expect("today is fine");
    h.lifecycle.create(&booking("Ana", "amanhã", "10:00")).expect("tomorrow is fine");
}

/// Field validation runs before any calendar check.
#[test]
fn test_create_validates_required_fields_first() {
    let h = Harness::new();

    let mut blank_name = booking("  ", "hoje", "10:00");
    assert!(matches!(h.lifecycle.create(&blank_name), Err(ChairbookError::Validation(_))));

    blank_name.client_name = "Ana".into();
    blank_name.client_phone = "no digits".into();
    assert!(matches!(h.lifecycle.create(&blank_name), Err(ChairbookError::Validation(_))));

    let bad_date = booking("Ana", "next week", "10:00");
    assert!(matches!(h.lifecycle.create(&bad_date), Err(ChairbookError::Validation(_))));

    let blank_time = booking("Ana", "hoje", " ");
    assert!(matches!(h.lifecycle.create(&blank_time), Err(ChairbookError::Validation(_))));

    assert_eq!(h.store.count(), 0);
}

/// `9:00` and `09:00` are the same slot.
#[test]
fn test_equivalent_time_spellings_share_a_slot() {
    let h = Harness::new();
    h.lifecycle.create(&booking("Ana", "hoje", "9:00")).expect("booked");

    let err = h.lifecycle.create(&booking("Bruno", "hoje", "09:00:00")).expect_err("same slot");
    assert!(matches!(err, ChairbookError::SlotConflict { ref time, .. } if time == "09:00"));
}

/// Finalized and blocked records both occupy their slot.
#[test]
fn test_finalized_and_blocked_records_occupy_their_slot() {
    let h = Harness::new();

    let done = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");
    h.lifecycle.finalize(done.id).expect("finalized");
    assert!(matches!(
        h.lifecycle.create(&booking("Bruno", "hoje", "10:00")),
        Err(ChairbookError::SlotConflict { .. })
    ));

    h.lifecycle.block_slot("hoje", "11:00").expect("slot blocked");
    assert!(matches!(
        h.lifecycle.create(&booking("Bruno", "hoje", "11:00")),
        Err(ChairbookError::SlotConflict { .. })
    ));
}

/// An edit never conflicts with the record itself.
#[test]
fn test_update_checks_the_merged_slot_and_skips_itself() {
    let h = Harness::new();
    let ana = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");
    h.lifecycle.create(&booking("Bruno", "hoje", "11:00")).expect("booked");

    let renamed = h
        .lifecycle
        .update(
            ana.id,
            &AppointmentPatch { client_name: Some("Ana Paula".into()), ..Default::default() },
        )
        .expect("same slot, no self conflict");
    assert_eq!(renamed.client_name, "Ana Paula");
    assert_eq!(renamed.time, ana.time);
    assert_eq!(renamed.service.as_deref(), Some("Corte"));

    let moved = h.lifecycle.update(
        ana.id,
        &AppointmentPatch { time: Some("11:00".into()), ..Default::default() },
    );
    assert!(matches!(moved, Err(ChairbookError::SlotConflict { .. })));

    let stored = h.lifecycle.get(ana.id).expect("still there");
    assert_eq!(stored.time.as_str(), "10:00");
}

/// Update failure modes in check order.
#[test]
fn test_update_error_cases() {
    let h = Harness::new();
    let ana = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");

    assert!(matches!(
        h.lifecycle.update(AppointmentId::new(999), &patch_status("finalized")),
        Err(ChairbookError::NotFound(_))
    ));
    assert_eq!(
        h.lifecycle.update(ana.id, &AppointmentPatch::default()),
        Err(ChairbookError::NothingToUpdate)
    );
    assert!(matches!(
        h.lifecycle.update(ana.id, &patch_status("done")),
        Err(ChairbookError::Validation(_))
    ));
    assert!(matches!(
        h.lifecycle
            .update(ana.id, &AppointmentPatch { date: Some("soon".into()), ..Default::default() }),
        Err(ChairbookError::Validation(_))
    ));
    assert!(matches!(
        h.lifecycle.update(
            ana.id,
            &AppointmentPatch { date: Some("2025-06-01".into()), ..Default::default() }
        ),
        Err(ChairbookError::PastDate { .. })
    ));

    h.day_blocks.block(date(2025, 6, 12), None).expect("blocked");
    assert!(matches!(
        h.lifecycle.update(
            ana.id,
            &AppointmentPatch { date: Some("12/06/2025".into()), ..Default::default() }
        ),
        Err(ChairbookError::DayBlocked { reason: None, .. })
    ));
}

/// A record moved by another request before the lock is checked on its new day.
#[test]
fn test_update_rechecks_day_rules_after_a_concurrent_move() {
    let h = Harness::new();
    let store = Arc::new(ConcurrentlyMovedStore::default());
    let lifecycle = AppointmentLifecycle::new(
        store.clone(),
        h.day_blocks.clone(),
        Arc::new(FixedCalendarClock::new(today())),
    );
    let ana = lifecycle.create(&booking("Ana", "20/06/2025", "10:00")).expect("booked");
    h.day_blocks.block(date(2025, 6, 27), Some("Curso")).expect("blocked");

    store.move_before_next_lock(
        ana.id,
        AppointmentChanges { date: Some(date(2025, 6, 27)), ..AppointmentChanges::default() },
    );
    let err = lifecycle
        .update(ana.id, &AppointmentPatch { time: Some("11:00".into()), ..Default::default() })
        .expect_err("record now sits on a blocked day");
    assert!(matches!(err, ChairbookError::DayBlocked { .. }));

    let stored = lifecycle.get(ana.id).expect("stored");
    assert_eq!(stored.date, date(2025, 6, 27));
    assert_eq!(stored.time.as_str(), "10:00");
}

/// A patch can clear the optional service.
#[test]
fn test_update_can_clear_the_service() {
    let h = Harness::new();
    let ana = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");

    let cleared = h
        .lifecycle
        .update(ana.id, &AppointmentPatch { service: Some(None), ..Default::default() })
        .expect("cleared");
    assert_eq!(cleared.service, None);
}

/// Reopening a cancelled booking is checked for occupancy.
#[test]
fn test_reopening_a_cancelled_booking_goes_through_the_occupancy_check() {
    let h = Harness::new();
    let ana = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");
    h.lifecycle.cancel(ana.id).expect("cancelled");
    h.lifecycle.create(&booking("Bruno", "hoje", "10:00")).expect("slot reused");

    let reopened = h.lifecycle.update(ana.id, &patch_status("scheduled"));
    assert!(matches!(reopened, Err(ChairbookError::SlotConflict { .. })));
}

/// Finalize and cancel are only allowed from scheduled.
#[test]
fn test_guarded_transitions_only_leave_scheduled() {
    let h = Harness::new();
    let ana = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");

    let finalized = h.lifecycle.finalize(ana.id).expect("finalized");
    assert_eq!(finalized.status, AppointmentStatus::Finalized);

    assert_eq!(
        h.lifecycle.cancel(ana.id),
        Err(ChairbookError::InvalidTransition {
            id: ana.id,
            status: AppointmentStatus::Finalized
        })
    );
}

/// Delete requires a finalized or cancelled record.
#[test]
fn test_delete_requires_a_terminal_status() {
    let h = Harness::new();
    let ana = h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");
    let block = h.lifecycle.block_slot("hoje", "11:00").expect("slot blocked");

    assert!(matches!(
        h.lifecycle.delete(ana.id),
        Err(ChairbookError::InvalidTransition { status: AppointmentStatus::Scheduled, .. })
    ));
    assert!(matches!(
        h.lifecycle.delete(block.id),
        Err(ChairbookError::InvalidTransition { status: AppointmentStatus::Blocked, .. })
    ));
    assert!(matches!(
        h.lifecycle.delete(AppointmentId::new(404)),
        Err(ChairbookError::NotFound(_))
    ));

    h.lifecycle.cancel(ana.id).expect("cancelled");
    h.lifecycle.delete(ana.id).expect("deleted");
    assert!(matches!(h.lifecycle.get(ana.id), Err(ChairbookError::NotFound(_))));
}

/// Bulk delete removes only cancelled records and is idempotent.
#[test]
fn test_bulk_delete_removes_only_cancelled_and_is_idempotent() {
    let h = Harness::new();
    let a = h.lifecycle.create(&booking("Ana", "hoje", "09:00")).expect("booked");
    let b = h.lifecycle.create(&booking("Bruno", "hoje", "09:30")).expect("booked");
    let c = h.lifecycle.create(&booking("Carla", "hoje", "10:00")).expect("booked");
    h.lifecycle.cancel(a.id).expect("cancelled");
    h.lifecycle.cancel(b.id).expect("cancelled");
    h.lifecycle.finalize(c.id).expect("finalized");

    assert_eq!(h.lifecycle.bulk_delete_cancelled().expect("purged"), 2);
    assert_eq!(h.lifecycle.bulk_delete_cancelled().expect("purged"), 0);

    let remaining = h.store.all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, c.id);
}

/// Slot blocks skip client fields but not past-date or conflict checks.
#[test]
fn test_slot_blocks_skip_client_checks_but_not_past_or_conflict_checks() {
    let h = Harness::new();

    let block = h.lifecycle.block_slot("hoje", "14:00").expect("blocked");
    assert_eq!(block.status, AppointmentStatus::Blocked);
    assert!(block.client_name.is_empty());
    assert!(block.client_phone.is_empty());

    assert!(matches!(
        h.lifecycle.block_slot("hoje", "14:00"),
        Err(ChairbookError::SlotConflict { .. })
    ));
    assert!(matches!(
        h.lifecycle.block_slot("01/01/2020", "14:00"),
        Err(ChairbookError::PastDate { .. })
    ));
}

/// Unblocking a slot removes only its blocked record.
#[test]
fn test_unblock_slot_only_removes_blocked_records() {
    let h = Harness::new();
    h.lifecycle.create(&booking("Ana", "hoje", "10:00")).expect("booked");

    assert!(matches!(h.lifecycle.unblock_slot("hoje", "10:00"), Err(ChairbookError::NotFound(_))));

    h.lifecycle.block_slot("hoje", "15:00").expect("blocked");
    h.lifecycle.unblock_slot("hoje", "15:00").expect("unblocked");
    assert!(matches!(h.lifecycle.unblock_slot("hoje", "15:00"), Err(ChairbookError::NotFound(_))));
    assert_eq!(h.store.count(), 1);
}

/// Threads racing for one slot: exactly one booking lands.
#[test]
fn test_concurrent_bookings_for_one_slot_have_a_single_winner() {
    let h = Arc::new(Harness::new());

    let handles: Vec<_> = ["Ana", "Bruno", "Carla", "Davi"]
        .into_iter()
        .map(|name| {
            let h = Arc::clone(&h);
            thread::spawn(move || h.lifecycle.create(&booking(name, "hoje", "16:00")))
        })
        .collect();

    let results: Vec<_> =
        handles.into_iter().map(|handle| handle.join().expect("thread finished")).collect();

    let winners = results.iter().filter(|result| result.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|result| matches!(result, Err(ChairbookError::SlotConflict { .. })))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(conflicts, 3);
}
