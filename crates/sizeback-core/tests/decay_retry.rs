//! Integration test: the decay executor against a real filesystem probe.
//!
//! Drives `retry_backoff_size` with scripted operations in a scratch directory
//! and checks the attempt sequence it offers.

use sizeback_core::probe;
use sizeback_core::quantity::{min_quantity, Quantity};
use sizeback_core::retry::{retry_backoff_size, DecayPolicy, RetrySizeError};
use sizeback_core::storage::Preallocator;
use std::io;
use std::path::Path;
use tempfile::tempdir;

fn no_space() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "no space left on device")
}

#[test]
fn offered_sizes_follow_ten_percent_steps() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("disk.img");
    let bs = probe::block_size(dir.path()).unwrap().get() as i64;
    let start = Quantity::new(250 * bs, 0);

    let mut offered = Vec::new();
    let err = retry_backoff_size(&dest, &start, |_, size| {
        offered.push(*size);
        Err(no_space())
    })
    .unwrap_err();

    let expected: Vec<Quantity> = (0..=10)
        .map(|i| Quantity::new((250 - 25 * i) * bs, 0))
        .collect();
    assert_eq!(offered, expected);
    assert!(err.is_exhausted());
    assert_eq!(err.attempts(), 11);
}

#[test]
fn destination_is_passed_through_unchanged() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("nested-name.raw");
    let mut seen = Vec::new();
    let _ = retry_backoff_size(&dest, &Quantity::new(10, 3), |d, _| {
        seen.push(d.to_path_buf());
        Err(no_space())
    });
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|d| d == &dest));
    assert!(!dest.exists());
}

#[test]
fn missing_parent_directory_is_a_probe_failure() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("no-such-dir").join("disk.img");
    let mut calls = 0;
    let err = retry_backoff_size(&dest, &Quantity::new(1, 9), |_, _| {
        calls += 1;
        Ok::<(), io::Error>(())
    })
    .unwrap_err();
    assert_eq!(calls, 0);
    assert!(matches!(err, RetrySizeError::Probe(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn schedule_matches_what_the_executor_offers() {
    let dir = tempdir().unwrap();
    let block = probe::block_size(dir.path()).unwrap();
    let start = 123_456_789u64;
    let planned: Vec<Quantity> = DecayPolicy::default()
        .schedule(start, block)
        .map(|a| a.size)
        .collect();

    let mut offered = Vec::new();
    let _ = retry_backoff_size(
        &dir.path().join("disk.img"),
        &Quantity::from_bytes(start as i64),
        |_, size| {
            offered.push(*size);
            Err(no_space())
        },
    );
    assert_eq!(offered, planned);
}

#[test]
fn capped_start_preallocates() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("disk.img");
    let available = probe::available_bytes(dir.path()).unwrap();
    let wanted = Quantity::new(2, 6);
    let start = min_quantity(&wanted, &Quantity::from_bytes(available as i64));

    let mut op = Preallocator::new();
    sizeback_core::retry::run_sized(&DecayPolicy::default(), &dest, &start, &mut op).unwrap();
    let reserved = op.reserved().unwrap();
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), reserved);
    assert!(Quantity::from_bytes(reserved as i64) <= wanted);
}

#[test]
fn relative_bare_name_probes_working_directory() {
    let mut calls = 0;
    retry_backoff_size(Path::new("bare-name.img"), &Quantity::new(5, 2), |_, _| {
        calls += 1;
        Ok::<(), io::Error>(())
    })
    .unwrap();
    assert_eq!(calls, 1);
}
