//! Tests for preallocate.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_preallocate() {
    match parse(&["sizeback", "preallocate", "disk.img", "250"]) {
        CliCommand::Preallocate {
            dest,
            magnitude,
            scale,
            no_cap,
        } => {
            assert_eq!(dest, Path::new("disk.img"));
            assert_eq!(magnitude, 250);
            assert_eq!(scale, 0);
            assert!(!no_cap);
        }
        _ => panic!("expected Preallocate"),
    }
}

#[test]
fn cli_parse_preallocate_scaled_no_cap() {
    match parse(&[
        "sizeback",
        "preallocate",
        "/srv/vm.raw",
        "10",
        "--scale",
        "9",
        "--no-cap",
    ]) {
        CliCommand::Preallocate {
            magnitude,
            scale,
            no_cap,
            ..
        } => {
            assert_eq!(magnitude, 10);
            assert_eq!(scale, 9);
            assert!(no_cap);
        }
        _ => panic!("expected Preallocate"),
    }
}

#[test]
fn cli_preallocate_requires_size() {
    assert!(Cli::try_parse_from(["sizeback", "preallocate", "disk.img"]).is_err());
}
