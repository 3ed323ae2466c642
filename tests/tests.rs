// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Integration tests for the `gmxprep` library.

use std::fs::{copy, read_to_string};

use gmxprep::prelude::*;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_assemble_no_overrides() {
    let output = NamedTempFile::new().unwrap();
    let path_to_output = output.path().to_str().unwrap();

    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .output(path_to_output)
        .silent()
        .overwrite()
        .build()
        .unwrap();

    prep.run().unwrap();

    // without overrides, the base file passes through byte for byte
    let result = read_to_string(path_to_output).unwrap();
    let expected = read_to_string("tests/files/default.mdp").unwrap();
    assert_eq!(result, expected);
}

#[test]
fn test_assemble_with_overrides_file() {
    let output = NamedTempFile::new().unwrap();
    let path_to_output = output.path().to_str().unwrap();

    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .overrides_file("tests/files/changes.txt")
        .output(path_to_output)
        .silent()
        .overwrite()
        .build()
        .unwrap();

    prep.run().unwrap();

    let result = read_to_string(path_to_output).unwrap();
    let expected = read_to_string("tests/files/expected_overrides.mdp").unwrap();
    assert_eq!(result, expected);
}

#[test]
fn test_assemble_with_overrides_file_and_mapping() {
    let output = NamedTempFile::new().unwrap();
    let path_to_output = output.path().to_str().unwrap();

    // mapping overrides are applied after the overrides file and win
    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .overrides_file("tests/files/changes.txt")
        .set("nsteps", 100_000)
        .set("ref-t", 310)
        .output(path_to_output)
        .silent()
        .overwrite()
        .build()
        .unwrap();

    prep.run().unwrap();

    let result = read_to_string(path_to_output).unwrap();
    let expected = read_to_string("tests/files/expected_full.mdp").unwrap();
    assert_eq!(result, expected);
}

#[test]
fn test_assemble_missing_base_file() {
    let prep = Prep::new()
        .mdp("tests/files/nonexistent.mdp")
        .output("should_not_be_written.mdp")
        .silent()
        .build()
        .unwrap();

    assert!(prep.assemble().is_err());
}

#[test]
fn test_assemble_missing_overrides_file() {
    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .overrides_file("tests/files/nonexistent.txt")
        .output("should_not_be_written.mdp")
        .silent()
        .build()
        .unwrap();

    assert!(prep.assemble().is_err());
}

#[test]
fn test_assemble_unsupported_override_value() {
    let output = NamedTempFile::new().unwrap();
    let path_to_output = output.path().to_str().unwrap();

    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .set("nsteps", vec![1, 2, 3])
        .output(path_to_output)
        .silent()
        .build()
        .unwrap();

    assert!(prep.assemble().is_err());
}

#[test]
fn test_existing_output_is_backed_up() {
    let directory = TempDir::new().unwrap();
    let path_to_output = directory.path().join("final.mdp");
    copy("tests/files/default.mdp", &path_to_output).unwrap();

    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .overrides_file("tests/files/changes.txt")
        .output(path_to_output.to_str().unwrap())
        .silent()
        .build()
        .unwrap();

    prep.run().unwrap();

    let result = read_to_string(&path_to_output).unwrap();
    let expected = read_to_string("tests/files/expected_overrides.mdp").unwrap();
    assert_eq!(result, expected);

    // the original file was backed up next to the output
    let n_files = std::fs::read_dir(directory.path()).unwrap().count();
    assert_eq!(n_files, 2);
}

#[test]
fn test_existing_output_is_overwritten_on_request() {
    let directory = TempDir::new().unwrap();
    let path_to_output = directory.path().join("final.mdp");
    copy("tests/files/default.mdp", &path_to_output).unwrap();

    let prep = Prep::new()
        .mdp("tests/files/default.mdp")
        .overrides_file("tests/files/changes.txt")
        .output(path_to_output.to_str().unwrap())
        .silent()
        .overwrite()
        .build()
        .unwrap();

    prep.run().unwrap();

    let result = read_to_string(&path_to_output).unwrap();
    let expected = read_to_string("tests/files/expected_overrides.mdp").unwrap();
    assert_eq!(result, expected);

    let n_files = std::fs::read_dir(directory.path()).unwrap().count();
    assert_eq!(n_files, 1);
}

#[test]
fn test_protocol_from_base_file() {
    let mut protocol = GromacsProtocol::from_file("tests/files/default.mdp").unwrap();

    protocol.set_integrator("SD").unwrap();
    protocol.set_dt(0.001).set_nsteps(100).set_nstlog(500);

    let config = protocol.into_config();
    assert_eq!(config.get("integrator"), Some("sd"));
    assert_eq!(config.get("dt"), Some("0.001"));
    assert_eq!(config.get("nsteps"), Some("100"));
    assert_eq!(config.get("nstlog"), Some("500"));

    // untouched parameters keep their original values
    assert_eq!(config.get("cutoff-scheme"), Some("Verlet"));
    assert_eq!(config.get("pcoupl"), Some("no"));
}
