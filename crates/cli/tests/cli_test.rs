//! End-to-end tests of argument resolution, output files and exit statuses.

use clap::Parser;
use cli::{Cli, EXIT_EMPTY_TRAINING, EXIT_IO, EXIT_PARSE, EXIT_USAGE, Mode, exit_status, run};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TRAIN: &str = "u1,1,4.0\nu1,2,2.0\nu2,1,3.0\n";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("item-mean").chain(args.iter().copied())).unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_pair_mode_resolution() {
    let cli = parse(&["train.csv", "test.csv"]);
    assert_eq!(
        Mode::from_cli(&cli).unwrap(),
        Mode::Pairs {
            train: "train.csv".into(),
            test: "test.csv".into(),
            output: None,
        }
    );

    let cli = parse(&["train.csv", "test.csv", "out.csv"]);
    assert!(matches!(
        Mode::from_cli(&cli).unwrap(),
        Mode::Pairs { output: Some(_), .. }
    ));
}

#[test]
fn test_for_users_mode_resolution() {
    let cli = parse(&["--for-users", "users.txt", "train.csv"]);
    assert_eq!(
        Mode::from_cli(&cli).unwrap(),
        Mode::ForUsers {
            users: "users.txt".into(),
            train: "train.csv".into(),
        }
    );
}

#[test]
fn test_wrong_argument_counts() {
    for args in [
        &["train.csv"][..],
        &["a", "b", "c", "d"][..],
        &["--for-users", "users.txt", "train.csv", "out.csv"][..],
    ] {
        let cli = parse(args);
        assert!(Mode::from_cli(&cli).is_err());

        let err = run(&cli).unwrap_err();
        assert_eq!(exit_status(&err), EXIT_USAGE);
    }
}

#[test]
fn test_missing_files_rejected_by_clap() {
    assert!(Cli::try_parse_from(["item-mean"]).is_err());
}

#[test]
fn test_pair_mode_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u2,2\nu1,1\nu2,3\n");
    let out = dir.path().join("out.csv");

    run(&parse(&[arg(&train), arg(&test), arg(&out)])).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "u1,1,3.500\nu2,2,2.000\nu2,3,3.000\n"
    );
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", "a,3,1\nb,1,5\nc,2,2.5\nd,3,4\n");
    let test = write(&dir, "test.csv", "d,1\nc,3\nb,2\na,9\n");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    run(&parse(&[arg(&train), arg(&test), arg(&first)])).unwrap();
    run(&parse(&[arg(&train), arg(&test), arg(&second)])).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_damping_flag() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u1,1\n");
    let out = dir.path().join("out.csv");

    run(&parse(&["--damping", "2", arg(&train), arg(&test), arg(&out)])).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "u1,1,3.250\n");
}

#[test]
fn test_negative_damping_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u1,1\n");

    let err = run(&parse(&["--damping=-1", arg(&train), arg(&test)])).unwrap_err();
    assert_eq!(exit_status(&err), EXIT_USAGE);

    let cli = parse(&["--damping", "-1", arg(&train), arg(&test)]);
    assert_eq!(cli.damping, -1.0);
    let err = run(&cli).unwrap_err();
    assert_eq!(exit_status(&err), EXIT_USAGE);
}

#[test]
fn test_malformed_training_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", "u1,1,4.0\nu1,2,four\n");
    let test = write(&dir, "test.csv", "u1,1\n");
    let out = dir.path().join("out.csv");

    let err = run(&parse(&[arg(&train), arg(&test), arg(&out)])).unwrap_err();

    assert_eq!(exit_status(&err), EXIT_PARSE);
    assert!(!out.exists());
}

#[test]
fn test_malformed_test_pairs_leave_no_output() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u1,1\nu2\n");
    let out = dir.path().join("out.csv");

    let err = run(&parse(&[arg(&train), arg(&test), arg(&out)])).unwrap_err();

    assert_eq!(exit_status(&err), EXIT_PARSE);
    assert!(!out.exists());
}

#[test]
fn test_empty_training_file() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", "");
    let test = write(&dir, "test.csv", "u1,1\n");
    let out = dir.path().join("out.csv");

    let err = run(&parse(&[arg(&train), arg(&test), arg(&out)])).unwrap_err();

    assert_eq!(exit_status(&err), EXIT_EMPTY_TRAINING);
    assert!(!out.exists());
}

#[test]
fn test_missing_input_files() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let missing = dir.path().join("missing.csv");

    let err = run(&parse(&[arg(&missing), arg(&train)])).unwrap_err();
    assert_eq!(exit_status(&err), EXIT_IO);

    let err = run(&parse(&["--for-users", arg(&missing), arg(&train)])).unwrap_err();
    assert_eq!(exit_status(&err), EXIT_IO);
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u1,1\n");
    let out = dir.path().join("no-such-dir").join("out.csv");

    let err = run(&parse(&[arg(&train), arg(&test), arg(&out)])).unwrap_err();
    assert_eq!(exit_status(&err), EXIT_IO);
}

#[test]
fn test_existing_output_survives_failed_create() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u1,1\n");
    let out = write(&dir, "precious.csv", "keep me\n");
    let mut perms = fs::metadata(&out).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&out, perms).unwrap();

    let result = run(&parse(&[arg(&train), arg(&test), arg(&out)]));

    // Privileged users can still open read-only files, in which case the
    // run succeeds and overwrites it.
    assert!(out.exists());
    if let Err(err) = result {
        assert_eq!(exit_status(&err), EXIT_IO);
        assert_eq!(fs::read_to_string(&out).unwrap(), "keep me\n");
    }
}

#[test]
fn test_output_path_is_directory() {
    let dir = TempDir::new().unwrap();
    let train = write(&dir, "train.csv", TRAIN);
    let test = write(&dir, "test.csv", "u1,1\n");
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let err = run(&parse(&[arg(&train), arg(&test), arg(&out)])).unwrap_err();

    assert_eq!(exit_status(&err), EXIT_IO);
    assert!(out.is_dir());
}
