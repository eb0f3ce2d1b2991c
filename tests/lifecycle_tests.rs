use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const UNIT: u128 = 1_000_000_000_000_000_000;
const ADMIN: &str = "0x00000000000000000000000000000000000000ad";

fn hex_addr(n: u64) -> String {
    format!("0x{:040x}", n)
}

#[test]
fn test_create_deposit_withdraw_flow() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, actor, to, amount, at").unwrap();
    writeln!(file, "fund, {}, , {}, 0", hex_addr(1), 10 * UNIT).unwrap();
    writeln!(file, "create, {}, , {}, 1", hex_addr(1), 5 * UNIT).unwrap();
    writeln!(file, "deposit, {}, , {}, 2", hex_addr(1), 3 * UNIT).unwrap();
    writeln!(file, "withdraw, {}, , {}, 3", hex_addr(1), 2 * UNIT).unwrap();

    let mut cmd = Command::new(cargo_bin!("custodia"));
    cmd.arg(file.path());

    // 5 + 3 - 2 = 6 tokens.
    cmd.assert().success().stdout(predicate::str::contains(format!(
        "{},{},true",
        hex_addr(1),
        6 * UNIT
    )));
}

#[test]
fn test_freeze_blocks_deposit_until_reactivation() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, actor, to, amount, at").unwrap();
    writeln!(file, "fund, {}, , {}, 0", hex_addr(1), 10 * UNIT).unwrap();
    writeln!(file, "create, {}, , {}, 1", hex_addr(1), 5 * UNIT).unwrap();
    writeln!(file, "freeze, {}, {}, , 2", ADMIN, hex_addr(1)).unwrap();
    // Rejected while frozen.
    writeln!(file, "deposit, {}, , {}, 3", hex_addr(1), 2 * UNIT).unwrap();
    // Owner pays the activation fee, then the deposit goes through.
    writeln!(file, "activate, {}, , {}, 4", hex_addr(1), UNIT).unwrap();
    writeln!(file, "deposit, {}, , {}, 5", hex_addr(1), 2 * UNIT).unwrap();

    let mut cmd = Command::new(cargo_bin!("custodia"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("account is not active"))
        .stdout(predicate::str::contains(format!(
            "{},{},true",
            hex_addr(1),
            7 * UNIT
        )));
}

#[test]
fn test_freeze_requires_admin_actor() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, actor, to, amount, at").unwrap();
    writeln!(file, "fund, {}, , {}, 0", hex_addr(1), 5 * UNIT).unwrap();
    writeln!(file, "create, {}, , {}, 1", hex_addr(1), 5 * UNIT).unwrap();
    writeln!(file, "freeze, {}, {}, , 2", hex_addr(7), hex_addr(1)).unwrap();

    let mut cmd = Command::new(cargo_bin!("custodia"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("admin capability"))
        .stdout(predicate::str::contains(format!(
            "{},{},true",
            hex_addr(1),
            5 * UNIT
        )));
}

#[test]
fn test_borrow_and_same_day_payback() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, actor, to, amount, at").unwrap();
    writeln!(file, "fund, {}, , {}, 0", hex_addr(1), 200 * UNIT).unwrap();
    writeln!(file, "create, {}, , {}, 0", hex_addr(1), 200 * UNIT).unwrap();
    writeln!(file, "borrow, {}, , {}, 10", hex_addr(1), 5 * UNIT).unwrap();
    // Zero elapsed time means zero interest: principal settles exactly.
    writeln!(file, "pay_back, {}, , {}, 10", hex_addr(1), 5 * UNIT).unwrap();

    let mut cmd = Command::new(cargo_bin!("custodia"));
    cmd.arg(file.path());

    // The ledger entry never moved; the loan went out and came back.
    cmd.assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains(format!(
            "{},{},true",
            hex_addr(1),
            200 * UNIT
        )));
}

#[test]
fn test_borrow_over_ceiling_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, actor, to, amount, at").unwrap();
    writeln!(file, "fund, {}, , {}, 0", hex_addr(1), 200 * UNIT).unwrap();
    writeln!(file, "create, {}, , {}, 0", hex_addr(1), 200 * UNIT).unwrap();
    writeln!(file, "borrow, {}, , {}, 1", hex_addr(1), 90 * UNIT).unwrap();
    writeln!(file, "borrow, {}, , {}, 2", hex_addr(1), 20 * UNIT).unwrap();

    let mut cmd = Command::new(cargo_bin!("custodia"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("borrow ceiling reached"));
}
