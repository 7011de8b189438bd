//! CLI integration tests for the `gw` binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A temp table with one default actor, `wren`.
fn table() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let actors = dir.path().join("actors.json");
    gw(&actors).args(["new", "wren", "Wren"]).assert().success();
    (dir, actors)
}

fn gw(actors: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gw").unwrap();
    cmd.arg("--actors").arg(actors).args(["--seed", "7"]);
    cmd
}

fn sheet(actors: &Path) -> serde_json::Value {
    let text = fs::read_to_string(actors).unwrap();
    let all: serde_json::Value = serde_json::from_str(&text).unwrap();
    all["wren"].clone()
}

// ---------------------------------------------------------------------------
// new / show
// ---------------------------------------------------------------------------

#[test]
fn new_writes_a_default_sheet() {
    let (_dir, actors) = table();
    let wren = sheet(&actors);
    assert_eq!(wren["name"], "Wren");
    assert_eq!(wren["arcane"]["current"], 5);
    assert_eq!(wren["DDie"], 1);
    assert_eq!(wren["powerDie"], "d6");
}

#[test]
fn new_refuses_duplicates() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["new", "wren", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn show_lists_pools() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["show", "wren"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren"))
        .stdout(predicate::str::contains("5/5"));
}

#[test]
fn show_unknown_actor_fails() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown actor: ghost"));
}

// ---------------------------------------------------------------------------
// check / cast / damage
// ---------------------------------------------------------------------------

#[test]
fn check_logs_against_the_highest_target() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["check", "wren", "--target", "7", "--target", "9", "--target", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren - Attack: 1d12"))
        .stdout(predicate::str::contains("vs 9 =>"));
}

#[test]
fn check_without_targets_uses_the_default_difficulty() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["check", "wren", "--kind", "weapon", "--pool", "physical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weapon Attack"))
        .stdout(predicate::str::contains("vs 8 =>"));
}

#[test]
fn check_with_a_depleted_pool_rolls_two_dice() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["pool", "wren", "mental", "adjust", "-5"])
        .assert()
        .success();
    gw(&actors)
        .args(["check", "wren", "--pool", "arcane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2d12kl"));
}

#[test]
fn modifier_adds_boons_and_banes() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["check", "wren", "--modifier", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3d12kh"));
    gw(&actors)
        .args(["check", "wren", "-m", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2d12kl"));
}

#[test]
fn modifier_out_of_range_is_rejected() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["check", "wren", "--modifier", "2000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2000000000"));
    gw(&actors)
        .args(["check", "wren", "-m", "-13"])
        .assert()
        .failure();
}

#[test]
fn spell_costing_more_than_the_pool_is_refused() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["check", "wren", "--kind", "cast", "--pool", "arcane", "--cost", "6"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cannot Proceed"))
        .stderr(predicate::str::contains(
            "not enough arcane points: costs 6, 5 available",
        ));
    assert_eq!(sheet(&actors)["arcane"]["current"], 5);
}

#[test]
fn check_rejects_item_kinds() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["check", "wren", "--kind", "castWand"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown check kind"));
}

#[test]
fn wand_pays_arcane_and_rolls_damage() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["cast", "wren", "--kind", "wand", "--cost", "2", "--formula", "1d4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren - Wand Damage: 1d4:"));
    assert_eq!(sheet(&actors)["arcane"]["current"], 3);
}

#[test]
fn scroll_with_a_bad_formula_costs_nothing() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["cast", "wren", "--kind", "scroll", "--cost", "2", "--formula", "2x6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid formula"));
    assert_eq!(sheet(&actors)["arcane"]["current"], 5);
}

#[test]
fn damage_composes_power_and_critical_dice() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["damage", "wren", "1d8+2", "--extra", "--critical"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren - Damage: 1d8+2+1d8+2+2d6:"));
}

#[test]
fn damage_with_a_malformed_formula_fails() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["damage", "wren", "1d6+"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid formula"));
}

// ---------------------------------------------------------------------------
// initiative / power / destiny
// ---------------------------------------------------------------------------

#[test]
fn initiative_is_logged() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["init", "wren"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren - Initiative:"));
}

#[test]
fn power_die_is_logged() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["power", "wren"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wren - Power Die Roll: 1d6 ="));
}

#[test]
fn destiny_die_spends_the_last_one() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["destiny", "wren", "roll"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 left)"));
    gw(&actors)
        .args(["destiny", "wren", "roll"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no destiny dice remaining"));
}

#[test]
fn destiny_add_save_and_reset() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["destiny", "wren", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now has 2 destiny dice"));
    gw(&actors).args(["destiny", "wren", "save"]).assert().success();
    gw(&actors).args(["destiny", "wren", "remove"]).assert().success();
    gw(&actors).args(["destiny", "wren", "remove"]).assert().success();
    assert_eq!(sheet(&actors)["DDie"], 0);
    gw(&actors)
        .args(["destiny", "wren", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to 2 destiny dice"));
    assert_eq!(sheet(&actors)["startingDDie"], 2);
}

// ---------------------------------------------------------------------------
// pool / shapeshift
// ---------------------------------------------------------------------------

#[test]
fn pool_adjust_and_reset() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["pool", "wren", "physical", "adjust", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wren physical: 2"));
    gw(&actors)
        .args(["pool", "wren", "physical", "adjust", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wren physical: 5"));
    gw(&actors)
        .args(["pool", "wren", "physical", "adjust", "-1"])
        .assert()
        .success();
    gw(&actors)
        .args(["pool", "wren", "physical", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wren physical: 5"));
}

#[test]
fn unknown_pool_fails() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["pool", "wren", "spirit", "reset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown pool 'spirit'"));
}

#[test]
fn shapeshift_toggles_physical() {
    let (_dir, actors) = table();
    gw(&actors)
        .args(["shapeshift", "wren"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shapeshifts"));
    let wren = sheet(&actors);
    assert_eq!(wren["shapeshift"], true);
    assert_eq!(wren["physical"]["base"], 7);

    gw(&actors)
        .args(["shapeshift", "wren"])
        .assert()
        .success()
        .stdout(predicate::str::contains("returns to normal form"));
    assert_eq!(sheet(&actors)["physical"]["base"], 5);
}

// ---------------------------------------------------------------------------
// config / journal
// ---------------------------------------------------------------------------

#[test]
fn config_file_sets_the_default_difficulty() {
    let (dir, actors) = table();
    let config = dir.path().join("gw.json");
    fs::write(&config, r#"{ "default_difficulty": 5 }"#).unwrap();
    gw(&actors)
        .arg("--config")
        .arg(&config)
        .args(["check", "wren"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vs 5 =>"));
}

#[test]
fn journal_file_collects_markdown() {
    let (dir, actors) = table();
    let journal = dir.path().join("journal.md");
    gw(&actors)
        .arg("--journal")
        .arg(&journal)
        .args(["init", "wren"])
        .assert()
        .success();
    let text = fs::read_to_string(&journal).unwrap();
    assert!(text.starts_with("# Activity Log"));
    assert!(text.contains("Wren - Initiative:"));
}
