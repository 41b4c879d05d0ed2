use std::fs;
use std::path::Path;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = pokermind_cli::run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).expect("stdout utf8"),
        String::from_utf8(err).expect("stderr utf8"),
    )
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("session.toml");
    fs::write(
        &path,
        "num_hands = 2\nseed = 7\n\n[[seats]]\nname = \"alice\"\n\n[[seats]]\nname = \"bob\"\n",
    )
    .expect("write config");
    path.to_string_lossy().into_owned()
}

#[test]
fn help_prints_to_stdout_and_exits_zero() {
    let (code, out, _err) = run(&["pokermind", "--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("play"));
    assert!(out.contains("sim"));
    assert!(out.contains("leaderboard"));
}

#[test]
fn unknown_command_exits_with_usage() {
    let (code, _out, err) = run(&["pokermind", "shuffle"]);
    assert_eq!(code, 2);
    assert!(err.contains("Commands:"));
}

#[test]
fn play_prints_each_hand_and_the_final_stacks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());

    let (code, out, _err) = run(&["pokermind", "play", "--config", &config, "--hands", "1"]);
    assert_eq!(code, 0);
    assert!(out.contains("=== Hand 1 ==="));
    assert!(out.contains("alice"));
    assert!(out.contains("bob"));
    assert!(out.contains("Session complete"));
}

#[test]
fn sim_records_into_the_database_for_the_leaderboard() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());
    let db = dir.path().join("results.db").to_string_lossy().into_owned();

    let (code, out, _err) = run(&["pokermind", "sim", "--config", &config, "--db", &db]);
    assert_eq!(code, 0);
    assert!(out.contains("hand(s) played"));

    let (code, out, _err) = run(&["pokermind", "leaderboard", "--db", &db]);
    assert_eq!(code, 0);
    assert!(out.contains("alice"));
    assert!(out.contains("bob"));
    assert!(out.contains("bb/100"));
}

#[test]
fn leaderboard_without_a_database_is_an_error() {
    let (code, _out, err) = run(&["pokermind", "leaderboard"]);
    assert_eq!(code, 2);
    assert!(err.contains("database"));
}
