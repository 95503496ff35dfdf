use assert_cmd::Command;
use predicates::prelude::predicate;

fn run(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("qbaf-relations").unwrap();
    cmd.arg("disjoint").args(args).assert()
}

#[test]
fn test_disjoint() {
    run(&["-r", "a,b", "-r", "a,c", "-o", "b,a", "-o", "c,b"])
        .success()
        .stdout(predicate::eq("YES\n"));
}

#[test]
fn test_not_disjoint() {
    run(&["-r", "a,b", "-r", "a,c", "-o", "c,b", "-o", "a,c"])
        .success()
        .stdout(predicate::eq("NO\n"));
}

#[test]
fn test_empty_indices_are_disjoint() {
    run(&["-r", "a,b"]).success().stdout(predicate::eq("YES\n"));
    run(&[]).success().stdout(predicate::eq("YES\n"));
}

#[test]
fn test_malformed_other_relation() {
    run(&["-r", "a,b", "-o", "a"]).failure();
}
