use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clay_sculptor"))
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .output()
        .expect("failed to start clay_sculptor")
}

#[test]
fn missing_api_key_exits_with_1() {
    let output = run(&["cute robot"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GEMINI_API_KEY"), "{stderr}");
}

#[test]
fn help_and_version_need_no_key() {
    for flag in ["--help", "-h", "--version", "-V"] {
        let output = run(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{flag}");
    }
}

#[test]
fn missing_description_is_a_usage_error() {
    let output = run(&[]);
    assert_ne!(output.status.code(), Some(0));
}
