use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["parley"]);
    assert!(args.command.is_none());
    assert!(args.endpoint.is_none());
    assert!(args.trace_file.is_none());
}

#[test]
fn global_flags_parse_before_and_after_subcommand() {
    for argv in [
        &["parley", "--endpoint", "http://h:1/chat", "chat"][..],
        &["parley", "chat", "-e", "http://h:1/chat"][..],
    ] {
        let args = parse_args(argv);
        assert!(matches!(args.command, Some(Commands::Chat)));
        assert_eq!(args.endpoint.as_deref(), Some("http://h:1/chat"));
    }

    let args = parse_args(&["parley", "--trace-file", "/tmp/parley.log"]);
    assert_eq!(
        args.trace_file.as_deref(),
        Some(std::path::Path::new("/tmp/parley.log"))
    );
}

#[test]
fn set_joins_multi_word_values() {
    let args = parse_args(&["parley", "set", "title", "Course", "Q&A"]);
    let Some(Commands::Set { key, value }) = args.command else {
        panic!("expected set command");
    };

    let mut config = Config::default();
    let message = apply_set(&mut config, &key, &value).expect("set should succeed");
    assert_eq!(message, "Set title to: Course Q&A");
    assert_eq!(config.title(), "Course Q&A");
}

#[test]
fn set_requires_a_value() {
    assert!(Args::try_parse_from(["parley", "set", "title"]).is_err());

    let mut config = Config::default();
    assert!(apply_set(&mut config, "title", &["  ".to_string()]).is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn set_rejects_unknown_keys_and_bad_values() {
    let mut config = Config::default();
    let err = apply_set(&mut config, "model", &["x".to_string()]).expect_err("unknown key");
    assert!(err.to_string().contains("Unknown config key"));

    let err = apply_set(&mut config, "theme", &["neon".to_string()]).expect_err("bad theme");
    assert!(err.to_string().contains("Unknown theme"));

    assert!(apply_set(&mut config, "base-url", &["not a url".to_string()]).is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn unset_clears_value() {
    let mut config = Config::default();
    apply_set(&mut config, "chat-path", &["ask".to_string()]).expect("set");
    assert_eq!(config.configured_endpoint(), "http://localhost:8080/ask");

    let message = apply_unset(&mut config, "chat-path").expect("unset");
    assert_eq!(message, "Unset chat-path");
    assert_eq!(config, Config::default());
}
