//! End-to-end parsing behavior through the public API.

use flagkit::{CoerceError, Flags, FromArg, ParseError};

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Parse one ordering of the same three distinct arguments.
fn parse_mixed(args: Vec<String>) -> (i64, bool, String) {
    let mut flags = Flags::with_args("prog", args);
    let alpha = flags.option_required::<i64>("alpha", Some('a'), "a number", None);
    let beta = flags.flag("beta", Some('b'), "a switch");
    let gamma = flags.positional::<String>("gamma");
    let mut matches = flags.parse().expect("every ordering must parse");
    (matches.take(alpha), matches.take(beta), matches.take(gamma))
}

#[test]
fn token_order_does_not_change_the_result() {
    let tokens = ["--alpha=7", "--beta", "payload"];
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for order in orders {
        let args = argv(&[tokens[order[0]], tokens[order[1]], tokens[order[2]]]);
        assert_eq!(parse_mixed(args), (7, true, "payload".to_string()));
    }
}

#[test]
fn default_is_returned_without_coercion() {
    // A type whose coercion always fails: the only way a value can come out
    // of resolution is the registered default, untouched.
    struct Sentinel(u32);

    impl FromArg for Sentinel {
        fn from_arg(_raw: &str) -> Result<Self, CoerceError> {
            Err(CoerceError::Empty)
        }
    }

    let mut flags = Flags::with_args("prog", argv(&[]));
    let marker = flags.option_required::<Sentinel>("marker", None, "sentinel", Some(Sentinel(7)));
    let mut matches = flags.parse().unwrap();
    assert_eq!(matches.take(marker).0, 7);
}

#[test]
fn port_default_applies_when_flag_is_absent() {
    let mut flags = Flags::with_args("prog", argv(&[]));
    let port = flags.option_required::<u16>("port", Some('p'), "listen port", Some(8080));
    let mut matches = flags.parse().unwrap();
    assert_eq!(matches.take(port), 8080);
}

#[test]
fn explicit_value_beats_the_default() {
    let mut flags = Flags::with_args("prog", argv(&["--port", "9000"]));
    let port = flags.option_required::<u16>("port", Some('p'), "listen port", Some(8080));
    let mut matches = flags.parse().unwrap();
    assert_eq!(matches.take(port), 9000);
}

#[test]
fn required_option_without_value_or_default_fails() {
    let mut flags = Flags::with_args("prog", argv(&[]));
    let _port = flags.option_required::<u16>("port", Some('p'), "listen port", None);
    let err = flags.parse().err().expect("missing required option");
    match err {
        ParseError::RequiredFlagNotGiven(msg) => assert!(msg.contains("--port")),
        other => panic!("expected RequiredFlagNotGiven, got: {other:?}"),
    }
}

#[test]
fn invalid_input_names_the_flag_and_the_text() {
    let mut flags = Flags::with_args("prog", argv(&["--port=abc"]));
    let _port = flags.option_required::<u16>("port", Some('p'), "listen port", Some(8080));
    let err = flags.parse().err().expect("non-numeric port");
    match err {
        ParseError::InvalidInput(msg) => {
            assert!(msg.contains("port"));
            assert!(msg.contains("abc"));
        }
        other => panic!("expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn combined_short_switches_set_every_match() {
    let mut flags = Flags::with_args("prog", argv(&["-abc"]));
    let a = flags.flag("apple", Some('a'), "");
    let b = flags.flag("banana", Some('b'), "");
    let c = flags.flag("cherry", Some('c'), "");
    let mut matches = flags.parse().unwrap();
    assert!(matches.take(a));
    assert!(matches.take(b));
    assert!(matches.take(c));
}

#[test]
fn positionals_fill_in_registration_order() {
    let mut flags = Flags::with_args("prog", argv(&["file1.txt", "file2.txt"]));
    let src = flags.positional::<String>("src");
    let dst = flags.positional::<String>("dst");
    let mut matches = flags.parse().unwrap();
    assert_eq!(matches.take(src), "file1.txt");
    assert_eq!(matches.take(dst), "file2.txt");
}

#[test]
fn missing_positional_names_its_label() {
    let mut flags = Flags::with_args("prog", argv(&["file1.txt"]));
    let _src = flags.positional::<String>("src");
    let _dst = flags.positional::<String>("dst");
    let err = flags.parse().err().expect("dst has no token");
    match err {
        ParseError::RequiredFlagNotGiven(msg) => assert!(msg.contains("{dst}")),
        other => panic!("expected RequiredFlagNotGiven, got: {other:?}"),
    }
}

#[test]
fn positional_coercion_failure_is_invalid_input() {
    let mut flags = Flags::with_args("prog", argv(&["not-a-number"]));
    let _count = flags.positional::<u32>("count");
    let err = flags.parse().err().expect("non-numeric positional");
    match err {
        ParseError::InvalidInput(msg) => {
            assert!(msg.contains("{count}"));
            assert!(msg.contains("not-a-number"));
        }
        other => panic!("expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn usage_line_renders_exactly() {
    let mut flags = Flags::with_args("prog", argv(&[]));
    let _src = flags.positional::<String>("src");
    let _dst = flags.positional::<String>("dst");
    assert_eq!(flags.usage_line(), "Usage: prog [options...] {src} {dst}");
}

#[test]
fn options_and_switches_and_positionals_mix() {
    let mut flags = Flags::with_args(
        "prog",
        argv(&["-m", "--fps", "24", "intro.mp4", "--volume=0.5", "out.txt"]),
    );
    let fps = flags.option_required::<u32>("fps", Some('f'), "playback rate", Some(30));
    let volume = flags.option::<f64>("volume", None, "playback volume");
    let mute = flags.flag("mute", Some('m'), "disable audio");
    let input = flags.positional::<String>("input");
    let output = flags.positional::<String>("output");

    let mut matches = flags.parse().unwrap();
    assert_eq!(matches.take(fps), 24);
    assert_eq!(matches.take(volume), Some(0.5));
    assert!(matches.take(mute));
    assert_eq!(matches.take(input), "intro.mp4");
    assert_eq!(matches.take(output), "out.txt");
    assert!(matches.rest().is_empty());
}
