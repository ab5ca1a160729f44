use std::time::Duration;

use clap::Parser;

use raptor_dev::cli::{version_line, CliArgs, Command};
use raptor_dev::exec::duration::{format_elapsed, parse_duration};
use raptor_dev::logging::parse_level_str;

#[test]
fn parses_supported_units() {
    assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_duration("3s"), Ok(Duration::from_secs(3)));
    assert_eq!(parse_duration(" 2m "), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
}

#[test]
fn rejects_malformed_durations() {
    assert!(parse_duration("").is_err());
    assert!(parse_duration("10").is_err());
    assert!(parse_duration("ms").is_err());
    assert!(parse_duration("5 days").is_err());
}

#[test]
fn huge_durations_are_rejected_not_overflowed() {
    assert_eq!(
        parse_duration("9999999999999999999h"),
        Err("duration out of range".to_string())
    );
    assert_eq!(
        parse_duration("9999999999999999999m"),
        Err("duration out of range".to_string())
    );
    assert!(CliArgs::try_parse_from(["raptor", "dev", "--stop-grace", "9999999999999999999h"]).is_err());
}

#[test]
fn elapsed_below_a_second_is_whole_millis() {
    assert_eq!(format_elapsed(Duration::from_millis(0)), "0ms");
    assert_eq!(format_elapsed(Duration::from_micros(999_900)), "999ms");
}

#[test]
fn elapsed_from_a_second_has_three_decimals() {
    assert_eq!(format_elapsed(Duration::from_secs(1)), "1.000s");
    assert_eq!(format_elapsed(Duration::from_millis(2250)), "2.250s");
}

#[test]
fn version_line_names_the_cli() {
    let line = version_line();
    assert!(line.starts_with("Raptor CLI v"), "{line}");
    assert!(line.ends_with(env!("CARGO_PKG_VERSION")));
}

#[test]
fn dev_subcommand_takes_stop_grace() {
    let args = CliArgs::try_parse_from(["raptor", "dev", "--stop-grace", "500ms"]).unwrap();
    match args.command {
        Command::Dev(dev) => assert_eq!(dev.stop_grace, Some(Duration::from_millis(500))),
        other => panic!("expected dev, got {other:?}"),
    }

    let args = CliArgs::try_parse_from(["raptor", "dev"]).unwrap();
    assert!(matches!(args.command, Command::Dev(ref dev) if dev.stop_grace.is_none()));
}

#[test]
fn log_level_is_global() {
    let args = CliArgs::try_parse_from(["raptor", "version", "--log-level", "debug"]).unwrap();
    assert!(matches!(args.command, Command::Version));
    assert!(args.log_level.is_some());

    assert!(CliArgs::try_parse_from(["raptor", "dev", "--stop-grace", "soon"]).is_err());
    assert!(CliArgs::try_parse_from(["raptor"]).is_err());
}

#[test]
fn log_env_levels() {
    assert_eq!(parse_level_str("DEBUG"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_level_str(" warning "), Some(tracing::Level::WARN));
    assert_eq!(parse_level_str("loud"), None);
}
