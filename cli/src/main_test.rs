#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parses_replay_with_overrides() {
    let cli = Cli::try_parse_from(["pinchzoom", "replay", "pinch.json", "--max-zoom", "6", "--lock-drag-axis", "true"]);
    let Ok(Cli { command: Command::Replay(command) }) = cli else {
        panic!("replay command should parse");
    };
    assert_eq!(command.script, PathBuf::from("pinch.json"));
    assert!(command.options.is_none());
    assert_eq!(command.overrides.max_zoom, Some(6.0));
    assert_eq!(command.overrides.lock_drag_axis, Some(true));
}

#[test]
fn parses_check_options() {
    let cli = Cli::try_parse_from(["pinchzoom", "check-options", "opts.json"]);
    assert!(matches!(cli, Ok(Cli { command: Command::CheckOptions { .. } })));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["pinchzoom"]).is_err());
}

#[test]
fn overrides_replace_only_given_fields() {
    let overrides = OptionOverrides { max_zoom: Some(8.0), tap_zoom_factor: Some(3.0), ..OptionOverrides::default() };
    let mut options = Options::default();
    overrides.apply(&mut options);
    assert_eq!(options.max_zoom, 8.0);
    assert_eq!(options.tap_zoom_factor, 3.0);
    assert_eq!(options.min_zoom, Options::default().min_zoom);
    assert!(!options.lock_drag_axis);
}

#[test]
fn read_reports_missing_path() {
    let err = read(Path::new("does/not/exist.json"));
    assert!(matches!(err, Err(CliError::Read { .. })));
}
