use pretty_assertions::assert_eq;
use tarn_settings::{SettingError, SettingValue};

use super::*;
use crate::jump_list::JumpLocation;
use crate::test_support::Fixture;

fn run(data: &SessionData, line: &str) -> Result<()> {
	Interpreter::new(data).run(line)
}

#[test]
fn blank_and_comment_lines_do_nothing() {
	let f = Fixture::new();
	let data = f.data();
	for line in ["", "   ", ":", "\" set ts=2", "  \"comment"] {
		assert_eq!(run(&data, line), Ok(()), "{line:?}");
	}
	assert_eq!(data.local_settings().tab_stop(), 8);
}

#[test]
fn command_names_accept_abbreviations() {
	assert_eq!(lookup("se"), Some(Command::Set(SetScope::All)));
	assert_eq!(lookup("set"), Some(Command::Set(SetScope::All)));
	assert_eq!(lookup("setl"), Some(Command::Set(SetScope::Local)));
	assert_eq!(lookup("setg"), Some(Command::Set(SetScope::Global)));
	assert_eq!(lookup("u"), Some(Command::Undo));
	assert_eq!(lookup("red"), Some(Command::Redo));
	assert_eq!(lookup("his"), Some(Command::History));
	assert_eq!(lookup("cle"), Some(Command::ClearJumps));
	assert_eq!(lookup("s"), None);
	assert_eq!(lookup("re"), None);
	assert_eq!(lookup("settings"), None);
}

#[test]
fn unknown_command() {
	let f = Fixture::new();
	let data = f.data();
	assert_eq!(
		run(&data, ":frobnicate 3"),
		Err(CommandError::NotAnEditorCommand("frobnicate 3".to_string()))
	);
	assert_eq!(
		run(&data, "set!"),
		Err(CommandError::NotAnEditorCommand("set!".to_string()))
	);
}

#[test]
fn set_resolves_across_scopes() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set ts=4 nowrap ic scr=5").expect("set");
	assert_eq!(data.local_settings().tab_stop(), 4);
	assert!(!data.window_settings().wrap());
	assert!(data.global_settings().ignore_case());
	assert_eq!(data.window_settings().scroll(), 5);
}

#[test]
fn toggle_forms() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set et").expect("set");
	assert!(data.local_settings().expand_tab());
	run(&data, "set invet").expect("set");
	assert!(!data.local_settings().expand_tab());
	run(&data, "set et!").expect("set");
	assert!(data.local_settings().expand_tab());
	run(&data, "set et&").expect("set");
	assert!(!data.local_settings().expand_tab());
	run(&data, "set expandtab=on").expect("set");
	assert!(data.local_settings().expand_tab());
}

#[test]
fn numeric_operators() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set sw=4").expect("set");
	run(&data, "set sw+=2").expect("set");
	assert_eq!(data.local_settings().shift_width(), 6);
	run(&data, "set sw-=1").expect("set");
	assert_eq!(data.local_settings().shift_width(), 5);
	run(&data, "set sw^=3").expect("set");
	assert_eq!(data.local_settings().shift_width(), 15);
	run(&data, "set ts=0x10").expect("set");
	assert_eq!(data.local_settings().tab_stop(), 16);
}

#[test]
fn string_list_operators() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set cb=unnamed").expect("set");
	run(&data, "set cb+=autoselect").expect("set");
	assert_eq!(data.global_settings().clipboard(), "unnamed,autoselect");
	run(&data, "set cb-=unnamed").expect("set");
	assert_eq!(data.global_settings().clipboard(), "autoselect");
	run(&data, "set cb^=unnamed").expect("set");
	assert_eq!(data.global_settings().clipboard(), "unnamed,autoselect");
}

#[test]
fn query_and_show_report_values() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set ts?").expect("set");
	run(&data, "set sw").expect("set");
	run(&data, "set wrap?").expect("set");
	run(&data, "set nowrap").expect("set");
	run(&data, "set wrap?").expect("set");
	assert_eq!(f.host.statuses(), ["tabstop=8", "shiftwidth=8", "wrap", "nowrap"]);
}

#[test]
fn bare_set_lists_changed_settings() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set ts=2 nocul").expect("set");
	run(&data, "set hls").expect("set");
	run(&data, "set").expect("set");
	assert_eq!(f.host.last_status().as_deref(), Some("tabstop=2  hlsearch"));
}

#[test]
fn scoped_set_commands() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "setlocal ts=3 wrap").expect("setlocal");
	assert_eq!(data.local_settings().tab_stop(), 3);

	let err = run(&data, "setlocal ic").expect_err("global via setlocal");
	assert!(matches!(err, CommandError::Setting(SettingError::UnknownSetting { .. })));

	let err = run(&data, "setglobal ts=4").expect_err("local via setglobal");
	assert!(matches!(err, CommandError::Setting(SettingError::UnknownSetting { .. })));
	assert_eq!(data.local_settings().tab_stop(), 3);

	run(&data, "setg hi=10").expect("setglobal");
	assert_eq!(data.global_settings().history(), 10);
}

#[test]
fn unknown_option_suggests_a_name() {
	let f = Fixture::new();
	let data = f.data();
	let err = run(&data, "set tabstp=4").expect_err("typo");
	assert_eq!(
		err,
		CommandError::Setting(SettingError::UnknownSetting {
			name: "tabstp".to_string(),
			suggestion: Some("tabstop"),
		})
	);
	assert_eq!(err.to_string(), "unknown option: tabstp (did you mean 'tabstop'?)");
}

#[test]
fn invalid_values_leave_settings_alone() {
	let f = Fixture::new();
	let data = f.data();
	assert!(matches!(
		run(&data, "set ts=wide"),
		Err(CommandError::Setting(SettingError::InvalidArgument { name: "tabstop", .. }))
	));
	assert_eq!(
		run(&data, "set nots"),
		Err(CommandError::InvalidArgument("nots".to_string()))
	);
	assert_eq!(
		run(&data, "set wrap+=1"),
		Err(CommandError::InvalidArgument("wrap+=1".to_string()))
	);
	assert_eq!(
		run(&data, "set ts!"),
		Err(CommandError::InvalidArgument("ts!".to_string()))
	);
	assert_eq!(data.local_settings().tab_stop(), 8);
}

#[test]
fn arguments_apply_until_the_first_failure() {
	let f = Fixture::new();
	let data = f.data();
	assert!(run(&data, "set ts=2 bogus sw=2").is_err());
	assert_eq!(data.local_settings().tab_stop(), 2);
	assert_eq!(data.local_settings().shift_width(), 8);
}

#[test]
fn reset_all_restores_defaults() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "set ts=2 nowrap").expect("set");
	run(&data, "setlocal all&").expect("reset");
	assert_eq!(data.local_settings().tab_stop(), 8);
	assert!(data.window_settings().wrap());
}

#[test]
fn escaped_blanks_stay_in_values() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, r"set sh=/opt/my\ shell").expect("set");
	assert_eq!(data.global_settings().shell(), "/opt/my shell");
	assert_eq!(
		data.global_settings().get("shell").map(|s| s.value),
		Some(SettingValue::Text("/opt/my shell".to_string()))
	);
}

#[test]
fn history_command_lists_entries() {
	let f = Fixture::new();
	let data = f.data();
	f.histories.command.borrow_mut().add("set ts=2");
	f.histories.search.borrow_mut().add("needle");
	run(&data, "his").expect("history");
	assert_eq!(f.host.last_status().as_deref(), Some("      #  cmd history\n      1  set ts=2"));
	run(&data, "history /").expect("history");
	assert_eq!(
		f.host.last_status().as_deref(),
		Some("      #  search history\n      1  needle")
	);
	assert_eq!(
		run(&data, "history x"),
		Err(CommandError::InvalidArgument("x".to_string()))
	);
}

#[test]
fn jump_commands() {
	let f = Fixture::new();
	let data = f.data();
	data.jump_list().borrow_mut().push(JumpLocation::new(10, 2));
	data.jump_list().borrow_mut().push(JumpLocation::new(20, 0));
	run(&data, "ju").expect("jumps");
	assert_eq!(
		f.host.last_status().as_deref(),
		Some(" jump line  col\n    2    10    2\n    1    20    0\n>")
	);
	assert_eq!(
		run(&data, "clearjumps now"),
		Err(CommandError::TrailingCharacters("now".to_string()))
	);
	run(&data, "cle").expect("clearjumps");
	assert!(data.jump_list().borrow().is_empty());
}

#[test]
fn undo_commands_without_history_report() {
	let f = Fixture::new();
	let data = f.data();
	run(&data, "undo").expect("undo");
	run(&data, "redo 2").expect("redo");
	assert_eq!(f.host.statuses(), ["Already at oldest change", "Already at newest change"]);
	assert_eq!(
		run(&data, "u x"),
		Err(CommandError::TrailingCharacters("x".to_string()))
	);
}
