use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tarn_primitives::{BufferId, KeyInput, ModeKind, ViewId, parse_key_notation};
use tarn_settings::SettingValue;

use super::*;
use crate::test_support::{FakeBuffer, FakeFileSystem, FakeHost, FakeView, init_tracing};

struct Setup {
	host: Rc<FakeHost>,
	fs: Rc<FakeFileSystem>,
	engine: Rc<Engine>,
}

fn setup(fs: FakeFileSystem) -> Setup {
	init_tracing();
	let host = Rc::new(FakeHost::new());
	let fs = Rc::new(fs);
	let engine = Engine::new(host.clone(), fs.clone());
	Setup { host, fs, engine }
}

fn plain() -> Setup {
	setup(FakeFileSystem::empty(&[]))
}

fn view(id: u64, buffer: u64) -> Rc<FakeView> {
	FakeView::new(id, FakeBuffer::new(buffer))
}

fn feed(engine: &Engine, session: &Rc<Session>, keys: &str) {
	engine.process_keys(session, parse_key_notation(keys));
}

#[test]
fn history_setting_updates_both_histories() {
	let s = plain();
	assert_eq!(s.engine.histories().command.borrow().limit(), 50);
	s.engine.global_settings().try_set("history", SettingValue::Number(3));
	assert_eq!(s.engine.histories().command.borrow().limit(), 3);
	assert_eq!(s.engine.histories().search.borrow().limit(), 3);

	s.engine.global_settings().try_set("hi", SettingValue::Number(-1));
	assert_eq!(s.engine.histories().search.borrow().limit(), 0);
}

#[test]
fn wrappers_are_cached_per_buffer() {
	let s = plain();
	let buffer = FakeBuffer::new(1);
	let first = s.engine.get_or_create_wrapper(buffer.clone());
	let second = s.engine.get_or_create_wrapper(buffer);
	assert!(Rc::ptr_eq(&first, &second));
	assert!(s.engine.get_wrapper(BufferId(2)).is_none());
}

#[test]
fn sessions_are_created_once_per_view() {
	let s = plain();
	let v = view(1, 1);
	let first = s.engine.get_or_create_session(v.clone());
	let second = s.engine.get_or_create_session(v);
	assert!(Rc::ptr_eq(&first, &second));
	assert_eq!(s.engine.sessions().len(), 1);
}

#[test]
fn views_of_one_buffer_share_the_wrapper() {
	let s = plain();
	let buffer = FakeBuffer::new(1);
	let a = s.engine.get_or_create_session(FakeView::new(1, buffer.clone()));
	let b = s.engine.get_or_create_session(FakeView::new(2, buffer));
	assert!(Rc::ptr_eq(a.wrapper(), b.wrapper()));
}

#[test]
#[should_panic(expected = "created twice")]
fn creating_a_second_session_for_a_view_panics() {
	let s = plain();
	let v = view(1, 1);
	s.engine.create_session(v.clone());
	s.engine.create_session(v);
}

#[test]
fn listeners_run_in_registration_order() {
	let s = plain();
	let log = Rc::new(RefCell::new(Vec::new()));
	for name in ["first", "second"] {
		let log = log.clone();
		s.engine.add_creation_listener(Rc::new(move |session: &Rc<Session>| {
			log.borrow_mut().push((name, session.view_id()));
		}));
	}

	s.engine.get_or_create_session(view(1, 1));
	s.engine.get_or_create_session(view(1, 1));
	s.engine.create_session_core(view(2, 2));
	assert_eq!(*log.borrow(), [("first", ViewId(1)), ("second", ViewId(1))]);
}

#[test]
fn active_stack_pushes_and_pops() {
	let s = plain();
	let a = s.engine.get_or_create_session(view(1, 1));
	let b = s.engine.get_or_create_session(view(2, 2));
	assert!(s.engine.active_session().is_none());

	let outer = s.engine.begin_input(&a);
	let inner = s.engine.begin_input(&b);
	let stack = s.engine.active_sessions();
	assert_eq!(stack.len(), 2);
	assert!(Rc::ptr_eq(&stack[0], &b));
	assert!(Rc::ptr_eq(&stack[1], &a));

	drop(inner);
	assert!(s.engine.active_session().is_some_and(|top| Rc::ptr_eq(&top, &a)));
	drop(outer);
	assert!(s.engine.active_session().is_none());
	assert!(s.engine.active_sessions().is_empty());
}

#[test]
fn process_key_leaves_the_stack_as_it_found_it() {
	let s = plain();
	let session = s.engine.get_or_create_session(view(1, 1));
	let seen = Rc::new(Cell::new(0));
	let (engine, counter) = (Rc::downgrade(&s.engine), seen.clone());
	let _sub = session.key_input_start().connect(move |_| {
		if let Some(engine) = engine.upgrade() {
			counter.set(engine.active_sessions().len());
		}
	});

	s.engine.process_key(&session, KeyInput::char('i'));
	assert_eq!(seen.get(), 1);
	assert_eq!(session.mode(), ModeKind::Insert);
	assert!(s.engine.active_session().is_none());
}

#[test]
fn new_wrappers_copy_the_active_sessions_settings() {
	let s = plain();
	let a = s.engine.get_or_create_session(view(1, 1));
	assert!(a.run_command("setlocal ts=2"));

	let during = {
		let _scope = s.engine.begin_input(&a);
		s.engine.get_or_create_session(view(2, 2))
	};
	let after = s.engine.get_or_create_session(view(3, 3));
	assert_eq!(during.data().local_settings().tab_stop(), 2);
	assert_eq!(after.data().local_settings().tab_stop(), 8);
}

#[test]
fn bulk_operations_notify_host_at_the_edges() {
	let s = plain();
	let outer = s.engine.begin_bulk_operation();
	let inner = s.engine.begin_bulk_operation();
	assert!(s.engine.in_bulk_operation());
	drop(inner);
	assert_eq!(s.host.bulk_counts(), (1, 0));
	drop(outer);
	assert!(!s.engine.in_bulk_operation());
	assert_eq!(s.host.bulk_counts(), (1, 1));
}

#[test]
fn closing_a_view_removes_its_session_but_keeps_the_wrapper() {
	let s = plain();
	let v = view(1, 1);
	let session = s.engine.get_or_create_session(v.clone());
	let closed = Rc::new(Cell::new(false));
	let flag = closed.clone();
	let _sub = session.closed().connect(move |()| flag.set(true));

	v.close();
	assert!(closed.get());
	assert!(session.is_closed());
	assert!(s.engine.get_session(ViewId(1)).is_none());
	assert!(s.engine.get_wrapper(BufferId(1)).is_some());
	assert!(!s.engine.remove_session(ViewId(1)));
	assert_eq!(s.engine.process_key(&session, KeyInput::char('i')), ProcessResult::NotHandled);
}

#[test]
fn close_all_sessions_releases_every_session() {
	let s = plain();
	let a = s.engine.get_or_create_session(view(1, 1));
	let b = s.engine.get_or_create_session(view(2, 2));
	s.engine.close_all_sessions();
	assert!(a.is_closed() && b.is_closed());
	assert!(s.engine.sessions().is_empty());
}

#[test]
fn focused_session_follows_the_host() {
	let s = plain();
	s.engine.get_or_create_session(view(1, 1));
	let b = s.engine.get_or_create_session(view(2, 2));
	assert!(s.engine.focused_session().is_none());
	s.host.set_focused(Some(ViewId(2)));
	assert!(s.engine.focused_session().is_some_and(|f| Rc::ptr_eq(&f, &b)));
}

#[test]
fn bootstrap_without_rc_file() {
	let s = setup(FakeFileSystem::empty(&["/home/user", "/usr/share/tarn"]));
	assert!(!s.engine.load_bootstrap());
	let global = s.engine.global_settings();
	assert_eq!(global.vim_rc(), "");
	assert_eq!(global.vim_rc_paths(), "/home/user,/usr/share/tarn");
	assert_eq!(s.engine.bootstrap_state(), BootstrapState::NotFound);
	assert_eq!(s.host.hidden_view_counts(), (0, 0));
	assert!(!s.engine.is_loading_bootstrap());
}

#[test]
fn bootstrap_runs_every_line_in_a_hidden_view() {
	let s = setup(FakeFileSystem::with_rc(
		"/home/user/.tarnrc",
		&["\" defaults", "set ts=4 sw=4", "set xyzzy", "set nowrap", "set hls"],
	));
	assert!(s.engine.load_bootstrap());

	assert_eq!(s.engine.global_settings().vim_rc(), "/home/user/.tarnrc");
	assert_eq!(s.engine.bootstrap_state(), BootstrapState::Loaded);
	assert_eq!(s.host.hidden_view_counts(), (1, 1));
	assert_eq!(s.host.errors(), ["unknown option: xyzzy"]);
	assert!(s.engine.global_settings().highlight_search());

	// Nothing of the hidden view stays registered.
	assert!(s.engine.sessions().is_empty());
	let hidden = s.host.hidden_views().remove(0);
	assert!(s.engine.get_wrapper(hidden.buffer().id()).is_none());

	assert_eq!(s.engine.template_local_settings().tab_stop(), 4);
	assert!(!s.engine.template_window_settings().wrap());

	let session = s.engine.get_or_create_session(view(1, 1));
	assert_eq!(session.data().local_settings().shift_width(), 4);
	assert!(!session.data().window_settings().wrap());
}

#[test]
fn bootstrap_cleans_up_when_a_line_panics() {
	use std::panic::{AssertUnwindSafe, catch_unwind};

	use tarn_settings::global::names::HIGHLIGHT_SEARCH;

	let s = setup(FakeFileSystem::with_rc("/home/user/.tarnrc", &["set ts=4", "set hls", "set nowrap"]));
	s.engine.global_settings().subscribe(|change| {
		if change.setting.name == HIGHLIGHT_SEARCH {
			panic!("observer failed");
		}
	});

	let outcome = catch_unwind(AssertUnwindSafe(|| s.engine.load_bootstrap()));
	assert!(outcome.is_err());

	assert_eq!(s.host.hidden_view_counts(), (1, 1));
	assert!(!s.engine.is_loading_bootstrap());
	assert!(s.engine.sessions().is_empty());
	assert!(s.engine.active_session().is_none());
	let hidden = s.host.hidden_views().remove(0);
	assert!(hidden.is_closed());
	assert!(s.engine.get_wrapper(hidden.buffer().id()).is_none());
}

#[test]
fn bootstrap_is_attempted_once_automatically() {
	let s = setup(FakeFileSystem::with_rc("/home/user/.tarnrc", &["set ts=2"]));
	let first = s.engine.get_or_create_session(view(1, 1));
	s.engine.get_or_create_session(view(2, 2));
	assert_eq!(s.fs.loads(), 1);
	assert_eq!(first.data().local_settings().tab_stop(), 2);

	let missing = setup(FakeFileSystem::empty(&[]));
	missing.engine.get_or_create_session(view(1, 1));
	missing.engine.get_or_create_session(view(2, 2));
	assert_eq!(missing.fs.loads(), 1);
}

#[test]
fn automatic_bootstrap_can_be_disabled() {
	let s = setup(FakeFileSystem::with_rc("/home/user/.tarnrc", &["set ts=2"]));
	s.engine.set_auto_load_bootstrap(false);
	let session = s.engine.get_or_create_session(view(1, 1));
	assert_eq!(s.fs.loads(), 0);
	assert_eq!(session.data().local_settings().tab_stop(), 8);
	assert_eq!(s.engine.bootstrap_state(), BootstrapState::None);
}

#[test]
fn bootstrap_does_not_notify_creation_listeners() {
	let s = setup(FakeFileSystem::with_rc("/home/user/.tarnrc", &["set ts=2"]));
	let created = Rc::new(Cell::new(0));
	let counter = created.clone();
	s.engine.add_creation_listener(Rc::new(move |_: &Rc<Session>| counter.set(counter.get() + 1)));
	s.engine.get_or_create_session(view(1, 1));
	assert_eq!(created.get(), 1);
}

#[test]
fn macro_recording_and_replay() {
	let s = plain();
	let session = s.engine.get_or_create_session(view(1, 1));
	feed(&s.engine, &session, "qaix<Esc>q");

	let recorder = s.engine.macro_recorder();
	assert!(!recorder.is_recording());
	assert_eq!(recorder.macro_for('a'), Some(parse_key_notation("ix<Esc>").into_vec()));

	let inserts = Rc::new(Cell::new(0));
	let counter = inserts.clone();
	let _sub = session.mode_switched().connect(move |switch| {
		if switch.to == ModeKind::Insert {
			counter.set(counter.get() + 1);
		}
	});

	feed(&s.engine, &session, "2@a");
	assert_eq!(inserts.get(), 2);
	feed(&s.engine, &session, "@@");
	assert_eq!(inserts.get(), 3);
	assert_eq!(session.mode(), ModeKind::Normal);
	assert_eq!(recorder.last_register(), Some('a'));
	assert!(s.engine.active_session().is_none());
}

#[test]
fn replayed_keys_are_not_recorded_again() {
	let s = plain();
	let session = s.engine.get_or_create_session(view(1, 1));
	s.engine.macro_recorder().set_macro('a', parse_key_notation("ix<Esc>").into_vec());

	let depth = Rc::new(Cell::new(0));
	let (engine, deepest) = (Rc::downgrade(&s.engine), depth.clone());
	let _sub = session.key_input_start().connect(move |_| {
		if let Some(engine) = engine.upgrade() {
			deepest.set(deepest.get().max(engine.active_sessions().len()));
		}
	});

	feed(&s.engine, &session, "qb@aq");
	assert_eq!(s.engine.macro_recorder().macro_for('b'), Some(parse_key_notation("@a").into_vec()));
	assert_eq!(depth.get(), 2);
}

#[test]
fn self_referencing_macro_stops() {
	let s = plain();
	let session = s.engine.get_or_create_session(view(1, 1));
	s.engine.macro_recorder().set_macro('r', parse_key_notation("@r").into_vec());
	feed(&s.engine, &session, "@r");
	assert_eq!(s.host.errors(), ["E169: Command too recursive"]);
	assert!(!s.engine.macro_recorder().is_replaying());
	assert!(s.engine.active_session().is_none());
}

#[test]
fn repeat_without_previous_macro_reports() {
	let s = plain();
	let session = s.engine.get_or_create_session(view(1, 1));
	feed(&s.engine, &session, "@@");
	assert_eq!(s.host.errors(), ["E748: No previously used register"]);
	assert!(!s.engine.run_macro(&session, 'z', 1));
}

#[test]
fn recording_is_announced() {
	let s = plain();
	let session = s.engine.get_or_create_session(view(1, 1));
	feed(&s.engine, &session, "qz");
	assert_eq!(s.host.last_status().as_deref(), Some("recording @z"));
	assert_eq!(s.engine.macro_recorder().recording_register(), Some('z'));
	feed(&s.engine, &session, "q");
	assert_eq!(s.engine.macro_recorder().macro_for('z'), Some(Vec::new()));
}
