//! Staged construction of wrappers, session data and sessions.

use std::rc::{Rc, Weak};

use tarn_settings::{LocalSettings, WindowSettings};
use tracing::debug;

use crate::history::Histories;
use crate::host::{Host, TextBuffer, TextView};
use crate::mode::standard_modes;
use crate::session::Session;
use crate::session_data::SessionData;
use crate::wrapper::BufferWrapper;


/// Builds the three construction stages. Caching and registration are the
/// engine's job; the factory only assembles.
pub struct SessionFactory {
	host: Rc<dyn Host>,
	histories: Rc<Histories>,
}

impl SessionFactory {
	pub fn new(host: Rc<dyn Host>, histories: Rc<Histories>) -> Self {
		Self { host, histories }
	}

	/// Builds a wrapper whose local settings start as a copy of `seed`.
	pub fn create_wrapper(&self, buffer: Rc<dyn TextBuffer>, seed: &LocalSettings) -> Rc<BufferWrapper> {
		let name = self.host.display_name(buffer.as_ref());
		debug!(buffer = %buffer.id(), %name, "created buffer wrapper");
		Rc::new(BufferWrapper::new(buffer, name, seed.copy()))
	}

	/// Builds per-view data whose window settings start as a copy of `seed`.
	///
	/// # Panics
	///
	/// Panics if `view` does not show the wrapper's buffer.
	pub fn create_session_data(&self, wrapper: Rc<BufferWrapper>, view: Rc<dyn TextView>, seed: &WindowSettings) -> SessionData {
		let view_buffer = view.buffer().id();
		assert_eq!(
			wrapper.buffer_id(),
			view_buffer,
			"view {} shows {view_buffer}, not the wrapper's buffer",
			view.id()
		);
		SessionData::new(wrapper, view, seed.copy(), self.host.clone(), self.histories.clone())
	}

	/// Builds a session with the full mode set.
	///
	/// The session activates immediately when the view is laid out, otherwise
	/// on the view's first layout-ready signal.
	pub fn create_session(&self, data: SessionData) -> Rc<Session> {
		let session = Rc::new(Session::new(data, standard_modes()));
		let view = session.data().view().clone();

		if view.is_layout_ready() {
			session.activate();
		} else {
			let weak: Weak<Session> = Rc::downgrade(&session);
			let subscription = view.layout_ready().connect(move |()| {
				if let Some(session) = weak.upgrade() {
					session.activate();
				}
			});
			debug!(view = %view.id(), "session activation deferred until layout");
			session.defer_activation(subscription);
		}
		session
	}
}
