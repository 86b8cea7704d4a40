use log::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Success,
	Info,
	Warning,
	Error,
}

impl NoticeLevel {
	/// CSS modifier used by the notice stack.
	pub fn class(self) -> &'static str {
		match self {
			NoticeLevel::Success => "notice-success",
			NoticeLevel::Info => "notice-info",
			NoticeLevel::Warning => "notice-warning",
			NoticeLevel::Error => "notice-error",
		}
	}
}

/// A user-visible message raised by the session instead of an error value.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
	pub id: u64,
	pub level: NoticeLevel,
	pub message: String,
}

/// Outbox of notices waiting to be shown.
#[derive(Debug, Default)]
pub(crate) struct Notices {
	next_id: u64,
	pending: Vec<Notice>,
}

impl Notices {
	pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
		let message = message.into();
		match level {
			NoticeLevel::Success | NoticeLevel::Info => info!("{}", message),
			NoticeLevel::Warning => warn!("{}", message),
			NoticeLevel::Error => error!("{}", message),
		}
		self.next_id += 1;
		self.pending.push(Notice {
			id: self.next_id,
			level,
			message,
		});
	}

	pub fn pending(&self) -> &[Notice] {
		&self.pending
	}

	pub fn drain(&mut self) -> Vec<Notice> {
		std::mem::take(&mut self.pending)
	}
}
