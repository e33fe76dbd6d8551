mod confirm;
mod dialog;
mod fetch;
mod filter;
mod form;
mod imap;
mod list;
mod page;

pub use confirm::DeleteCoursePopup;
pub use confirm::EnableCoursePopup;
pub use dialog::Dialog;
pub use dialog::ToggleAction;
pub use fetch::FetchGuard;
pub use fetch::FetchTicket;
pub use fetch::Fetched;
pub use filter::FilterForm;
pub use filter::StatusFilter;
pub use form::CourseForm;
pub use form::DUPLICATE_COURSE;
pub use form::FormMode;
pub use form::SERVER_FAILURE;
pub use form::SubmitError;
pub use imap::AddImapConnectionForm;
pub use imap::CreateImapForm;
pub use list::ListPatch;
pub use list::apply;
pub use page::CourseFetch;
pub use page::CoursesPage;
