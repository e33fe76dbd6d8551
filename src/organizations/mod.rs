mod form;
mod page;

pub use form::NOT_ALLOWED;
pub use form::OrganizationForm;
pub use page::OrganizationsPage;
