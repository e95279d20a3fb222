pub(crate) mod companies;
pub(crate) mod company_jobs;
pub(crate) mod dashboard;
pub(crate) mod guard;
pub(crate) mod layout;
pub(crate) mod list;
pub(crate) mod login;
pub(crate) mod pager;
pub(crate) mod register;
pub(crate) mod users;
