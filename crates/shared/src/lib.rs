//! Types shared by the country browser library and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{FilterChoice, LanguageCountFilter, SortKey, SubregionFilter, SHOW_ALL_LABEL};
pub use error::{FetchError, FetchErrorKind};
pub use protocol::{CountryRecord, LanguageRef};
