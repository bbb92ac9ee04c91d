//! Upstream Cookies
//!
//! Holds the authentication cookie for each upstream source, parses cookie
//! strings into name/value pairs, and resolves the startup value from a
//! cookie file, the environment, or the persisted config store.

mod loader;
mod parser;
mod store;

pub use loader::{CookieOrigin, CookieSources, ResolvedCookie, config_store_key, resolve_cookie};
pub use parser::{cookie_header_value, parse_cookie_string};
pub use store::{CookieSnapshot, CookieStore};
