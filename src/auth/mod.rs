pub mod cookie;
pub mod session;

pub use cookie::{CookieError, CookieSigner};
pub use session::{removal_cookie, session_cookie, SessionToken, SESSION_COOKIE};
