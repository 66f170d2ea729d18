use std::collections::HashSet;
use std::sync::Mutex;

use rocket::http::{Cookie, CookieJar, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;

pub const SESSION_COOKIE: &str = "vitrine_admin";

/// Admin login lifecycle. The password check is a direct equality comparison
/// against the password carried in the content document — a UI convenience
/// gate, not a security boundary (no hashing, no rate limit, no expiry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminGate {
    LoggedOut,
    LoginPrompting,
    LoggedIn,
}

impl AdminGate {
    pub fn new() -> Self {
        AdminGate::LoggedOut
    }

    pub fn open_login(&mut self) {
        if *self == AdminGate::LoggedOut {
            *self = AdminGate::LoginPrompting;
        }
    }

    pub fn cancel(&mut self) {
        if *self == AdminGate::LoginPrompting {
            *self = AdminGate::LoggedOut;
        }
    }

    /// Submit a password while prompting. A wrong password stays prompting;
    /// the caller shows the rejection notice and the user may retry.
    pub fn submit(&mut self, attempt: &str, expected: &str) -> bool {
        if *self != AdminGate::LoginPrompting {
            return false;
        }
        if attempt == expected {
            *self = AdminGate::LoggedIn;
            true
        } else {
            false
        }
    }

    /// Closing the admin panel ends the session.
    pub fn close(&mut self) {
        *self = AdminGate::LoggedOut;
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory registry of live admin session tokens. Sessions never expire;
/// they end when the panel is closed or the process restarts.
pub struct AdminSessions {
    tokens: Mutex<HashSet<String>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        AdminSessions {
            tokens: Mutex::new(HashSet::new()),
        }
    }

    pub fn create(&self) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        if let Ok(mut guard) = self.tokens.lock() {
            guard.insert(token.clone());
        }
        token
    }

    pub fn validate(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .map(|guard| guard.contains(token))
            .unwrap_or(false)
    }

    pub fn destroy(&self, token: &str) {
        if let Ok(mut guard) = self.tokens.lock() {
            guard.remove(token);
        }
    }
}

impl Default for AdminSessions {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that ensures the request carries a live admin session.
pub struct AdminUser;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let sessions = match request.guard::<&State<AdminSessions>>().await {
            Outcome::Success(s) => s,
            _ => return Outcome::Forward(Status::Unauthorized),
        };

        let cookies = request.cookies();
        let token = match cookies.get_private(SESSION_COOKIE) {
            Some(c) => c.value().to_string(),
            None => return Outcome::Forward(Status::Unauthorized),
        };

        if sessions.validate(&token) {
            Outcome::Success(AdminUser)
        } else {
            cookies.remove_private(Cookie::from(SESSION_COOKIE));
            Outcome::Forward(Status::Unauthorized)
        }
    }
}

pub fn set_session_cookie(cookies: &CookieJar<'_>, token: &str) {
    let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(rocket::http::SameSite::Strict);
    cookie.set_path("/");
    cookies.add_private(cookie);
}

pub fn clear_session_cookie(cookies: &CookieJar<'_>) {
    cookies.remove_private(Cookie::from(SESSION_COOKIE));
}
