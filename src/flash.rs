use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

const COOKIE_NAME: &str = "flash";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Info,
    Warning,
}

/// One queued user-facing message, shown on the next rendered page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

/// Queue a message on top of whatever is already pending.
pub fn push(jar: SignedCookieJar, level: Level, message: impl Into<String>) -> SignedCookieJar {
    let mut pending = peek(&jar);
    pending.push(Flash { level, message: message.into() });
    let encoded = serde_json::to_string(&pending).unwrap_or_default();
    jar.add(flash_cookie(encoded))
}

/// Drain all pending messages and clear the cookie.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Flash>) {
    let pending = peek(&jar);
    let jar = jar.remove(flash_cookie(String::new()));
    (jar, pending)
}

fn peek(jar: &SignedCookieJar) -> Vec<Flash> {
    jar.get(COOKIE_NAME)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(COOKIE_NAME, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Key;

    use super::*;

    #[test]
    fn push_then_take_round_trips_in_order() {
        let jar = SignedCookieJar::new(Key::generate());
        let jar = push(jar, Level::Success, "Movie 'Inception' added successfully!");
        let jar = push(jar, Level::Warning, "heads up");

        let (jar, flashes) = take(jar);
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].level, Level::Success);
        assert_eq!(flashes[0].message, "Movie 'Inception' added successfully!");
        assert_eq!(flashes[1].level, Level::Warning);

        let (_, flashes) = take(jar);
        assert!(flashes.is_empty());
    }

    #[test]
    fn garbage_cookie_is_treated_as_empty() {
        let jar = SignedCookieJar::new(Key::generate());
        let jar = jar.add(flash_cookie("not json".to_string()));
        let (_, flashes) = take(jar);
        assert!(flashes.is_empty());
    }
}
