use url::Url;

/// Masks the password of a connection URL so it can be logged.
pub fn redact_connection_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() && parsed.set_password(Some("***")).is_err() {
                return "<unprintable connection url>".to_string();
            }
            parsed.to_string()
        }
        Err(_) => "<unprintable connection url>".to_string(),
    }
}
