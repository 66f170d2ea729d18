/// A message composed on the contact form. Nothing is sent over the network:
/// submission hands off to the visitor's mail handler via a mailto: URI.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// All three fields are required before the handoff is composed.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Nome é obrigatório".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("Email é obrigatório".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Mensagem é obrigatória".to_string());
        }
        Ok(())
    }
}

/// Build the mailto: URI with percent-encoded subject and body. Whether a
/// mail handler is configured is the visitor's platform's problem.
pub fn mailto_link(to: &str, msg: &ContactMessage) -> String {
    let subject = format!("Contato - {}", msg.name);
    let body = format!(
        "Nome: {}\r\nEmail: {}\r\n\r\nMensagem:\r\n{}",
        msg.name, msg.email, msg.message
    );
    format!(
        "mailto:{}?subject={}&body={}",
        to,
        percent_encode(&subject),
        percent_encode(&body)
    )
}

/// RFC 3986 percent-encoding over the unreserved set. mailto bodies need
/// %20 for spaces, so form-urlencoding (which emits '+') is not usable here.
/// Also used for path segments in rendered hrefs.
pub(crate) fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
