//! Outbox transport: renders each message as a MIME `.eml` file.
//!
//! Text and attachments are base64 encoded, so the fixed boundary string
//! (which contains `=_`) cannot occur inside any part.

use super::{MailTransport, OutgoingMail};
use crate::error::{ReportError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const BOUNDARY: &str = "=_grade_report_part";
const LINE_WIDTH: usize = 76;

/// Writes messages into a directory instead of talking to a mail server
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    dir: PathBuf,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the `.eml` file for a recipient address.
    ///
    /// Bytes outside `[A-Za-z0-9@.-_+]` are percent-encoded, so distinct
    /// addresses never share a file.
    pub fn message_path(&self, recipient: &str) -> PathBuf {
        let mut stem = String::new();
        for byte in recipient.bytes() {
            if byte.is_ascii_alphanumeric() || b"@.-_+".contains(&byte) {
                stem.push(byte as char);
            } else {
                stem.push_str(&format!("%{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.eml", stem))
    }
}

impl MailTransport for OutboxTransport {
    fn send(&mut self, mail: &OutgoingMail) -> Result<()> {
        let fail = |message: String| ReportError::Mail { recipient: mail.to.clone(), message };

        let mut attachments = Vec::with_capacity(mail.attachments.len());
        for path in &mail.attachments {
            let bytes = fs::read(path).map_err(|e| fail(format!("cannot read {}: {}", path.display(), e)))?;
            attachments.push((attachment_name(path), bytes));
        }

        let rendered = render_message(mail, &attachments, &chrono::Local::now().to_rfc2822());

        fs::create_dir_all(&self.dir).map_err(|e| fail(format!("cannot create {}: {}", self.dir.display(), e)))?;
        let path = self.message_path(&mail.to);
        fs::write(&path, rendered).map_err(|e| fail(format!("cannot write {}: {}", path.display(), e)))?;
        debug!("Wrote {}", path.display());

        Ok(())
    }
}

fn attachment_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "report.csv".to_string())
}

/// RFC 2047 encoded-word for non-ASCII header text
fn encode_header(text: &str) -> String {
    if text.is_ascii() {
        text.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(text.as_bytes()))
    }
}

/// RFC 2231 percent-encoding for a parameter value
fn encode_parameter(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn push_base64(out: &mut String, bytes: &[u8]) {
    let encoded = STANDARD.encode(bytes);
    // base64 output is ASCII, so byte chunks are valid str slices
    for chunk in encoded.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        out.push_str("\r\n");
    }
}

/// Render a complete `multipart/mixed` message
pub fn render_message(mail: &OutgoingMail, attachments: &[(String, Vec<u8>)], date: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("From: {}\r\n", mail.from));
    out.push_str(&format!("To: {} <{}>\r\n", encode_header(&mail.to_name), mail.to));
    out.push_str(&format!("Subject: {}\r\n", encode_header(&mail.subject)));
    out.push_str(&format!("Date: {}\r\n", date));
    out.push_str("MIME-Version: 1.0\r\n");
    out.push_str(&format!("Content-Type: multipart/mixed; boundary=\"{}\"\r\n", BOUNDARY));
    out.push_str("\r\n");

    out.push_str(&format!("--{}\r\n", BOUNDARY));
    out.push_str("Content-Type: text/plain; charset=UTF-8\r\n");
    out.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
    push_base64(&mut out, mail.body.as_bytes());

    for (name, bytes) in attachments {
        out.push_str(&format!("--{}\r\n", BOUNDARY));
        out.push_str(&format!("Content-Type: text/csv; charset=UTF-8; name=\"{}\"\r\n", encode_header(name)));
        out.push_str("Content-Transfer-Encoding: base64\r\n");
        out.push_str(&format!("Content-Disposition: attachment; filename*=UTF-8''{}\r\n\r\n", encode_parameter(name)));
        push_base64(&mut out, bytes);
    }

    out.push_str(&format!("--{}--\r\n", BOUNDARY));
    out
}
