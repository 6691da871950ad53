//! Mail delivery of report files.
//!
//! Delivery goes through the `MailTransport` trait so the pipeline does not
//! care where a message ends up:
//! - `DryRunTransport` only reports what would be sent
//! - `OutboxTransport` writes one MIME `.eml` file per recipient
//!
//! A failure for one recipient is logged and the remaining recipients are
//! still attempted.

mod outbox;

pub use outbox::{OutboxTransport, render_message};

use crate::distribute::{DistributionPlan, teacher_name_by_email};
use crate::error::{ReportError, Result};
use crate::settings::RunSettings;
use crate::types::TeacherRow;
use crate::ui;
use log::{debug, warn};
use std::path::PathBuf;

/// One message: sender, recipient, text, and files to attach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}

pub trait MailTransport {
    fn send(&mut self, mail: &OutgoingMail) -> Result<()>;
}

/// Prints the message instead of sending it
#[derive(Debug, Default)]
pub struct DryRunTransport;

impl MailTransport for DryRunTransport {
    fn send(&mut self, mail: &OutgoingMail) -> Result<()> {
        ui::status(&format!("[dry run] {} -> {} <{}>: {}", mail.from, mail.to_name, mail.to, mail.subject));
        for path in &mail.attachments {
            ui::status(&format!("[dry run]   attach {}", path.display()));
        }
        Ok(())
    }
}

/// Delivery outcome counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    pub sent: usize,
    pub failed: usize,
}

/// Send one message per recipient in `plan`
pub fn deliver_all(
    plan: &DistributionPlan,
    settings: &RunSettings,
    teachers: &[TeacherRow],
    transport: &mut dyn MailTransport,
) -> DeliveryStats {
    let mut stats = DeliveryStats::default();

    for (email, files) in plan {
        let name = teacher_name_by_email(teachers, email);

        let result = if email.trim().is_empty() {
            Err(ReportError::Mail { recipient: name.to_string(), message: "teacher has no email address".to_string() })
        } else {
            let mail = OutgoingMail {
                from: settings.sender_email.clone(),
                to: email.clone(),
                to_name: name.to_string(),
                subject: settings.subject_for(name),
                body: settings.body_for(name),
                attachments: files.clone(),
            };
            debug!("Sending {} attachment(s) to {}", files.len(), email);
            transport.send(&mail)
        };

        match result {
            Ok(()) => {
                stats.sent += 1;
                ui::status(&format!("Mailed {} ({}) with {} attachment(s)", name, email, files.len()));
            }
            Err(e) => {
                stats.failed += 1;
                warn!("Mail to {} ({}) failed: {}", name, email, e);
            }
        }
    }

    stats
}
