//! Parent notifications. Simulated: messages are logged and echoed back to
//! the UI, nothing leaves the machine.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub channel: Channel,
    pub recipient: String,
    pub message: String,
}

fn send(channel: Channel, recipient: &str, student_name: &str) -> Notification {
    let message = format!(
        "Attendance notification sent to {} for {}",
        recipient, student_name
    );
    tracing::info!(?channel, recipient, student = student_name, "simulated notification");
    Notification {
        channel,
        recipient: recipient.to_string(),
        message,
    }
}

pub fn send_email(parent_email: &str, student_name: &str) -> Notification {
    send(Channel::Email, parent_email, student_name)
}

pub fn send_sms(parent_phone: &str, student_name: &str) -> Notification {
    send(Channel::Sms, parent_phone, student_name)
}
