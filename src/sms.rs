use crate::models::Customer;

/// One target of a bulk SMS draft.
#[derive(Debug, Clone, PartialEq)]
pub struct SmsRecipient {
    pub customer_id: i32,
    /// "ad soyad" as shown in the recipients list.
    pub name: String,
    pub telefon: Option<String>,
}

impl From<&Customer> for SmsRecipient {
    fn from(c: &Customer) -> Self {
        Self {
            customer_id: c.id,
            name: format!("{} {}", c.ad, c.soyad),
            telefon: c.telefon.clone(),
        }
    }
}

/// Outcome of a bulk send, reported back to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsReport {
    pub recipients: usize,
}

/// Outbound messaging boundary.
///
/// The view model depends only on this trait, so a real provider can be
/// substituted without touching the record service or the view logic.
pub trait SmsGateway {
    fn send_bulk(&self, recipients: &[SmsRecipient], message: &str) -> SmsReport;
}

/// Gateway that simulates delivery: it logs the batch and reports success
/// without contacting any messaging provider.
#[derive(Debug, Default)]
pub struct SimulatedSmsGateway;

impl SmsGateway for SimulatedSmsGateway {
    fn send_bulk(&self, recipients: &[SmsRecipient], message: &str) -> SmsReport {
        for r in recipients {
            tracing::info!(
                customer_id = r.customer_id,
                name = %r.name,
                telefon = r.telefon.as_deref().unwrap_or("-"),
                "SMS simulated"
            );
        }
        tracing::info!(
            count = recipients.len(),
            chars = message.len(),
            "Bulk SMS simulated"
        );
        SmsReport {
            recipients: recipients.len(),
        }
    }
}
