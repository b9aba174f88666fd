//! Typed view-state model for the staff client.
//!
//! The client's UI state is a small finite-state machine: which page is
//! shown, which record is selected, which rows are checked for a bulk SMS,
//! and the current search text. Transitions are plain methods; server
//! responses are applied through the `load_*`/`apply_*` methods and a failed
//! call simply skips the apply, leaving prior state unchanged.

use std::collections::BTreeSet;

use crate::models::{Customer, Stats};
use crate::sms::{SmsGateway, SmsRecipient, SmsReport};

/// Number of customers shown in the dashboard's recent list.
const RECENT_LIMIT: usize = 5;

/// Ready-made SMS drafts offered next to the compose box.
pub const SMS_TEMPLATES: [&str; 3] = [
    "Değerli müşterimiz, yeni yıl kampanyamızdan faydalanmak için galerimizi ziyaret edin.",
    "Aracınızın periyodik bakım zamanı geldi. Randevu için bizi arayın.",
    "Galeriye yeni araçlar geldi! Showroomumuzu ziyaret edin.",
];

/// The pages the client can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Customers,
    Profile,
    Add,
}

/// Client-side UI state over the record service.
#[derive(Debug)]
pub struct ViewState {
    pub page: Page,
    /// Cached customer list, newest first, as returned by `list()`.
    pub customers: Vec<Customer>,
    /// Cached dashboard counts, as returned by `stats()`.
    pub stats: Stats,
    /// The record opened in the profile page, if any.
    pub selected: Option<Customer>,
    /// Ids checked for a bulk SMS.
    pub checked: BTreeSet<i32>,
    /// Search text; filtering is local, never sent to the server.
    pub search: String,
    /// Draft message for the SMS modal.
    pub sms_text: String,
    pub sms_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            page: Page::Dashboard,
            customers: Vec::new(),
            stats: Stats::default(),
            selected: None,
            checked: BTreeSet::new(),
            search: String::new(),
            sms_text: String::new(),
            sms_open: false,
        }
    }

    // ---- server response application ----

    /// Replace the cached list with a fresh `list()` response.
    pub fn load_customers(&mut self, customers: Vec<Customer>) {
        self.customers = customers;
    }

    /// Replace the cached counts with a fresh `stats()` response.
    pub fn load_stats(&mut self, stats: Stats) {
        self.stats = stats;
    }

    /// A newly created customer is prepended (the list is newest-first)
    /// and the client returns to the list page.
    pub fn apply_created(&mut self, customer: Customer) {
        self.customers.insert(0, customer);
        self.page = Page::Customers;
    }

    /// Replace a record in place after an update or premium toggle; the
    /// profile selection follows when it shows the same record.
    pub fn apply_updated(&mut self, customer: Customer) {
        if let Some(slot) = self.customers.iter_mut().find(|c| c.id == customer.id) {
            *slot = customer.clone();
        }
        if self.selected.as_ref().map(|s| s.id) == Some(customer.id) {
            self.selected = Some(customer);
        }
    }

    /// Remove a deleted record. Deleting the record open in the profile
    /// clears the selection and falls back to the list page.
    pub fn apply_deleted(&mut self, id: i32) {
        self.customers.retain(|c| c.id != id);
        self.checked.remove(&id);
        if self.selected.as_ref().map(|s| s.id) == Some(id) {
            self.selected = None;
            self.page = Page::Customers;
        }
    }

    // ---- navigation ----

    pub fn go_dashboard(&mut self) {
        self.page = Page::Dashboard;
    }

    pub fn go_customers(&mut self) {
        self.page = Page::Customers;
    }

    pub fn go_add(&mut self) {
        self.page = Page::Add;
    }

    /// Open a customer's profile.
    pub fn open_profile(&mut self, customer: Customer) {
        self.selected = Some(customer);
        self.page = Page::Profile;
    }

    /// Back from profile (or cancel from the add form) to the list.
    pub fn back_to_list(&mut self) {
        self.page = Page::Customers;
    }

    // ---- search & selection ----

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// The customer list filtered by the current search text: a
    /// case-insensitive substring match over "ad soyad" and mail, and a
    /// plain substring match over telefon and tc_kimlik.
    pub fn filtered(&self) -> Vec<&Customer> {
        let needle = self.search.to_lowercase();
        self.customers
            .iter()
            .filter(|c| {
                format!("{} {}", c.ad, c.soyad)
                    .to_lowercase()
                    .contains(&needle)
                    || c.telefon
                        .as_deref()
                        .is_some_and(|t| t.contains(&self.search))
                    || c.mail
                        .as_deref()
                        .is_some_and(|m| m.to_lowercase().contains(&needle))
                    || c.tc_kimlik
                        .as_deref()
                        .is_some_and(|t| t.contains(&self.search))
            })
            .collect()
    }

    /// First five customers of the cached list, for the dashboard.
    pub fn recent(&self) -> &[Customer] {
        &self.customers[..RECENT_LIMIT.min(self.customers.len())]
    }

    /// Toggle one row's checkbox.
    pub fn toggle_check(&mut self, id: i32) {
        if !self.checked.remove(&id) {
            self.checked.insert(id);
        }
    }

    /// Header checkbox: checks every filtered row, or clears the set when
    /// exactly the filtered rows are already checked. Ids left over from an
    /// earlier search never count toward "already checked".
    pub fn check_all_filtered(&mut self) {
        let filtered: BTreeSet<i32> = self.filtered().iter().map(|c| c.id).collect();
        if !filtered.is_empty() && self.checked == filtered {
            self.checked.clear();
        } else {
            self.checked = filtered;
        }
    }

    // ---- bulk SMS ----

    pub fn open_sms(&mut self) {
        self.sms_open = true;
    }

    pub fn close_sms(&mut self) {
        self.sms_open = false;
    }

    pub fn set_sms_text(&mut self, text: impl Into<String>) {
        self.sms_text = text.into();
    }

    /// Checked customers as SMS recipients, in list order.
    pub fn sms_recipients(&self) -> Vec<SmsRecipient> {
        self.customers
            .iter()
            .filter(|c| self.checked.contains(&c.id))
            .map(SmsRecipient::from)
            .collect()
    }

    /// Send the draft to every checked customer through the gateway, then
    /// close the modal and clear the draft and the checked set. Returns
    /// `None` when the draft is blank.
    pub fn send_sms(&mut self, gateway: &dyn SmsGateway) -> Option<SmsReport> {
        if self.sms_text.trim().is_empty() {
            return None;
        }
        let recipients = self.sms_recipients();
        let report = gateway.send_bulk(&recipients, &self.sms_text);

        self.sms_open = false;
        self.sms_text.clear();
        self.checked.clear();
        Some(report)
    }
}
