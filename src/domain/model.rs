use serde::{Deserialize, Serialize};

/// A registered account. Field order matches the persisted store layout:
/// `username password loyaltyPoints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub loyalty_points: u32,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            loyalty_points: 0,
        }
    }
}

/// A booked service slot. Appointments are session-wide and not linked to
/// the account that created them; their identity is their position in the
/// appointment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub customer_name: String,
    pub service: String,
    pub appointment_time: String,
    pub is_paid: bool,
    pub feedback: String,
}

impl Appointment {
    pub fn new(
        customer_name: impl Into<String>,
        service: impl Into<String>,
        appointment_time: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            service: service.into(),
            appointment_time: appointment_time.into(),
            is_paid: false,
            feedback: String::new(),
        }
    }
}

/// The single current-user slot: who is logged in right now.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, username: impl Into<String>) {
        self.current_user = Some(username.into());
    }

    pub fn logout(&mut self) {
        self.current_user = None;
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// One display row of the appointment listing. The points column always
/// carries the current session user's balance, not a per-appointment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRow {
    pub index: usize,
    pub customer_name: String,
    pub service: String,
    pub appointment_time: String,
    pub is_paid: bool,
    pub feedback: String,
    pub loyalty_points: u32,
}

/// Complete hundreds of points converted into a monetary amount, with the
/// remainder kept on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub amount: u32,
    pub remaining: u32,
}

/// What a single payment did: the fixed point award, plus the automatic
/// redemption when the balance crossed the threshold in the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub awarded: u32,
    pub redemption: Option<Redemption>,
}
