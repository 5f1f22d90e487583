use crate::core::loyalty;
use crate::core::{Appointment, AppointmentRow, PaymentOutcome, Redemption, Session, User, UserStore};
use crate::utils::error::{Result, SalonError};
use std::collections::HashMap;

/// The salon service. Owns the registered users, the session-wide
/// appointment list and the current-user session, and talks to the
/// persisted store through the `UserStore` port.
///
/// Point mutations write through to the master users map, so a logout
/// never discards points accrued during the session; the store itself is
/// rewritten on successful registration and at exit.
pub struct Salon<S: UserStore> {
    store: S,
    users: HashMap<String, User>,
    appointments: Vec<Appointment>,
    session: Session,
}

impl<S: UserStore> Salon<S> {
    /// Loads the persisted users and starts with an empty appointment
    /// list and an unauthenticated session.
    pub fn open(store: S) -> Result<Self> {
        let users = store.load()?;
        tracing::debug!("Loaded {} user(s) from the store", users.len());
        Ok(Self {
            store,
            users,
            appointments: Vec::new(),
            session: Session::new(),
        })
    }

    /// Inserts a new account with zero points and rewrites the store.
    /// A taken username changes nothing.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if self.users.contains_key(username) {
            tracing::debug!("Registration rejected, username taken: {}", username);
            return Err(SalonError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        self.users
            .insert(username.to_string(), User::new(username, password));
        tracing::info!("Registered user: {}", username);

        // The in-memory account stands even if the rewrite fails; the
        // next save event retries.
        self.save()
    }

    /// Exact string match against the stored password. Success points the
    /// session at the account; failure leaves it untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        match self.users.get(username) {
            Some(user) if user.password == password => {
                self.session.login(username);
                tracing::info!("User logged in: {}", username);
                Ok(())
            }
            _ => {
                tracing::debug!("Failed login attempt for: {}", username);
                Err(SalonError::AuthenticationFailure)
            }
        }
    }

    /// Unconditionally clears the session.
    pub fn logout(&mut self) {
        if let Some(username) = self.session.current_user() {
            tracing::info!("User logged out: {}", username);
        }
        self.session.logout();
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session
            .current_user()
            .and_then(|username| self.users.get(username))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The current session user's balance; zero when nobody is logged in.
    pub fn loyalty_points(&self) -> u32 {
        self.current_user().map_or(0, |user| user.loyalty_points)
    }

    /// Appends a new unpaid appointment and returns its index.
    pub fn add_appointment(
        &mut self,
        customer_name: &str,
        service: &str,
        appointment_time: &str,
    ) -> Result<usize> {
        self.require_login()?;
        self.appointments
            .push(Appointment::new(customer_name, service, appointment_time));
        let index = self.appointments.len() - 1;
        tracing::debug!("Added appointment #{} for {}", index, customer_name);
        Ok(index)
    }

    /// Removes the appointment at `index`; later indices shift down by
    /// one. Out-of-range indices change nothing.
    pub fn cancel_appointment(&mut self, index: usize) -> Result<Appointment> {
        self.require_login()?;
        self.check_index(index)?;
        let removed = self.appointments.remove(index);
        tracing::debug!("Canceled appointment #{} for {}", index, removed.customer_name);
        Ok(removed)
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    /// Snapshot of the appointment list for display. Every row repeats
    /// the current session user's point balance.
    pub fn appointments(&self) -> Vec<AppointmentRow> {
        let loyalty_points = self.loyalty_points();
        self.appointments
            .iter()
            .enumerate()
            .map(|(index, appointment)| AppointmentRow {
                index,
                customer_name: appointment.customer_name.clone(),
                service: appointment.service.clone(),
                appointment_time: appointment.appointment_time.clone(),
                is_paid: appointment.is_paid,
                feedback: appointment.feedback.clone(),
                loyalty_points,
            })
            .collect()
    }

    /// Marks the appointment paid and awards the fixed number of points.
    /// Crossing the redemption threshold converts complete hundreds in
    /// the same call. An invalid index mutates nothing.
    pub fn make_payment(&mut self, index: usize) -> Result<PaymentOutcome> {
        let username = self.require_login()?;
        self.check_index(index)?;

        // 標記已付款並發放點數
        self.appointments[index].is_paid = true;
        let user = self
            .users
            .get_mut(&username)
            .ok_or(SalonError::NotAuthenticated)?;
        user.loyalty_points = loyalty::award(user.loyalty_points);
        let awarded = loyalty::POINTS_PER_PAYMENT;
        tracing::debug!(
            "Payment on appointment #{}: {} now has {} point(s)",
            index,
            username,
            user.loyalty_points
        );

        // 達到門檻時自動兌換
        let redemption = loyalty::try_redeem(user.loyalty_points);
        if let Some(redemption) = redemption {
            user.loyalty_points = redemption.remaining;
            tracing::info!(
                "Auto-redeemed {} for {}, {} point(s) remain",
                redemption.amount,
                username,
                redemption.remaining
            );
        }

        Ok(PaymentOutcome {
            awarded,
            redemption,
        })
    }

    /// Stores the feedback text verbatim on the appointment.
    pub fn provide_feedback(&mut self, index: usize, feedback: &str) -> Result<()> {
        self.require_login()?;
        self.check_index(index)?;
        self.appointments[index].feedback = feedback.to_string();
        tracing::debug!("Feedback recorded for appointment #{}", index);
        Ok(())
    }

    /// Standalone redemption with the same arithmetic as the automatic
    /// one. Below the threshold nothing changes.
    pub fn redeem_points(&mut self) -> Result<Redemption> {
        let username = self.require_login()?;
        let user = self
            .users
            .get_mut(&username)
            .ok_or(SalonError::NotAuthenticated)?;

        let redemption =
            loyalty::try_redeem(user.loyalty_points).ok_or(SalonError::InsufficientPoints {
                points: user.loyalty_points,
                threshold: loyalty::REDEEM_THRESHOLD,
            })?;
        user.loyalty_points = redemption.remaining;
        tracing::info!(
            "Redeemed {} for {}, {} point(s) remain",
            redemption.amount,
            username,
            redemption.remaining
        );
        Ok(redemption)
    }

    /// Full rewrite of the persisted store.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.users)?;
        tracing::debug!("Saved {} user(s) to the store", self.users.len());
        Ok(())
    }

    fn require_login(&self) -> Result<String> {
        self.session
            .current_user()
            .map(str::to_string)
            .ok_or(SalonError::NotAuthenticated)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.appointments.len() {
            Ok(())
        } else {
            Err(SalonError::InvalidIndex {
                input: index.to_string(),
                reason: format!("out of range for {} appointment(s)", self.appointments.len()),
            })
        }
    }
}
