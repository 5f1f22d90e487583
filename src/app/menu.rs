use crate::core::salon::Salon;
use crate::core::{ConfigProvider, UserStore};
use crate::utils::error::{Result, SalonError};
use crate::utils::validation;
use std::io::{BufRead, Write};

/// The interactive text menu. Generic over its input and output so tests
/// can drive a scripted session through a buffer.
pub struct Menu<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompts for a numbered choice and dispatches until Exit or end of
    /// input, then rewrites the user store once.
    pub fn run<S: UserStore, C: ConfigProvider>(
        &mut self,
        salon: &mut Salon<S>,
        config: &C,
    ) -> Result<()> {
        tracing::info!("🚀 Starting interactive session");

        loop {
            self.show_menu(config.salon_name())?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                tracing::debug!("End of input, leaving the menu");
                break;
            };
            tracing::debug!("Menu choice: {}", choice);

            match choice.parse::<u32>() {
                Ok(1) => self.handle_register(salon)?,
                Ok(2) => self.handle_login(salon)?,
                Ok(3) => self.handle_add_appointment(salon)?,
                Ok(4) => self.handle_cancel_appointment(salon)?,
                Ok(5) => self.handle_display_appointments(salon)?,
                Ok(6) => self.handle_payment(salon)?,
                Ok(7) => self.handle_feedback(salon)?,
                Ok(8) => self.handle_redeem(salon)?,
                Ok(9) => self.handle_logout(salon)?,
                Ok(10) => {
                    writeln!(self.output, "Exiting the system. Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        // 離開選單時完整改寫用戶存儲
        salon.save()?;
        tracing::info!("✅ Session ended, user store saved");
        Ok(())
    }

    fn show_menu(&mut self, salon_name: &str) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", salon_name)?;
        writeln!(self.output, "1. Register")?;
        writeln!(self.output, "2. Login")?;
        writeln!(self.output, "3. Add Appointment")?;
        writeln!(self.output, "4. Cancel Appointment")?;
        writeln!(self.output, "5. Display Appointments")?;
        writeln!(self.output, "6. Make Payment")?;
        writeln!(self.output, "7. Provide Feedback")?;
        writeln!(self.output, "8. Redeem Loyalty Points")?;
        writeln!(self.output, "9. Logout")?;
        writeln!(self.output, "10. Exit")?;
        Ok(())
    }

    fn handle_register<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        if let Err(e) = validation::validate_credential("Username", &username) {
            return self.report_error(&e);
        }
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(());
        };
        if let Err(e) = validation::validate_credential("Password", &password) {
            return self.report_error(&e);
        }

        match salon.register(&username, &password) {
            Ok(()) => writeln!(self.output, "User registered successfully.")?,
            Err(e @ SalonError::DuplicateUsername { .. }) => {
                writeln!(self.output, "{}", e.user_friendly_message())?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_login<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(());
        };
        if let Err(e) = validation::validate_credential("Username", &username) {
            return self.report_error(&e);
        }
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(());
        };
        if let Err(e) = validation::validate_credential("Password", &password) {
            return self.report_error(&e);
        }

        match salon.login(&username, &password) {
            Ok(()) => writeln!(self.output, "Login successful. Welcome, {}!", username)?,
            Err(e @ SalonError::AuthenticationFailure) => {
                writeln!(self.output, "{}", e.user_friendly_message())?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_add_appointment<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        if !salon.is_authenticated() {
            writeln!(self.output, "Error: Please log in before adding an appointment.")?;
            return Ok(());
        }

        let Some(customer_name) = self.prompt_raw("Enter customer name: ")? else {
            return Ok(());
        };
        let Some(service) = self.prompt_raw("Enter service: ")? else {
            return Ok(());
        };
        let Some(appointment_time) = self.prompt_raw("Enter appointment time: ")? else {
            return Ok(());
        };

        match salon.add_appointment(&customer_name, &service, &appointment_time) {
            Ok(_) => writeln!(self.output, "Appointment added successfully.")?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_cancel_appointment<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        if salon.appointment_count() == 0 {
            writeln!(self.output, "No appointments available to cancel.")?;
            return Ok(());
        }
        if !salon.is_authenticated() {
            writeln!(self.output, "Error: Please log in before canceling an appointment.")?;
            return Ok(());
        }

        let Some(raw) = self.prompt("Enter the index of the appointment to cancel: ")? else {
            return Ok(());
        };
        match parse_index(&raw).and_then(|index| salon.cancel_appointment(index)) {
            Ok(_) => writeln!(self.output, "Appointment canceled successfully.")?,
            Err(SalonError::InvalidIndex { .. }) => {
                writeln!(self.output, "Invalid index. No appointment canceled.")?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_display_appointments<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        let rows = salon.appointments();
        if rows.is_empty() {
            writeln!(self.output, "No appointments available.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "{:>5} {:>20} {:>20} {:>20} {:>10} {:>30} {:>15}",
            "Index", "Customer Name", "Service", "Appointment Time", "Paid", "Feedback", "Loyalty Points"
        )?;
        for row in rows {
            writeln!(
                self.output,
                "{:>5} {:>20} {:>20} {:>20} {:>10} {:>30} {:>15}",
                row.index,
                row.customer_name,
                row.service,
                row.appointment_time,
                if row.is_paid { "Yes" } else { "No" },
                row.feedback,
                row.loyalty_points
            )?;
        }
        Ok(())
    }

    fn handle_payment<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        if !salon.is_authenticated() {
            writeln!(self.output, "Error: Please log in before making a payment.")?;
            return Ok(());
        }

        let Some(raw) = self.prompt("Enter the index of the appointment to make a payment: ")?
        else {
            return Ok(());
        };
        match parse_index(&raw).and_then(|index| salon.make_payment(index)) {
            Ok(outcome) => {
                writeln!(
                    self.output,
                    "Payment successful. You have earned {} loyalty points.",
                    outcome.awarded
                )?;
                if let Some(redemption) = outcome.redemption {
                    self.report_redemption(redemption.amount)?;
                }
            }
            Err(SalonError::InvalidIndex { .. }) => {
                writeln!(self.output, "Invalid index. Payment failed.")?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_feedback<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        if !salon.is_authenticated() {
            writeln!(self.output, "Error: Please log in before providing feedback.")?;
            return Ok(());
        }

        let Some(raw) = self.prompt("Enter the index of the appointment to provide feedback: ")?
        else {
            return Ok(());
        };
        // Reject the index before asking for the text, so a bad index
        // never prompts for feedback it will not keep.
        let index = match parse_index(&raw) {
            Ok(index) if index < salon.appointment_count() => index,
            _ => {
                writeln!(self.output, "Invalid index. Feedback not provided.")?;
                return Ok(());
            }
        };

        let Some(feedback) = self.prompt_raw("Enter your feedback: ")? else {
            return Ok(());
        };
        match salon.provide_feedback(index, &feedback) {
            Ok(()) => writeln!(self.output, "Thank you for your feedback.")?,
            Err(SalonError::InvalidIndex { .. }) => {
                writeln!(self.output, "Invalid index. Feedback not provided.")?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_redeem<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        if !salon.is_authenticated() {
            writeln!(self.output, "Error: Please log in before redeeming points.")?;
            return Ok(());
        }

        match salon.redeem_points() {
            Ok(redemption) => self.report_redemption(redemption.amount)?,
            Err(SalonError::InsufficientPoints { .. }) => {
                writeln!(self.output, "Insufficient loyalty points to redeem.")?
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn handle_logout<S: UserStore>(&mut self, salon: &mut Salon<S>) -> Result<()> {
        salon.logout();
        writeln!(self.output, "Logout successful. Goodbye!")?;
        Ok(())
    }

    fn report_redemption(&mut self, amount: u32) -> Result<()> {
        writeln!(
            self.output,
            "Congratulations! Your loyalty points have been redeemed for Rs.{} online balance.",
            amount
        )?;
        Ok(())
    }

    fn report_error(&mut self, error: &SalonError) -> Result<()> {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            error,
            error.category(),
            error.severity()
        );
        writeln!(self.output, "❌ {}", error.user_friendly_message())?;
        writeln!(self.output, "💡 {}", error.recovery_suggestion())?;
        Ok(())
    }

    /// Writes the label, then reads one line and trims it. `None` means
    /// end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Like `prompt`, but keeps the line verbatim (minus the newline) for
    /// free-text fields such as names, times and feedback.
    fn prompt_raw(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

fn parse_index(input: &str) -> Result<usize> {
    input.parse::<usize>().map_err(|_| SalonError::InvalidIndex {
        input: input.to_string(),
        reason: "not a non-negative integer".to_string(),
    })
}
