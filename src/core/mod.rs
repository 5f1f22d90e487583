pub mod loyalty;
pub mod salon;

pub use crate::domain::model::{
    Appointment, AppointmentRow, PaymentOutcome, Redemption, Session, User,
};
pub use crate::domain::ports::{ConfigProvider, UserStore};
pub use crate::utils::error::Result;
