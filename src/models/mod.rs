pub mod dose;
pub mod enums;
pub mod medication;
pub mod user;

pub use dose::MedicationDose;
pub use enums::{DoseStatus, InvalidEnum, Plan};
pub use medication::{Medication, MedicationUpdate, NewMedication};
pub use user::UserAccount;
