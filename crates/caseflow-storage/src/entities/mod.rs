pub mod alert;
pub mod case;
