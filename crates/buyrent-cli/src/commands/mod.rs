pub mod analyze;
pub mod mortgage;
pub mod sensitivity;
