mod register;
pub use register::Register;

mod locator;
pub use locator::Locator;
