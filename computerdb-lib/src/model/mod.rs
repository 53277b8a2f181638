//! Data model types

mod company;
mod computer;

pub use company::Company;
pub use computer::ComputerRecord;
