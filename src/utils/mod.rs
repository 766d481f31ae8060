//! Display helpers shared by the front-ends

pub mod country;
