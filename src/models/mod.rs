pub mod specialist;
pub mod consultation;

pub use specialist::*;
pub use consultation::*;
