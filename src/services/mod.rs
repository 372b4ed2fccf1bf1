pub mod specialist_service;
pub mod consultation_service;
