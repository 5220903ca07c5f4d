pub mod http;
pub mod yookassa;
