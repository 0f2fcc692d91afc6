pub mod bill;
pub mod checkout;
pub mod order;
pub mod responses;
pub mod wallet;
pub mod webhook;
