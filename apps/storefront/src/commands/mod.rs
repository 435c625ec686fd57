//! # Commands
//!
//! Operations the pages invoke. Synchronous cart commands dispatch straight
//! into the store; product loads and checkout are async effects that
//! dispatch once their request settles.

pub mod cart;
pub mod checkout;
pub mod product;

pub use cart::{CartLine, CartResponse, CartTotals};
