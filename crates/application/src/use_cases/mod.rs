//! Use cases built on top of request execution.

mod login;
mod poll;

pub use login::{LoginError, extract_token, login};
pub use poll::{PollError, PollOptions, wait_until};
