mod book;
mod lending;
mod rent;
mod user;

#[cfg(test)]
mod fixture;

pub use self::{book::*, lending::*, rent::*, user::*};
