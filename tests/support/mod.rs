#![allow(dead_code)]

pub mod platform;
pub mod socket_guard;
