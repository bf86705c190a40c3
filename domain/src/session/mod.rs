//! Session log domain.
//!
//! A session lives entirely in one append-only stream:
//!
//! - [`record::StreamRecord`] - the typed records a stream holds
//! - [`log::SessionLog`] - a stream classified by record kind, with the
//!   status fold
//! - [`stream_name::StreamName`] - naming rules tying streams to owners
//!   and room codes
//! - [`room_code::RoomCode`] - the 4-digit public code
//! - [`index::IndexRecord`] - lookup records kept in index streams

pub mod index;
pub mod log;
pub mod record;
pub mod room_code;
pub mod stream_name;
