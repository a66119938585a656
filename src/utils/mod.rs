//! Utility modules.
//!
//! Provides:
//! - [`RingBuffer`] - Bounded buffer for history and transcript
//! - [`format`] - Column layout and numbered listings
//! - [`timer`] - Platform sleep for handler timeouts

pub mod format;
mod ring_buffer;
pub mod timer;

pub use ring_buffer::RingBuffer;
