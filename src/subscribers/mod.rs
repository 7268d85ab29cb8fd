//! # Event subscribers for the executor.
//!
//! ```text
//! Executor / RegistrationListener ── publish(Event) ──► Bus ──► subscriber_listener
//!                                                                     │
//!                                                               SubscriberSet::emit
//!                                                            ┌────────┼────────┐
//!                                                            ▼        ▼        ▼
//!                                                          sub1     sub2     subN
//! ```

mod subscriber;
mod subscriber_set;

pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;
