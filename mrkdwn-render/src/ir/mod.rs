//! Intermediate Representation (IR) for messages.
//!
//! The markup tree is first flattened into an event stream
//! ([`from_markup::markup_to_events`]), which the common stack machine
//! ([`crate::common::flat_to_nested::events_to_tree`]) turns back into the
//! nested block tree defined in [`nodes`]. The serializer only ever sees that
//! tree.

pub mod events;
pub mod from_markup;
pub mod nodes;
