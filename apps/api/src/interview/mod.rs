//! Interview lifecycle: the detail page that hands off to the voice agent,
//! the feedback report, and the interview lookup endpoint.

pub mod detail;
pub mod feedback;
pub mod handlers;
pub mod render;
pub mod source;
pub mod view;
