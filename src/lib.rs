//! # sport_connect
//!
//! Client-side core of the Sport Connect event pages: the event action
//! dispatcher (join / leave / cancel), the "Coach Sport+" chatbot widget
//! controller, transient alerts and the HTML escaping used for chat bubbles.
//!
//! Nothing here touches the DOM. The browser glue lives in the `frontend`
//! crate and plugs in through the traits in [`service`] and [`alerts`].

pub mod alerts;
pub mod config;
pub mod errors;
pub mod markup;
pub mod models;
pub mod service;

pub use config::ClientConfig;
pub use errors::ClientError;
