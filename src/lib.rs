//! Marvin Suggest — task suggestion engine for Amazing Marvin.
//!
//! Classifies scraped page metadata from GitHub, Jira, Slack, and Gmail
//! into normalized task suggestions (title, time estimate, priority,
//! label hints), and optionally refines them through an external AI
//! provider with a TTL-bounded suggestion cache.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod labels;
pub mod metadata;
pub mod platform;
pub mod templates;
pub mod title;

pub mod context;

pub mod ai;
