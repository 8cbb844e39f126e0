//! Cross-cutting helpers: platform paths, JSON persistence, logging.

pub mod logging;
pub mod persistence;
