//! HTML pages
//!
//! Handlers live in `handlers/`, templates under `templates/pages/`.

pub mod handlers;
