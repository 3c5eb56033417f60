//! papervault - a self-hostable archive for moderated exam paper sharing
//!
//! Members submit papers for peer reuse; every submission passes a
//! moderation gate before becoming publicly visible, and approved papers are
//! served for download with usage counting. The metadata registry and the
//! blob store are deliberately not transactional; ordering rules
//! (blob-before-metadata on create, metadata-regardless-of-blob on delete)
//! are the consistency mechanism.

pub mod auth;
pub mod blob_store;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod papers;
pub mod registry;
