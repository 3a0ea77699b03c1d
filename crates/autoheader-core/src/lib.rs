//! Core library for autoheader.
//!
//! Watches for newly created files and, when a file is empty and its extension
//! has a template, inserts a header (file name, author, organization, contact,
//! date) at the top and saves it.
//!
//! The pipeline for one creation batch:
//!
//! ```text
//! watcher::CreationWatcher ──batch──▶ handler::CreationHandler
//!   (filter::PathFilter)                 │
//!                                        │  config::resolve(store)
//!                                        │  handler::plan_batch  (registry + renderer)
//!                                        ▼
//!                              scheduler::InsertScheduler
//!                                        │  delay → writer::is_empty → writer::insert
//!                                        ▼
//!                               workspace::Workspace
//! ```
//!
//! Settings come from a [`store::ConfigStore`] and are re-read for every batch.
//! File access goes through the [`workspace::Workspace`] trait; in-memory
//! implementations of both are provided for tests.

pub mod account;
pub mod config;
pub mod error;
pub mod filter;
pub mod handler;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod templates;
pub mod watcher;
pub mod workspace;
pub mod writer;
