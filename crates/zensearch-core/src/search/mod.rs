//! The search pipeline.
//!
//! [`matcher`] scores one query string, [`expander`] turns a query into
//! related terms, [`semantic`] merges both, and [`facade`] is the single
//! entry point callers use. [`insights`], [`suggest`] and [`highlight`] are
//! post-processing helpers for presenting results.

pub mod expander;
pub mod facade;
pub mod highlight;
pub mod insights;
pub mod matcher;
pub mod semantic;
pub mod suggest;
pub mod synonyms;
pub mod text;
