//! CLI for the Copydesk article pipeline.
//!
//! Two subcommands: `write` runs one article generation end to end and
//! prints the event stream as it arrives; `eval` drives the pipeline over a
//! JSONL file of requests and reports averaged quality scores.

pub mod cli;
pub mod commands;
