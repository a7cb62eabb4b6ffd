//! Parser library for the zim wiki markup.
//!
//!     The markup is parsed in three stages: [zim::lexing] classifies source lines,
//!     [zim::inlines] resolves formatting inside text-bearing lines and [zim::building]
//!     assembles both into the [zim::ast::Document] tree that every output format shares.
//!
//!     [zim::parsing::parse_document] runs the whole pipeline. It never fails: malformed
//!     markup always degrades to the most literal reading of the source.

pub mod zim;
