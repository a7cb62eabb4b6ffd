//! Format implementations
//!
//! One module per format. Each holds a [crate::Format] implementation in `mod.rs` and the
//! tree walker that writes the output in `serializer.rs`.

pub mod html;
pub mod latex;
pub mod markdown;
pub mod plain;
pub mod rst;
pub mod wiki;

pub use html::HtmlFormat;
pub use latex::LatexFormat;
pub use markdown::MarkdownFormat;
pub use plain::PlainFormat;
pub use rst::RstFormat;
pub use wiki::WikiFormat;
