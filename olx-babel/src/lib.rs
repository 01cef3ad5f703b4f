//! Problem markdown to OLX conversion
//!
//!     Course authors write assessment problems in a small markdown shorthand (`(x)` for the
//!     correct choice, `= 42` for a numerical answer, `|| hint ||` for demand hints) and the
//!     course runtime wants OLX, its XML problem format. This crate does that conversion and a
//!     couple of things around it: telling which response types a problem holds and which
//!     editor can open it.
//!
//!     This is a pure lib: it powers olx-cli but knows nothing about the shell. No printing,
//!     no env vars, no files. Logging goes through `tracing` and is left to the caller to
//!     collect.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── pipeline.rs             # Stage catalogue, per-block runner, traces
//!     ├── problem.rs              # Response types and problem classification
//!     ├── markdown
//!     │   ├── mod.rs              # Entry points, block splitting and assembly
//!     │   ├── stages.rs           # Headers, labels, hints, paragraphs, cleanup
//!     │   ├── hints.rs            # {{ label:: hint }} extraction
//!     │   ├── choices.rs          # Dropdown, single and multi select
//!     │   ├── answers.rs          # Numerical and text input
//!     │   └── hoist.rs            # Moving a block inside its only response
//!     └── xml
//!         ├── mod.rs              # Owned tree and serializer
//!         └── parser.rs           # roxmltree to owned tree
//!
//! Core Algorithm
//!
//!     Conversion is a fixed sequence of regex rewrites run over each `---` separated block,
//!     followed by one structural step: when a block ends up with exactly one response element,
//!     the rest of the block is moved inside it, since that is where the editors look for the
//!     question text. The rewrites are plain text to text functions so each can be tested, and
//!     traced, on its own (see ./pipeline.rs).
//!
//!     The shorthand has no error cases. Lines the rules do not recognize come out as
//!     paragraphs. The structural step parses XML and so can fail on stray `<` or `&`; such
//!     blocks are kept as they are and reported as diagnostics.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── markdown
//!     │   ├── mod.rs
//!     │   └── <topic>.rs
//!     └── problem
//!         └── mod.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
pub mod error;
pub mod markdown;
pub mod pipeline;
pub mod problem;
pub mod xml;

pub use error::FormatError;
pub use markdown::{convert, convert_with_options, convert_with_trace, try_convert, ConvertOptions};
pub use pipeline::{Conversion, Diagnostic, Stage, TraceOptions};
pub use problem::{classify_problem, detect_response_types, ProblemType, ResponseType};
