//! `envguard` - Declarative validation for environment-style configuration
//!
//! Validates a flat string-keyed source (typically the process
//! environment) against an ordered schema of typed validators, resolving
//! tiered defaults, conditional requirements, secrets, and deprecations,
//! and returning an immutable, access-checked result alongside batched
//! diagnostics.
//!
//! ```
//! use envguard::{boolean, clean, num, string, CollectingReporter, RawEnv, ResolveOptions, Schema, Validator};
//!
//! let schema = Schema::new()
//!     .field("PORT", num().default(3000))
//!     .field("HOST", string().default("localhost"))
//!     .field("DEBUG", boolean().default(false));
//!
//! let source = RawEnv::from_pairs([("PORT", "8080")]);
//! let env = clean(&schema, &source, &ResolveOptions::default(), &CollectingReporter::new());
//!
//! assert_eq!(env.get_num("PORT"), Some(8080.0));
//! assert_eq!(env.get_str("HOST"), Some("localhost".to_string()));
//! assert!(env.is_development());
//! ```

pub mod error;
pub mod example;
pub mod guard;
pub mod mask;
pub mod reporter;
pub mod resolve;
pub mod schema;
pub mod source;
pub mod tier;
pub mod validator;
pub mod value;

pub use error::{Diagnostic, ExitCode, ParseError, Severity};
pub use example::render_example;
pub use guard::Env;
pub use reporter::{CollectingReporter, DefaultReporter, Reporter};
pub use resolve::{clean, clean_then, Resolved, ResolveOptions, ResolveOutcome, Resolver};
pub use schema::Schema;
pub use source::RawEnv;
pub use tier::Tier;
pub use validator::{
    array, boolean, bytes, custom, duration, email, host, json, matches, num, one_of, port,
    string, url, uuid, ByteUnit, DurationUnit, FieldOptions, FieldValidator, Validator,
};
pub use value::Value;
