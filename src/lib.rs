#[macro_use]
extern crate lazy_static;

pub mod assignment;
pub mod cat;
pub mod chart;
pub mod extract;
pub mod feature;
pub mod lexicon;
pub mod node;
pub mod rules;
pub mod unify;

use std::error::Error;

pub use crate::cat::Cat;
pub use crate::chart::{purify_text, Chart};
pub use crate::extract::{extract_parse_result, ParseResult};
pub use crate::feature::{Feature, FeatureValue};
pub use crate::lexicon::Lexicon;
pub use crate::node::{Node, RuleSymbol};

/// Boxed static error type
pub type Err = Box<dyn Error + 'static>;
