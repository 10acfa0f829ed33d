use std::fmt;
use std::rc::Rc;

use crate::cat::Cat;

/// The combinatory rule that derived a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSymbol {
  /// Lexical item
  Lex,
  /// Empty category
  Ec,
  /// Forward function application
  Ffa,
  /// Backward function application
  Bfa,
  /// Forward function composition, depth 1
  Ffc1,
  /// Backward function composition, depth 1
  Bfc1,
  /// Forward function composition, depth 2
  Ffc2,
  /// Backward function composition, depth 2
  Bfc2,
  /// Forward function composition, depth 3
  Ffc3,
  /// Backward function composition, depth 3
  Bfc3,
  /// Forward function crossed composition, depth 1
  Ffcx1,
  /// Forward function crossed composition, depth 2
  Ffcx2,
  /// Forward function crossed substitution
  Ffsx,
  /// Coordination
  Coord,
  /// Parenthesis
  Paren,
  /// Declarative wrap, applied during result extraction
  Wrap,
  /// Dynamic conjunction, used to stitch partial parses
  Dc,
}

impl fmt::Display for RuleSymbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Lex => "LEX",
      Self::Ec => "EC",
      Self::Ffa => "FFA",
      Self::Bfa => "BFA",
      Self::Ffc1 => "FFC1",
      Self::Bfc1 => "BFC1",
      Self::Ffc2 => "FFC2",
      Self::Bfc2 => "BFC2",
      Self::Ffc3 => "FFC3",
      Self::Bfc3 => "BFC3",
      Self::Ffcx1 => "FFCx1",
      Self::Ffcx2 => "FFCx2",
      Self::Ffsx => "FFSx",
      Self::Coord => "COORD",
      Self::Paren => "PAREN",
      Self::Wrap => "WRAP",
      Self::Dc => "DC",
    };
    write!(f, "{}", name)
  }
}

/// A node in a derivation tree: the rule that built it, the surface text it
/// covers, its category, its children (0 for leaves, 2 for binary rules, 3
/// for ternary ones), a score, and a provenance tag. Nodes are immutable
/// once built and shared between chart cells through `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  pub rule: RuleSymbol,
  pub surface: String,
  pub cat: Cat,
  pub children: Vec<Rc<Node>>,
  pub score: f64,
  pub source: String,
}

impl Node {
  /// A lexical leaf. `score` is an integer percentage, as lexicon sources
  /// record it.
  pub fn lexical(surface: &str, source: &str, score: i64, cat: Cat) -> Self {
    Self {
      rule: RuleSymbol::Lex,
      surface: surface.to_string(),
      cat,
      children: Vec::new(),
      score: score as f64 / 100.0,
      source: source.to_string(),
    }
  }

  /// An empty category: no surface text, inserted during chart filling.
  pub fn empty_category(source: &str, score: i64, cat: Cat) -> Self {
    Self {
      rule: RuleSymbol::Ec,
      surface: String::new(),
      cat,
      children: Vec::new(),
      score: score as f64 / 100.0,
      source: source.to_string(),
    }
  }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}: {} ({:.4})", self.rule, self.surface, self.cat, self.score)
  }
}
