use std::fmt;

use crate::feature::{self, Feature, FeatureValue};

/// A syntactic category: base leaves, directional functors, and polymorphic
/// category variables resolved through unification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cat {
  /// Sentence, decorated with part-of-speech, conjugation and binary slots
  S(Vec<Feature>),
  /// Noun phrase, decorated with a case feature
  NP(Vec<Feature>),
  /// Bare noun
  N,
  /// Embedded sentence
  Sbar(Vec<Feature>),
  /// Conjunction
  Conj,
  /// Open bracket
  LParen,
  /// Close bracket
  RParen,
  /// `X/Y`: result, argument sought to the right
  Slash(Box<Cat>, Box<Cat>),
  /// `X\Y`: result, argument sought to the left
  Bslash(Box<Cat>, Box<Cat>),
  /// Category variable with a restriction. A head-restricted variable only
  /// constrains a functor's ultimate result, never its arguments.
  T {
    head: bool,
    index: usize,
    restr: Box<Cat>,
  },
}

/// Conjugation values a sentence category may carry at the end of a minor
/// phrase (bunsetsu).
const BUNSETSU_CONJ: &[FeatureValue] = &[
  FeatureValue::Cont,
  FeatureValue::Term,
  FeatureValue::Attr,
  FeatureValue::Hyp,
  FeatureValue::Imper,
  FeatureValue::Pre,
  FeatureValue::NTerm,
  FeatureValue::NStem,
  FeatureValue::TeForm,
  FeatureValue::NiForm,
];

impl Cat {
  pub fn slash(result: Cat, argument: Cat) -> Cat {
    Cat::Slash(Box::new(result), Box::new(argument))
  }

  pub fn bslash(result: Cat, argument: Cat) -> Cat {
    Cat::Bslash(Box::new(result), Box::new(argument))
  }

  pub fn var(head: bool, index: usize, restr: Cat) -> Cat {
    Cat::T {
      head,
      index,
      restr: Box::new(restr),
    }
  }

  /// Not a functor, and not an unrestricted variable.
  pub fn is_base_category(&self) -> bool {
    match self {
      Self::S(_) | Self::NP(_) | Self::N | Self::Sbar(_) => true,
      Self::Conj | Self::LParen | Self::RParen => true,
      Self::T { head: true, .. } => true,
      Self::T { head: false, restr, .. } => restr.is_base_category(),
      Self::Slash(_, _) | Self::Bslash(_, _) => false,
    }
  }

  /// A category that may fill an argument slot: a case-marked noun phrase or
  /// an embedded sentence.
  pub fn is_argument_category(&self) -> bool {
    match self {
      Self::NP(_) => !self.is_noncase_np(),
      Self::Sbar(_) => true,
      _ => false,
    }
  }

  /// A noun phrase whose single case feature admits the case-less value.
  pub fn is_noncase_np(&self) -> bool {
    match self {
      Self::NP(fs) => match fs.as_slice() {
        [f] => f.values().contains(&FeatureValue::Nc),
        _ => false,
      },
      _ => false,
    }
  }

  /// A case-less noun phrase argument under a variable head, `T\NPnc`. Used
  /// to block vacuous modifier application in the composition rules.
  pub fn is_t_noncase_np(&self) -> bool {
    match self {
      Self::Bslash(result, argument) => {
        matches!(**result, Self::T { .. }) && argument.is_noncase_np()
      }
      _ => false,
    }
  }

  /// Can this category end a minor phrase (appear left-adjacent to a
  /// punctuation mark)? For sentence categories the conjugation slot must
  /// intersect the terminal-like value set.
  pub fn is_bunsetsu(&self) -> bool {
    match self {
      Self::Slash(result, _) | Self::Bslash(result, _) => result.is_bunsetsu(),
      Self::LParen => false,
      Self::N => false,
      Self::S(fs) => match fs.get(1) {
        Some(conj) => conj.values().iter().any(|v| BUNSETSU_CONJ.contains(v)),
        None => true,
      },
      _ => true,
    }
  }

  /// The ultimate result is a category variable.
  pub fn ends_with_t(&self) -> bool {
    match self {
      Self::Slash(result, _) => result.ends_with_t(),
      Self::T { .. } => true,
      _ => false,
    }
  }

  /// The ultimate result is a sentence in the nominal-stem form.
  pub fn is_n_stem(&self) -> bool {
    match self {
      Self::Bslash(result, _) => result.is_n_stem(),
      Self::S(fs) => match fs.get(1) {
        Some(conj) => conj.values().contains(&FeatureValue::NStem),
        None => false,
      },
      _ => false,
    }
  }

  /// Curried argument count: how many argument layers wrap the ultimate
  /// result.
  pub fn number_of_arguments(&self) -> usize {
    match self {
      Self::Slash(result, _) | Self::Bslash(result, _) => 1 + result.number_of_arguments(),
      _ => 0,
    }
  }

  /// Largest variable index or feature sharing key occurring anywhere in the
  /// category. Categories and their features share one index space.
  pub fn maximum_index(&self) -> usize {
    match self {
      Self::T { index, restr, .. } => (*index).max(restr.maximum_index()),
      Self::Slash(a, b) | Self::Bslash(a, b) => a.maximum_index().max(b.maximum_index()),
      Self::S(fs) | Self::NP(fs) | Self::Sbar(fs) => feature::maximum_index(fs),
      _ => 0,
    }
  }

  /// Shifts every index in the category by `inc`. Shifting one operand past
  /// the other's maximum index guarantees disjoint index spaces before
  /// unification.
  pub fn increment_index(&self, inc: usize) -> Cat {
    match self {
      Self::T { head, index, restr } => Self::T {
        head: *head,
        index: index + inc,
        restr: Box::new(restr.increment_index(inc)),
      },
      Self::Slash(a, b) => Self::slash(a.increment_index(inc), b.increment_index(inc)),
      Self::Bslash(a, b) => Self::bslash(a.increment_index(inc), b.increment_index(inc)),
      Self::S(fs) => Self::S(feature::increment_index(fs, inc)),
      Self::Sbar(fs) => Self::Sbar(feature::increment_index(fs, inc)),
      Self::NP(fs) => Self::NP(feature::increment_index(fs, inc)),
      other => other.clone(),
    }
  }
}

fn write_features(f: &mut fmt::Formatter<'_>, fs: &[Feature]) -> fmt::Result {
  for feat in fs {
    write!(f, "{}", feat)?;
  }
  Ok(())
}

impl fmt::Display for Cat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::S(fs) => {
        write!(f, "S")?;
        write_features(f, fs)
      }
      Self::NP(fs) => {
        write!(f, "NP")?;
        write_features(f, fs)
      }
      Self::N => write!(f, "N"),
      Self::Sbar(fs) => {
        write!(f, "Sbar")?;
        write_features(f, fs)
      }
      Self::Conj => write!(f, "CONJ"),
      Self::LParen => write!(f, "LPAREN"),
      Self::RParen => write!(f, "RPAREN"),
      Self::Slash(a, b) => write!(f, "({}/{})", a, b),
      Self::Bslash(a, b) => write!(f, "({}\\{})", a, b),
      Self::T { head, index, restr } => {
        write!(f, "T{}{}({})", if *head { "'" } else { "" }, index, restr)
      }
    }
  }
}
