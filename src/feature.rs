use std::fmt;

/// Values of the syntactic features of Japanese: conjugation classes for
/// verbs (V5k..VURU), adjectives (Aauo..ABES) and nominal predicates
/// (Nda..Nto), conjugation forms (Stem..ModM), voice markers (VoR..VoE),
/// binary plus/minus slots (P/M), case markers (Nc..No) and clause markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum FeatureValue {
  V5k,
  V5s,
  V5t,
  V5n,
  V5m,
  V5r,
  V5w,
  V5g,
  V5z,
  V5b,
  V5IKU,
  V5YUK,
  V5ARU,
  V5NAS,
  V5TOW,
  V1,
  VK,
  VS,
  VSN,
  VZ,
  VURU,
  Aauo,
  Ai,
  ANAS,
  ATII,
  ABES,
  Nda,
  Nna,
  Nno,
  Ntar,
  Nni,
  Nemp,
  Nto,
  Exp,
  Stem,
  UStem,
  NStem,
  Neg,
  Cont,
  Term,
  Attr,
  Hyp,
  Imper,
  Pre,
  NTerm,
  NegL,
  TeForm,
  NiForm,
  EuphT,
  EuphD,
  ModU,
  ModD,
  ModS,
  ModM,
  VoR,
  VoS,
  VoE,
  P,
  M,
  Nc,
  Ga,
  O,
  Ni,
  To,
  Niyotte,
  No,
  ToCL,
  YooniCL,
  Decl,
}

impl fmt::Display for FeatureValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self)
  }
}

/// A feature decorating a category: an admissible value set, optionally
/// shared (co-indexed) with other occurrences through an integer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
  Plain(Vec<FeatureValue>),
  Shared(usize, Vec<FeatureValue>),
}

impl Feature {
  /// The admissible value set, ignoring sharing.
  pub fn values(&self) -> &[FeatureValue] {
    match self {
      Self::Plain(vs) => vs,
      Self::Shared(_, vs) => vs,
    }
  }
}

impl fmt::Display for Feature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Self::Shared(i, _) = self {
      write!(f, "<{}>", i)?;
    }
    write!(f, "[")?;
    for (idx, v) in self.values().iter().enumerate() {
      if idx > 0 {
        write!(f, ",")?;
      }
      write!(f, "{}", v)?;
    }
    write!(f, "]")
  }
}

/// Largest sharing key occurring in a feature list. Plain features carry no
/// key and count as 0.
pub fn maximum_index(fs: &[Feature]) -> usize {
  fs.iter()
    .map(|f| match f {
      Feature::Shared(i, _) => *i,
      Feature::Plain(_) => 0,
    })
    .max()
    .unwrap_or(0)
}

/// Shifts every sharing key in a feature list by `inc`.
pub fn increment_index(fs: &[Feature], inc: usize) -> Vec<Feature> {
  fs.iter()
    .map(|f| match f {
      Feature::Shared(i, vs) => Feature::Shared(i + inc, vs.clone()),
      plain => plain.clone(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use FeatureValue::*;

  #[test]
  fn test_maximum_index() {
    assert_eq!(maximum_index(&[]), 0);
    assert_eq!(maximum_index(&[Feature::Plain(vec![Ga])]), 0);
    assert_eq!(
      maximum_index(&[
        Feature::Plain(vec![Ga]),
        Feature::Shared(3, vec![P, M]),
        Feature::Shared(1, vec![Term]),
      ]),
      3
    );
  }

  #[test]
  fn test_increment_index() {
    let fs = vec![Feature::Shared(2, vec![P, M]), Feature::Plain(vec![Nc])];
    assert_eq!(
      increment_index(&fs, 5),
      vec![Feature::Shared(7, vec![P, M]), Feature::Plain(vec![Nc])]
    );
  }
}
